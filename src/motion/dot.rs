use crate::{
    foundation::core::{AnimationState, Coordinate, Delta},
    motion::command::MovementCommand,
};

/// One performer's movement record for one sheet.
///
/// Commands are contiguous and ordered by execution; their durations add up to the sheet
/// duration (checked by [`crate::Show::validate`]).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dot {
    /// Performer label, unique within a sheet.
    pub label: String,
    /// Movement commands in execution order.
    pub commands: Vec<MovementCommand>,
}

impl Dot {
    /// Build a dot from its label and commands.
    pub fn new(label: impl Into<String>, commands: Vec<MovementCommand>) -> Self {
        Self {
            label: label.into(),
            commands,
        }
    }

    /// Sum of all command durations.
    pub fn total_beats(&self) -> u32 {
        self.commands.iter().map(MovementCommand::beat_duration).sum()
    }

    /// Pose at `beat` within the sheet.
    ///
    /// Returns `None` once `beat` reaches [`Self::total_beats`]: there is nothing to draw.
    pub fn animation_state(&self, beat: u32) -> Option<AnimationState> {
        let mut remaining = beat;
        for cmd in &self.commands {
            if remaining < cmd.beat_duration() {
                return Some(cmd.animation_state(remaining));
            }
            remaining -= cmd.beat_duration();
        }
        None
    }

    /// Where the first command starts, if there is one.
    pub fn start_pos(&self) -> Option<Coordinate> {
        self.commands.first().map(MovementCommand::start_pos)
    }

    /// Per-command displacements, in order.
    pub fn movement_path(&self) -> Vec<Delta> {
        self.commands.iter().map(MovementCommand::delta).collect()
    }

    /// Continuity line for every command, in order.
    pub fn continuity(&self) -> Vec<String> {
        self.commands.iter().map(MovementCommand::continuity).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/dot.rs"]
mod tests;
