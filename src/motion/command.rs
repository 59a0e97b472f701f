use crate::foundation::core::{
    AnimationState, Coordinate, Delta, Direction, angle_of, normalize_degrees, offset_at,
};

/// One movement primitive with its fixed duration in beats.
///
/// Querying beat `b` returns the pose after `b` beats of this command. Beat 0 is the start pose
/// (a [`Motion::Teleport`] is already at its end on beat 0) and beat [`Self::beat_duration`] is
/// the pose that the next command starts from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovementCommand {
    /// Duration in beats.
    pub beats: u32,
    /// Variant-specific motion description.
    #[serde(flatten)]
    pub motion: Motion,
}

/// Closed set of motion kinds.
///
/// Angles are degrees, clockwise from `+x`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    /// Hold `pos` facing `facing`.
    Stationary {
        /// Held position.
        pos: Coordinate,
        /// Held facing.
        facing: f64,
        /// Closed (at attention) rather than a generic stand; only affects continuity text.
        #[serde(default)]
        closed: bool,
    },
    /// Mark time in place. Moves exactly like [`Motion::Stationary`].
    MarkTime {
        /// Held position.
        pos: Coordinate,
        /// Held facing.
        facing: f64,
    },
    /// Move by `step` once every `beats_per_step` beats.
    LinearStep {
        /// Position on beat 0.
        start: Coordinate,
        /// Displacement per step.
        step: Delta,
        /// Constant facing, independent of travel direction.
        facing: f64,
        /// Beats taken by each step.
        beats_per_step: u32,
    },
    /// Jump to `end` immediately and hold there.
    Teleport {
        /// Predecessor's end position; never animated.
        start: Coordinate,
        /// Position held for the whole command.
        end: Coordinate,
        /// Held facing.
        facing: f64,
    },
    /// Step around `center`, sweeping `angle` degrees in total.
    Arc {
        /// Position on beat 0.
        start: Coordinate,
        /// Pivot of the arc.
        center: Coordinate,
        /// Total sweep; positive is clockwise.
        angle: f64,
        /// Added to the tangent facing.
        facing_offset: f64,
        /// Beats taken by each step.
        beats_per_step: u32,
    },
    /// Cover `start..end` in equal steps.
    EvenStep {
        /// Position on beat 0.
        start: Coordinate,
        /// Position after the last step.
        end: Coordinate,
        /// Constant facing, independent of travel direction.
        facing: f64,
        /// Beats taken by each step.
        beats_per_step: u32,
    },
}

fn step_count(beats: u32, beats_per_step: u32) -> u32 {
    beats.checked_div(beats_per_step).unwrap_or(0)
}

impl MovementCommand {
    /// Generic stand in place.
    pub fn stand(pos: Coordinate, facing: f64, beats: u32) -> Self {
        Self {
            beats,
            motion: Motion::Stationary {
                pos,
                facing,
                closed: false,
            },
        }
    }

    /// Closed (at attention) stand in place.
    pub fn close(pos: Coordinate, facing: f64, beats: u32) -> Self {
        Self {
            beats,
            motion: Motion::Stationary {
                pos,
                facing,
                closed: true,
            },
        }
    }

    /// Mark time in place.
    pub fn mark_time(pos: Coordinate, facing: f64, beats: u32) -> Self {
        Self {
            beats,
            motion: Motion::MarkTime { pos, facing },
        }
    }

    /// Constant-vector stepping.
    pub fn linear_step(
        start: Coordinate,
        step: Delta,
        facing: f64,
        beats: u32,
        beats_per_step: u32,
    ) -> Self {
        Self {
            beats,
            motion: Motion::LinearStep {
                start,
                step,
                facing,
                beats_per_step,
            },
        }
    }

    /// Instant relocation held for `beats`.
    pub fn teleport(start: Coordinate, end: Coordinate, facing: f64, beats: u32) -> Self {
        Self {
            beats,
            motion: Motion::Teleport { start, end, facing },
        }
    }

    /// Arc about `center`.
    pub fn arc(
        start: Coordinate,
        center: Coordinate,
        angle: f64,
        facing_offset: f64,
        beats: u32,
        beats_per_step: u32,
    ) -> Self {
        Self {
            beats,
            motion: Motion::Arc {
                start,
                center,
                angle,
                facing_offset,
                beats_per_step,
            },
        }
    }

    /// Even stepping from `start` to `end`.
    pub fn even_step(
        start: Coordinate,
        end: Coordinate,
        facing: f64,
        beats: u32,
        beats_per_step: u32,
    ) -> Self {
        Self {
            beats,
            motion: Motion::EvenStep {
                start,
                end,
                facing,
                beats_per_step,
            },
        }
    }

    /// Duration in beats.
    pub fn beat_duration(&self) -> u32 {
        self.beats
    }

    /// Position this command starts from.
    pub fn start_pos(&self) -> Coordinate {
        match self.motion {
            Motion::Stationary { pos, .. } | Motion::MarkTime { pos, .. } => pos,
            Motion::LinearStep { start, .. }
            | Motion::Teleport { start, .. }
            | Motion::Arc { start, .. }
            | Motion::EvenStep { start, .. } => start,
        }
    }

    /// Position the next command starts from.
    pub fn end_pos(&self) -> Coordinate {
        match self.motion {
            Motion::Teleport { end, .. } | Motion::EvenStep { end, .. } => end,
            _ => self.animation_state(self.beats).position(),
        }
    }

    /// Net displacement of this command.
    pub fn delta(&self) -> Delta {
        self.end_pos() - self.start_pos()
    }

    /// Pose after `beat` beats of this command.
    ///
    /// `beat` must lie in `0..=beat_duration()`. Beats left over when the duration is not a
    /// multiple of `beats_per_step` hold the last completed step.
    pub fn animation_state(&self, beat: u32) -> AnimationState {
        match self.motion {
            Motion::Stationary { pos, facing, .. } | Motion::MarkTime { pos, facing } => {
                AnimationState::new(pos, facing)
            }
            Motion::LinearStep {
                start,
                step,
                facing,
                beats_per_step,
            } => {
                let taken = step_count(beat, beats_per_step);
                AnimationState::new(start + step * f64::from(taken), facing)
            }
            Motion::Teleport { end, facing, .. } => AnimationState::new(end, facing),
            Motion::Arc {
                start,
                center,
                angle,
                facing_offset,
                beats_per_step,
            } => {
                let steps = step_count(self.beats, beats_per_step);
                let taken = step_count(beat, beats_per_step).min(steps);
                let radial = start - center;
                let radius = radial.hypot();
                let start_angle = if radius == 0.0 { 0.0 } else { angle_of(radial) };
                let step_angle = if steps == 0 {
                    0.0
                } else {
                    angle / f64::from(steps)
                };
                let current = start_angle + step_angle * f64::from(taken);
                let tangent = if step_angle >= 0.0 { 90.0 } else { -90.0 };
                AnimationState::new(
                    center + offset_at(current, radius),
                    normalize_degrees(current + tangent + facing_offset),
                )
            }
            Motion::EvenStep {
                start,
                end,
                facing,
                beats_per_step,
            } => {
                let steps = step_count(self.beats, beats_per_step);
                if steps == 0 {
                    return AnimationState::new(start, facing);
                }
                let taken = step_count(beat, beats_per_step).min(steps);
                let pos = start + (end - start) * f64::from(taken) / f64::from(steps);
                AnimationState::new(pos, facing)
            }
        }
    }

    /// Human-readable continuity label.
    pub fn continuity(&self) -> String {
        let beats = self.beats;
        match self.motion {
            Motion::Stationary { closed: true, .. } => format!("Close {beats}"),
            Motion::Stationary { closed: false, .. } => format!("Stand {beats}"),
            Motion::MarkTime { facing, .. } => {
                format!("MT {beats} {}", Direction::from_angle(facing))
            }
            Motion::LinearStep {
                step,
                beats_per_step,
                ..
            } => format!(
                "FM {} {}",
                step_count(beats, beats_per_step),
                Direction::from_angle(angle_of(step))
            ),
            Motion::Teleport { end, .. } => format!("Move to ({}, {})", end.x, end.y),
            Motion::Arc { angle, .. } => {
                let turn = if angle >= 0.0 { "CW" } else { "CCW" };
                format!("GT {turn} {} deg", angle.abs())
            }
            Motion::EvenStep { facing, .. } => {
                format!("Even {beats} {}", Direction::from_angle(facing))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/command.rs"]
mod tests;
