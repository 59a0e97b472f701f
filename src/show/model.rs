use std::{collections::BTreeSet, path::Path};

use crate::{
    foundation::core::Coordinate,
    foundation::error::{DrillError, DrillResult},
    motion::command::{Motion, MovementCommand},
    motion::dot::Dot,
};

/// A complete drill show.
///
/// A show is a pure data model that can be built programmatically or round-tripped through
/// JSON. Loading through [`Show::from_json`] / [`Show::from_path`] always validates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Show {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Formations in performance order.
    pub sheets: Vec<Sheet>,
}

/// One formation of the show.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sheet {
    /// Sheet label for authoring/debugging.
    #[serde(default)]
    pub label: String,
    /// Duration in beats.
    pub duration: u32,
    /// Per-performer movement on this sheet.
    pub dots: Vec<Dot>,
}

impl Sheet {
    /// Find a dot by label.
    pub fn dot_by_label(&self, label: &str) -> Option<&Dot> {
        self.dots.iter().find(|d| d.label == label)
    }
}

impl Show {
    /// Parse and validate a show from JSON text.
    pub fn from_json(s: &str) -> DrillResult<Self> {
        let show: Self = serde_json::from_str(s)
            .map_err(|e| DrillError::serde(format!("show JSON parse failed: {e}")))?;
        show.validate()?;
        Ok(show)
    }

    /// Read, parse and validate a show JSON file.
    pub fn from_path(path: &Path) -> DrillResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DrillError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json(&text)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> DrillResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DrillError::serde(format!("show JSON encode failed: {e}")))
    }

    /// Total beats across all sheets.
    pub fn total_beats(&self) -> u64 {
        self.sheets.iter().map(|s| u64::from(s.duration)).sum()
    }

    /// Show-wide beat at which sheet `index` begins.
    ///
    /// Indices past the end return [`Self::total_beats`].
    pub fn sheet_start_beat(&self, index: usize) -> u64 {
        self.sheets
            .iter()
            .take(index)
            .map(|s| u64::from(s.duration))
            .sum()
    }

    /// Check structural invariants the navigation and playback code relies on.
    #[tracing::instrument(skip(self), fields(sheets = self.sheets.len()))]
    pub fn validate(&self) -> DrillResult<()> {
        if self.sheets.is_empty() {
            return Err(DrillError::validation("show must contain at least one sheet"));
        }

        for (sheet_index, sheet) in self.sheets.iter().enumerate() {
            if sheet.duration == 0 {
                return Err(DrillError::validation(format!(
                    "sheet {sheet_index} has zero duration"
                )));
            }

            let mut labels = BTreeSet::new();
            for dot in &sheet.dots {
                if !labels.insert(dot.label.as_str()) {
                    return Err(DrillError::validation(format!(
                        "sheet {sheet_index} has duplicate dot label '{}'",
                        dot.label
                    )));
                }
                if dot.total_beats() != sheet.duration {
                    return Err(DrillError::validation(format!(
                        "dot '{}' on sheet {sheet_index} moves for {} beats but the sheet lasts {}",
                        dot.label,
                        dot.total_beats(),
                        sheet.duration
                    )));
                }
                for (i, cmd) in dot.commands.iter().enumerate() {
                    validate_command(cmd).map_err(|msg| {
                        DrillError::validation(format!(
                            "dot '{}' on sheet {sheet_index}, command {i}: {msg}",
                            dot.label
                        ))
                    })?;
                }
                for (i, pair) in dot.commands.windows(2).enumerate() {
                    let (end, start) = (pair[0].end_pos(), pair[1].start_pos());
                    if (end - start).hypot() > CONTINUITY_TOLERANCE {
                        return Err(DrillError::validation(format!(
                            "dot '{}' on sheet {sheet_index}: command {} starts at ({}, {}) but command {i} ends at ({}, {})",
                            dot.label,
                            i + 1,
                            start.x,
                            start.y,
                            end.x,
                            end.y
                        )));
                    }
                }
            }
        }

        tracing::debug!(total_beats = self.total_beats(), "show validated");
        Ok(())
    }
}

/// Largest gap, in steps, allowed between one command's end and the next command's start.
const CONTINUITY_TOLERANCE: f64 = 1e-6;

fn validate_command(cmd: &MovementCommand) -> Result<(), &'static str> {
    fn finite(p: Coordinate) -> bool {
        p.x.is_finite() && p.y.is_finite()
    }

    let ok = match cmd.motion {
        Motion::Stationary { pos, facing, .. } | Motion::MarkTime { pos, facing } => {
            finite(pos) && facing.is_finite()
        }
        Motion::LinearStep {
            start,
            step,
            facing,
            beats_per_step,
        } => {
            if beats_per_step == 0 {
                return Err("beats_per_step must be > 0");
            }
            finite(start) && step.is_finite() && facing.is_finite()
        }
        Motion::Teleport { start, end, facing } => {
            finite(start) && finite(end) && facing.is_finite()
        }
        Motion::Arc {
            start,
            center,
            angle,
            facing_offset,
            beats_per_step,
        } => {
            if beats_per_step == 0 {
                return Err("beats_per_step must be > 0");
            }
            finite(start) && finite(center) && angle.is_finite() && facing_offset.is_finite()
        }
        Motion::EvenStep {
            start,
            end,
            facing,
            beats_per_step,
        } => {
            if beats_per_step == 0 {
                return Err("beats_per_step must be > 0");
            }
            finite(start) && finite(end) && facing.is_finite()
        }
    };

    if ok {
        Ok(())
    } else {
        Err("coordinates and angles must be finite")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/model.rs"]
mod tests;
