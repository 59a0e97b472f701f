use std::sync::Arc;

use crate::{
    foundation::core::AnimationState,
    show::model::{Sheet, Show},
};

/// Single source of truth for the displayed moment of a show.
///
/// State is `(sheet index, beat within sheet, selected dot)`. Beat 0 of a sheet is the
/// pre-movement pose inherited from the previous sheet. Every transition is total: at the
/// edges of the show navigation saturates instead of failing.
#[derive(Clone, Debug)]
pub struct AnimationStateDelegate {
    show: Arc<Show>,
    sheet_index: usize,
    beat: u32,
    selected_dot: Option<String>,
}

impl AnimationStateDelegate {
    /// Start at the first beat of the first sheet with nothing selected.
    pub fn new(show: Arc<Show>) -> Self {
        Self {
            show,
            sheet_index: 0,
            beat: 0,
            selected_dot: None,
        }
    }

    /// Replace the show and reset to `(0, 0, None)`.
    pub fn set_show(&mut self, show: Arc<Show>) {
        self.show = show;
        self.sheet_index = 0;
        self.beat = 0;
        self.selected_dot = None;
    }

    /// The show being navigated.
    pub fn show(&self) -> &Arc<Show> {
        &self.show
    }

    /// Index of the displayed sheet.
    pub fn current_sheet_index(&self) -> usize {
        self.sheet_index
    }

    /// Beat within the displayed sheet.
    pub fn current_beat(&self) -> u32 {
        self.beat
    }

    /// The displayed sheet.
    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.show.sheets.get(self.sheet_index)
    }

    /// Show-wide beat of the displayed moment.
    pub fn absolute_beat(&self) -> u64 {
        self.show.sheet_start_beat(self.sheet_index) + u64::from(self.beat)
    }

    fn duration(&self, sheet_index: usize) -> u32 {
        self.show.sheets.get(sheet_index).map_or(0, |s| s.duration)
    }

    fn last_beat(&self, sheet_index: usize) -> u32 {
        self.duration(sheet_index).saturating_sub(1)
    }

    /// Whether another sheet follows the displayed one.
    pub fn has_next_sheet(&self) -> bool {
        self.sheet_index + 1 < self.show.sheets.len()
    }

    /// Whether a sheet precedes the displayed one.
    pub fn has_prev_sheet(&self) -> bool {
        self.sheet_index > 0
    }

    /// Whether [`Self::next_beat`] would move.
    pub fn has_next_beat(&self) -> bool {
        self.beat < self.last_beat(self.sheet_index) || self.has_next_sheet()
    }

    /// Whether [`Self::prev_beat`] would move.
    pub fn has_prev_beat(&self) -> bool {
        self.beat > 0 || self.has_prev_sheet()
    }

    /// Advance one beat, rolling over into the next sheet.
    pub fn next_beat(&mut self) {
        if self.beat < self.last_beat(self.sheet_index) {
            self.beat += 1;
        } else if self.has_next_sheet() {
            self.sheet_index += 1;
            self.beat = 0;
        }
        tracing::trace!(sheet = self.sheet_index, beat = self.beat, "next beat");
    }

    /// Step back one beat, rolling back onto the previous sheet's last beat.
    pub fn prev_beat(&mut self) {
        if self.beat > 0 {
            self.beat -= 1;
        } else if self.has_prev_sheet() {
            self.sheet_index -= 1;
            self.beat = self.last_beat(self.sheet_index);
        }
        tracing::trace!(sheet = self.sheet_index, beat = self.beat, "prev beat");
    }

    /// Go to the start of the next sheet; on the last sheet, go to its last beat.
    pub fn next_sheet(&mut self) {
        if self.has_next_sheet() {
            self.sheet_index += 1;
            self.beat = 0;
        } else {
            self.beat = self.last_beat(self.sheet_index);
        }
        tracing::trace!(sheet = self.sheet_index, beat = self.beat, "next sheet");
    }

    /// Go to the start of the previous sheet; on the first sheet, go to its beat 0.
    pub fn prev_sheet(&mut self) {
        if self.has_prev_sheet() {
            self.sheet_index -= 1;
        }
        self.beat = 0;
        tracing::trace!(sheet = self.sheet_index, beat = self.beat, "prev sheet");
    }

    /// Jump to `(sheet_index, beat)`, clamped into the show.
    pub fn goto(&mut self, sheet_index: usize, beat: u32) {
        let last_sheet = self.show.sheets.len().saturating_sub(1);
        self.sheet_index = sheet_index.min(last_sheet);
        self.beat = beat.min(self.last_beat(self.sheet_index));
    }

    /// Select a dot by label.
    pub fn select_dot(&mut self, label: impl Into<String>) {
        self.selected_dot = Some(label.into());
    }

    /// Clear the dot selection.
    pub fn clear_selected_dot(&mut self) {
        self.selected_dot = None;
    }

    /// Label of the selected dot.
    pub fn selected_dot(&self) -> Option<&str> {
        self.selected_dot.as_deref()
    }

    /// Pose of dot `label` at the displayed moment.
    pub fn dot_state(&self, label: &str) -> Option<AnimationState> {
        self.current_sheet()?
            .dot_by_label(label)?
            .animation_state(self.beat)
    }

    /// Pose of the selected dot at the displayed moment.
    pub fn selected_dot_state(&self) -> Option<AnimationState> {
        self.dot_state(self.selected_dot.as_deref()?)
    }

    /// Pose of every drawable dot on the displayed sheet.
    pub fn current_dot_states(&self) -> Vec<(&str, AnimationState)> {
        let Some(sheet) = self.current_sheet() else {
            return Vec::new();
        };
        sheet
            .dots
            .iter()
            .filter_map(|dot| Some((dot.label.as_str(), dot.animation_state(self.beat)?)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/delegate.rs"]
mod tests;
