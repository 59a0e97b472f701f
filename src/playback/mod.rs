//! Beat-synchronized playback.
//!
//! The audio back-end owns the clock. [`crate::MusicAnimator`] schedules one cue per beat on it
//! and advances navigation only when those cues come back, so the displayed beat stays
//! phase-locked to what is being heard.

pub(crate) mod animator;
pub(crate) mod audio;
