//! drillshow is the motion model and beat-synchronized playback engine behind an animated
//! marching-drill show viewer.
//!
//! A show is a sequence of sheets (formations). On every sheet each performer (dot) follows an
//! ordered list of movement commands. This crate turns that declarative data into exact poses
//! and keeps the displayed beat locked to an external audio clock.
//!
//! # Pieces
//!
//! 1. **Motion**: [`MovementCommand`] / [`Motion`] map a beat offset to an [`AnimationState`];
//!    a [`Dot`] resolves a beat within its sheet to the active command.
//! 2. **Navigation**: [`AnimationStateDelegate`] tracks `(sheet, beat, selected dot)` and
//!    saturates at the edges of the show.
//! 3. **Timing**: [`TimedBeats`] maps beat indices to audio time and back.
//! 4. **Playback**: [`MusicAnimator`] schedules one cue per beat on an [`AudioPlayer`] and
//!    advances navigation as cues come back.
//! 5. **Framing**: [`MovementViewport`] fits an aspect-preserving window around a dot's path.
//!
//! Drawing the field, paginating printouts and parsing legacy show files are left to the
//! presentation layers that consume these types.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod motion;
mod navigation;
mod playback;
mod show;
mod timing;
mod viewport;

pub use foundation::core::{
    AnimationState, Coordinate, Delta, Direction, Point, Vec2, angle_of, normalize_degrees,
    offset_at,
};
pub use foundation::error::{DrillError, DrillResult};
pub use motion::command::{Motion, MovementCommand};
pub use motion::dot::Dot;
pub use navigation::delegate::AnimationStateDelegate;
pub use playback::animator::{AnimatorEvent, MusicAnimator};
pub use playback::audio::{AudioEvent, AudioPlayer, BeatCue, SimulatedAudio};
pub use show::model::{Sheet, Show};
pub use timing::beats::TimedBeats;
pub use viewport::movement::{MovementViewport, ViewportConfig};
