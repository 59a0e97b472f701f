use std::collections::VecDeque;

use crate::foundation::error::{DrillError, DrillResult};

/// Token scheduled on the audio clock for one beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatCue {
    /// Index into the beat table.
    pub beat: usize,
    /// Whether this is the last scheduled beat of the show.
    pub ends_show: bool,
}

/// Notifications delivered by an audio back-end.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    /// Source loaded and ready to play.
    Loaded,
    /// Source failed to load.
    LoadFailed(String),
    /// Playback started.
    Play,
    /// Playback stopped.
    Stop,
    /// Playback reached the end of the source.
    Finished,
    /// Playback position reached a scheduled cue.
    Cue(BeatCue),
}

/// Contract of the external audio playback object.
///
/// Events are delivered asynchronously from the caller's point of view: the back-end queues
/// them and [`AudioPlayer::poll_events`] hands them over. A cue scheduled with
/// [`AudioPlayer::add_timed_event`] must not be delivered for a time before the start time of
/// the most recent [`AudioPlayer::play`].
pub trait AudioPlayer {
    /// Begin loading `source`.
    fn load(&mut self, source: &str) -> DrillResult<()>;
    /// Start playing from `start_ms`.
    fn play(&mut self, start_ms: f64);
    /// Stop playing.
    fn stop(&mut self);
    /// Whether audio is currently playing.
    fn is_playing(&self) -> bool;
    /// Whether a source is loaded and playable.
    fn is_ready(&self) -> bool;
    /// Whether the back-end hit an error.
    fn error_flag(&self) -> bool;
    /// Deliver `cue` once the playback position reaches `time_ms`.
    fn add_timed_event(&mut self, time_ms: f64, cue: BeatCue);
    /// Drop every scheduled cue.
    fn clear_timed_events(&mut self);
    /// Drain queued events in delivery order.
    fn poll_events(&mut self) -> Vec<AudioEvent>;
}

/// Deterministic audio back-end driven by an explicit clock.
///
/// Nothing is heard; [`SimulatedAudio::advance_to`] moves the playback position and queues the
/// cues it passes. Used for headless playback and tests.
#[derive(Clone, Debug)]
pub struct SimulatedAudio {
    duration_ms: f64,
    source: Option<String>,
    ready: bool,
    error: bool,
    playing: bool,
    play_start_ms: f64,
    position_ms: f64,
    cues: Vec<(f64, BeatCue)>,
    pending: VecDeque<AudioEvent>,
}

impl SimulatedAudio {
    /// A back-end whose sources last `duration_ms`.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            source: None,
            ready: false,
            error: false,
            playing: false,
            play_start_ms: 0.0,
            position_ms: 0.0,
            cues: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Loaded source, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Start time of the most recent play.
    pub fn play_start_ms(&self) -> f64 {
        self.play_start_ms
    }

    /// Current playback position.
    pub fn position_ms(&self) -> f64 {
        self.position_ms
    }

    /// Scheduled cues in time order.
    pub fn timed_events(&self) -> &[(f64, BeatCue)] {
        &self.cues
    }

    /// Move the playback position forward to `time_ms`, queueing every cue passed on the way.
    ///
    /// Does nothing while stopped. Reaching the end of the source queues
    /// [`AudioEvent::Finished`] and stops.
    pub fn advance_to(&mut self, time_ms: f64) {
        if !self.playing || time_ms <= self.position_ms {
            return;
        }
        let target = time_ms.min(self.duration_ms);
        let from = self.position_ms;
        for &(t, cue) in &self.cues {
            if t > from && t <= target {
                self.pending.push_back(AudioEvent::Cue(cue));
            }
        }
        self.position_ms = target;
        if target >= self.duration_ms {
            self.playing = false;
            self.pending.push_back(AudioEvent::Finished);
        }
    }
}

impl AudioPlayer for SimulatedAudio {
    fn load(&mut self, source: &str) -> DrillResult<()> {
        self.stop();
        if source.is_empty() {
            self.ready = false;
            self.error = true;
            self.pending
                .push_back(AudioEvent::LoadFailed("empty source".to_owned()));
            return Err(DrillError::playback("cannot load an empty audio source"));
        }
        self.source = Some(source.to_owned());
        self.ready = true;
        self.error = false;
        self.pending.push_back(AudioEvent::Loaded);
        Ok(())
    }

    fn play(&mut self, start_ms: f64) {
        if !self.ready {
            return;
        }
        self.playing = true;
        self.play_start_ms = start_ms;
        self.position_ms = start_ms;
        self.pending.push_back(AudioEvent::Play);
    }

    fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        // Anything the clock queued but nobody consumed yet belongs to the stopped run.
        self.pending
            .retain(|e| !matches!(e, AudioEvent::Cue(_) | AudioEvent::Finished));
        self.pending.push_back(AudioEvent::Stop);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_ready(&self) -> bool {
        self.ready && !self.error
    }

    fn error_flag(&self) -> bool {
        self.error
    }

    fn add_timed_event(&mut self, time_ms: f64, cue: BeatCue) {
        let at = self.cues.partition_point(|&(t, _)| t <= time_ms);
        self.cues.insert(at, (time_ms, cue));
    }

    fn clear_timed_events(&mut self) {
        self.cues.clear();
    }

    fn poll_events(&mut self) -> Vec<AudioEvent> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/audio.rs"]
mod tests;
