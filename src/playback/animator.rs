use crate::{
    foundation::error::{DrillError, DrillResult},
    navigation::delegate::AnimationStateDelegate,
    playback::audio::{AudioEvent, AudioPlayer, BeatCue},
    timing::beats::TimedBeats,
};

/// Notifications emitted by [`MusicAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatorEvent {
    /// Audio started playing.
    Start,
    /// Playback stopped (not emitted for the stop that ends a show).
    Stop,
    /// The show played to its end.
    Finished,
    /// Navigation advanced one beat.
    Beat,
    /// Audio, beats and navigation are all in place.
    Ready,
}

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
struct Listeners {
    start: Option<Listener>,
    stop: Option<Listener>,
    finished: Option<Listener>,
    beat: Option<Listener>,
    ready: Option<Listener>,
}

impl Listeners {
    fn slot(&mut self, event: AnimatorEvent) -> &mut Option<Listener> {
        match event {
            AnimatorEvent::Start => &mut self.start,
            AnimatorEvent::Stop => &mut self.stop,
            AnimatorEvent::Finished => &mut self.finished,
            AnimatorEvent::Beat => &mut self.beat,
            AnimatorEvent::Ready => &mut self.ready,
        }
    }

    fn notify(&mut self, event: AnimatorEvent) {
        if let Some(f) = self.slot(event) {
            f();
        }
    }
}

/// Drives an [`AnimationStateDelegate`] from an audio clock.
///
/// Every beat in the [`TimedBeats`] table except beat 0 is scheduled as a cue on the audio
/// back-end; each cue that comes back advances navigation by one beat. Beat 0 is where
/// playback begins and is never scheduled. Any reconfiguration stops playback first so that
/// in-flight cues cannot land on replaced state.
pub struct MusicAnimator<A: AudioPlayer> {
    delegate: Option<AnimationStateDelegate>,
    beats: Option<TimedBeats>,
    music: Option<A>,
    listeners: Listeners,
    suppress_next_stop: bool,
    ended: bool,
}

impl<A: AudioPlayer> Default for MusicAnimator<A> {
    fn default() -> Self {
        Self {
            delegate: None,
            beats: None,
            music: None,
            listeners: Listeners::default(),
            suppress_next_stop: false,
            ended: false,
        }
    }
}

impl<A: AudioPlayer> MusicAnimator<A> {
    /// An animator with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the single listener for `event`, replacing any previous one.
    pub fn on(&mut self, event: AnimatorEvent, f: impl FnMut() + 'static) {
        *self.listeners.slot(event) = Some(Box::new(f));
    }

    /// Remove the listener for `event`.
    pub fn clear_listener(&mut self, event: AnimatorEvent) {
        *self.listeners.slot(event) = None;
    }

    /// Attach the navigation state to drive.
    pub fn set_animation_state_delegate(&mut self, delegate: AnimationStateDelegate) {
        self.stop();
        self.delegate = Some(delegate);
        self.notify_if_ready();
    }

    /// Attach the audio back-end and schedule beat cues on it.
    pub fn set_music(&mut self, music: A) {
        self.stop();
        self.music = Some(music);
        self.install_cues();
        self.notify_if_ready();
    }

    /// Attach the beat table and reschedule beat cues.
    pub fn set_beats(&mut self, beats: TimedBeats) {
        self.stop();
        self.beats = Some(beats);
        self.install_cues();
        self.notify_if_ready();
    }

    /// Navigation state being driven.
    pub fn delegate(&self) -> Option<&AnimationStateDelegate> {
        self.delegate.as_ref()
    }

    /// Mutable navigation state, for seeking while stopped.
    pub fn delegate_mut(&mut self) -> Option<&mut AnimationStateDelegate> {
        self.delegate.as_mut()
    }

    /// Attached beat table.
    pub fn beats(&self) -> Option<&TimedBeats> {
        self.beats.as_ref()
    }

    /// Attached audio back-end.
    pub fn music(&self) -> Option<&A> {
        self.music.as_ref()
    }

    /// Mutable audio back-end.
    pub fn music_mut(&mut self) -> Option<&mut A> {
        self.music.as_mut()
    }

    /// Whether audio is loaded and ready, and beats and navigation are attached.
    pub fn is_ready(&self) -> bool {
        let music_ready = self.music.as_ref().is_some_and(A::is_ready);
        music_ready && self.beats.is_some() && self.delegate.is_some()
    }

    /// Whether audio is currently playing.
    pub fn is_playing(&self) -> bool {
        self.music.as_ref().is_some_and(A::is_playing)
    }

    /// Start playback from the displayed moment.
    ///
    /// At the end of the show this finishes immediately instead.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> DrillResult<()> {
        if !self.is_ready() {
            return Err(DrillError::playback(
                "music animator is not ready (audio, beats and navigation are required)",
            ));
        }
        self.ended = false;
        let (Some(delegate), Some(beats), Some(music)) =
            (&mut self.delegate, &self.beats, &mut self.music)
        else {
            return Err(DrillError::playback("music animator is not ready"));
        };

        // Show-wide beat already heard; -1 means nothing has played yet.
        let position = i64::try_from(delegate.absolute_beat()).unwrap_or(i64::MAX) - 1;
        let last_scheduled = i64::try_from(beats.count()).unwrap_or(i64::MAX) - 1;
        if !delegate.has_next_beat() || position >= last_scheduled {
            tracing::debug!(position, last_scheduled, "start requested at end of show");
            self.end_of_show();
            return Ok(());
        }

        if position < 0 {
            delegate.next_beat();
            music.play(0.0);
            tracing::debug!("playback started from the top");
            self.listeners.notify(AnimatorEvent::Beat);
        } else {
            let at = beats.beat_time(position as usize).unwrap_or(0.0);
            music.play(at);
            tracing::debug!(position, at_ms = at, "playback resumed");
        }
        Ok(())
    }

    /// Stop playback. Safe to call at any time.
    pub fn stop(&mut self) {
        if let Some(music) = self.music.as_mut()
            && music.is_playing()
        {
            music.stop();
        }
    }

    /// Pull pending events from the audio back-end and react to them.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self) {
        loop {
            let events = match self.music.as_mut() {
                Some(music) => music.poll_events(),
                None => return,
            };
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_audio_event(event);
            }
        }
    }

    /// React to a single audio event.
    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Loaded => self.notify_if_ready(),
            AudioEvent::LoadFailed(reason) => {
                tracing::warn!(%reason, "audio failed to load");
            }
            AudioEvent::Play => self.listeners.notify(AnimatorEvent::Start),
            AudioEvent::Stop => {
                if self.suppress_next_stop {
                    self.suppress_next_stop = false;
                    tracing::debug!("stop notification suppressed");
                } else {
                    self.listeners.notify(AnimatorEvent::Stop);
                }
            }
            AudioEvent::Finished => self.end_of_show(),
            AudioEvent::Cue(cue) => self.on_cue(cue),
        }
    }

    fn on_cue(&mut self, cue: BeatCue) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.next_beat();
        }
        tracing::trace!(beat = cue.beat, "beat cue");
        self.listeners.notify(AnimatorEvent::Beat);
        if cue.ends_show {
            self.end_of_show();
        }
    }

    fn end_of_show(&mut self) {
        // The last cue and the end of the audio can arrive together; finish once per run.
        if self.ended {
            return;
        }
        self.ended = true;
        if self.is_playing() {
            self.suppress_next_stop = true;
            self.stop();
        }
        tracing::debug!("show finished");
        self.listeners.notify(AnimatorEvent::Finished);
    }

    fn install_cues(&mut self) {
        let (Some(music), Some(beats)) = (self.music.as_mut(), self.beats.as_ref()) else {
            return;
        };
        music.clear_timed_events();
        let last = beats.count().saturating_sub(1);
        for (beat, &time_ms) in beats.times().iter().enumerate().skip(1) {
            music.add_timed_event(
                time_ms,
                BeatCue {
                    beat,
                    ends_show: beat == last,
                },
            );
        }
        tracing::debug!(cues = last, "beat cues installed");
    }

    fn notify_if_ready(&mut self) {
        if self.is_ready() {
            tracing::debug!("music animator ready");
            self.listeners.notify(AnimatorEvent::Ready);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/animator.rs"]
mod tests;
