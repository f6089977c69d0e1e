//! Base scheduler: animations placed at absolute start times, driven either by
//! frame updates or by random-access seeks.

pub mod playback_state;
pub mod scheduled;

pub use playback_state::PlaybackState;
pub use scheduled::ScheduledAnimation;

use crate::animation::AnimationRef;
use crate::event::{EventQueue, EventType, TimelineEvent};
use crate::TimelineConfig;
use tracing::{debug, trace, warn};

/// Transport controls shared by [`Timeline`] and
/// [`MasterTimeline`](crate::MasterTimeline), so a player can drive either.
pub trait Playback {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
    fn update(&mut self, dt: f64);
    fn reset(&mut self);
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    fn is_playing(&self) -> bool;
}

/// Schedules animations and recomputes mobject state for any point in time.
#[derive(Debug)]
pub struct Timeline {
    /// Sorted by start time; equal starts keep insertion order
    entries: Vec<ScheduledAnimation>,
    current_time: f64,
    state: PlaybackState,
    config: TimelineConfig,
    events: EventQueue,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        let events = EventQueue::new(config.max_queued_events, config.enable_events);
        Self {
            entries: Vec::new(),
            current_time: 0.0,
            state: PlaybackState::Stopped,
            config,
            events,
        }
    }

    /// Append after everything scheduled so far. Returns the start time.
    pub fn add(&mut self, animation: AnimationRef) -> f64 {
        let start = self.duration();
        self.insert(ScheduledAnimation::new(animation, start));
        start
    }

    /// Schedule at an absolute start time.
    pub fn add_at(&mut self, animation: AnimationRef, start_time: f64) {
        let start = if start_time < 0.0 {
            warn!(start_time, "negative start time, scheduling at 0");
            0.0
        } else {
            start_time
        };
        self.insert(ScheduledAnimation::new(animation, start));
    }

    /// Schedule all `animations` together at the current end. Returns the start time.
    pub fn add_parallel(&mut self, animations: impl IntoIterator<Item = AnimationRef>) -> f64 {
        let start = self.duration();
        for animation in animations {
            self.insert(ScheduledAnimation::new(animation, start));
        }
        start
    }

    fn insert(&mut self, entry: ScheduledAnimation) {
        let index = self
            .entries
            .partition_point(|e| e.start() <= entry.start());
        self.entries.insert(index, entry);
    }

    /// Latest scheduled end time.
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(|e| e.end()).fold(0.0, f64::max)
    }

    #[inline]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Fraction of the duration elapsed, `0.0` for an empty timeline.
    pub fn progress(&self) -> f64 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.current_time / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[ScheduledAnimation] {
        &self.entries
    }

    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[inline]
    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Start or resume playback. Restarts from 0 once ended.
    pub fn play(&mut self) {
        if !self.state.can_resume() {
            return;
        }
        if self.state == PlaybackState::Ended {
            self.seek(0.0);
        }
        self.state = PlaybackState::Playing;
        self.emit(TimelineEvent::new(EventType::PlaybackStarted, self.current_time));
    }

    pub fn pause(&mut self) {
        if !self.state.can_pause() {
            return;
        }
        self.state = PlaybackState::Paused;
        self.emit(TimelineEvent::new(EventType::PlaybackPaused, self.current_time));
    }

    /// Advance by `dt` seconds while playing.
    pub fn update(&mut self, dt: f64) {
        if !self.is_playing() {
            return;
        }
        self.advance_clock(dt);
        self.tick(dt);
        self.end_if_complete();
    }

    /// Move the clock forward, clamped to the duration. Returns the new time.
    pub(crate) fn advance_clock(&mut self, dt: f64) -> f64 {
        self.current_time = (self.current_time + dt.max(0.0)).min(self.duration());
        self.current_time
    }

    /// Update every started, unfinished animation at the current time.
    pub(crate) fn tick(&mut self, dt: f64) {
        let time = self.current_time;
        for entry in &mut self.entries {
            if entry.start() > time {
                break;
            }
            let mut animation = entry.animation.borrow_mut();
            if animation.is_finished() {
                continue;
            }
            if !entry.started {
                animation.set_start_time(Some(entry.start()));
                entry.started = true;
                trace!(animation = animation.name(), start = entry.start(), "started");
            }
            animation.update(dt, time);
        }
    }

    pub(crate) fn end_if_complete(&mut self) {
        if self.is_playing() && self.current_time >= self.duration() {
            self.state = PlaybackState::Ended;
            debug!(time = self.current_time, "playback ended");
            self.emit(TimelineEvent::new(EventType::PlaybackEnded, self.current_time));
        }
    }

    /// Recompute every mobject for `time`.
    ///
    /// Seeking backward resets, latest first, the animations that have not
    /// ended by `time`; then every animation starting at or before `time` is
    /// replayed in schedule order, leaving unfinished ones ready to resume.
    pub fn seek(&mut self, time: f64) {
        let time = self.clamp_time(time);
        let backward = time < self.current_time;
        debug!(from = self.current_time, to = time, backward, "seek");

        if backward {
            for entry in self.entries.iter_mut().rev() {
                if entry.start() >= time || entry.end() > time {
                    entry.animation.borrow_mut().reset();
                    entry.started = false;
                }
            }
        }

        self.current_time = time;
        for entry in &mut self.entries {
            if entry.start() > time {
                break;
            }
            let mut animation = entry.animation.borrow_mut();
            animation.set_start_time(Some(entry.start()));
            entry.started = true;
            animation.update(0.0, time);
        }

        if self.state == PlaybackState::Ended && time < self.duration() {
            self.state = PlaybackState::Paused;
        }
        self.emit(TimelineEvent::seeked(time));
    }

    fn clamp_time(&self, time: f64) -> f64 {
        if time < 0.0 {
            warn!(time, "negative seek time, clamping to 0");
            return 0.0;
        }
        if self.config.clamp_seek {
            time.min(self.duration())
        } else {
            time
        }
    }

    /// Reset every animation and return to a stopped state at time 0.
    pub fn reset(&mut self) {
        for entry in self.entries.iter_mut().rev() {
            entry.animation.borrow_mut().reset();
            entry.started = false;
        }
        self.current_time = 0.0;
        self.state = PlaybackState::Stopped;
        self.emit(TimelineEvent::new(EventType::Reset, 0.0));
    }

    /// Forget which animations were handed their start time, so the next
    /// seek or tick re-begins them.
    pub(crate) fn clear_started(&mut self) {
        for entry in &mut self.entries {
            entry.started = false;
        }
    }

    pub(crate) fn emit(&mut self, event: TimelineEvent) {
        self.events.push(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        self.events.drain()
    }
}

impl Playback for Timeline {
    fn play(&mut self) {
        Timeline::play(self)
    }

    fn pause(&mut self) {
        Timeline::pause(self)
    }

    fn seek(&mut self, time: f64) {
        Timeline::seek(self, time)
    }

    fn update(&mut self, dt: f64) {
        Timeline::update(self, dt)
    }

    fn reset(&mut self) {
        Timeline::reset(self)
    }

    fn duration(&self) -> f64 {
        Timeline::duration(self)
    }

    fn current_time(&self) -> f64 {
        Timeline::current_time(self)
    }

    fn is_playing(&self) -> bool {
        Timeline::is_playing(self)
    }
}
