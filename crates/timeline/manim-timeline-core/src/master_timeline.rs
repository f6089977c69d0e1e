//! Segment-aware timeline for slide-style presentations.
//!
//! A [`MasterTimeline`] groups parallel animations into [`Segment`]s laid end to
//! end. Seeking always replays from a fully reset scene, and mobjects whose
//! first segment lies in the future are kept hidden.

use crate::animation::{Animation, AnimationRef, Wait};
use crate::event::TimelineEvent;
use crate::mobject::{shared, MobjectRef, Placeholder};
use crate::span::TimeSpan;
use crate::timeline::{Playback, PlaybackState, Timeline};
use crate::{MobjectId, Result, TimelineConfig, TimelineError};
use std::collections::HashMap;
use tracing::debug;

/// A group of animations that start together, or a pure wait.
#[derive(Debug, Clone)]
pub struct Segment {
    pub index: usize,
    pub start_time: f64,
    pub end_time: f64,
    /// Empty for wait segments
    pub animations: Vec<AnimationRef>,
    pub is_wait: bool,
    pub label: Option<String>,
}

impl Segment {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    #[inline]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time, self.end_time)
    }
}

/// A mobject forced invisible by a seek, with the opacity it had before.
#[derive(Debug)]
struct Hidden {
    mobject: MobjectRef,
    opacity: f64,
}

#[derive(Debug)]
pub struct MasterTimeline {
    timeline: Timeline,
    segments: Vec<Segment>,
    /// Index of the first segment each mobject appears in
    first_segment: HashMap<MobjectId, usize>,
    /// Mobjects with a first-segment record, in order of appearance
    introduced: Vec<MobjectRef>,
    hidden: HashMap<MobjectId, Hidden>,
    /// Target of wait segments; never part of a scene
    sentinel: MobjectRef,
    last_segment: Option<usize>,
}

impl Default for MasterTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MasterTimeline {
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self::with_sentinel(config, shared(Placeholder::new()))
    }

    /// Use `sentinel` as the target of wait segments.
    pub fn with_sentinel(config: TimelineConfig, sentinel: MobjectRef) -> Self {
        Self {
            timeline: Timeline::with_config(config),
            segments: Vec::new(),
            first_segment: HashMap::new(),
            introduced: Vec::new(),
            hidden: HashMap::new(),
            sentinel,
            last_segment: None,
        }
    }

    /// Schedule `animations` in parallel after the last segment.
    pub fn add_segment(&mut self, animations: Vec<AnimationRef>) -> &Segment {
        self.push_segment(animations, false, None)
    }

    pub fn add_labeled_segment(
        &mut self,
        label: impl Into<String>,
        animations: Vec<AnimationRef>,
    ) -> &Segment {
        self.push_segment(animations, false, Some(label.into()))
    }

    /// Hold for `duration` seconds.
    pub fn add_wait_segment(&mut self, duration: f64) -> &Segment {
        let wait = Wait::new(self.sentinel.clone(), duration).into_ref();
        self.push_segment(vec![wait], true, None)
    }

    fn push_segment(
        &mut self,
        animations: Vec<AnimationRef>,
        is_wait: bool,
        label: Option<String>,
    ) -> &Segment {
        let index = self.segments.len();
        let start_time = self.timeline.duration();
        let longest = animations
            .iter()
            .map(|a| a.borrow().duration())
            .fold(0.0, f64::max);
        self.timeline.add_parallel(animations.iter().cloned());

        if !is_wait {
            for animation in &animations {
                let target = animation.borrow().target();
                let id = target.borrow().id();
                if !self.first_segment.contains_key(&id) {
                    self.first_segment.insert(id, index);
                    self.introduced.push(target);
                }
            }
        }

        debug!(index, start_time, end_time = start_time + longest, is_wait, "added segment");
        self.segments.push(Segment {
            index,
            start_time,
            end_time: start_time + longest,
            animations: if is_wait { Vec::new() } else { animations },
            is_wait,
            label,
        });
        &self.segments[index]
    }

    /// Recompute the whole scene for `time`.
    pub fn seek(&mut self, time: f64) {
        self.reveal_all();

        for segment in self.segments.iter().rev() {
            for animation in segment.animations.iter().rev() {
                animation.borrow_mut().reset();
            }
        }
        self.timeline.clear_started();
        self.timeline.seek(time);

        if self.timeline.config().hide_future_mobjects {
            self.hide_future(self.timeline.current_time());
        }
        self.note_segment();
    }

    fn reveal_all(&mut self) {
        for (_, hidden) in self.hidden.drain() {
            hidden.mobject.borrow_mut().set_opacity(hidden.opacity);
        }
    }

    /// Reveal mobjects whose first segment has started by `time`.
    fn reveal_reached(&mut self, time: f64) {
        let segments = &self.segments;
        let first_segment = &self.first_segment;
        self.hidden.retain(|id, hidden| {
            let reached = first_segment
                .get(id)
                .map_or(true, |&index| segments[index].start_time <= time);
            if reached {
                hidden.mobject.borrow_mut().set_opacity(hidden.opacity);
            }
            !reached
        });
    }

    fn hide_future(&mut self, time: f64) {
        for mobject in &self.introduced {
            let mut m = mobject.borrow_mut();
            let id = m.id();
            let Some(&index) = self.first_segment.get(&id) else {
                continue;
            };
            if self.segments[index].start_time > time && !self.hidden.contains_key(&id) {
                self.hidden.insert(
                    id,
                    Hidden {
                        mobject: mobject.clone(),
                        opacity: m.opacity(),
                    },
                );
                m.set_opacity(0.0);
            }
        }
        debug!(time, hidden = self.hidden.len(), "hid future mobjects");
    }

    /// Emit `SegmentEntered` when the current segment changed.
    fn note_segment(&mut self) {
        let current = self.current_segment().map(|s| s.index);
        if current != self.last_segment {
            self.last_segment = current;
            if let Some(index) = current {
                let time = self.timeline.current_time();
                self.timeline
                    .emit(TimelineEvent::segment_entered(index, time));
            }
        }
    }

    /// Seek to 0 and pause.
    pub fn reset(&mut self) {
        self.seek(0.0);
        self.timeline.pause();
    }

    /// Advance playback by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if !self.timeline.is_playing() {
            return;
        }
        let time = self.timeline.advance_clock(dt);
        self.reveal_reached(time);
        self.timeline.tick(dt);
        self.note_segment();
        self.timeline.end_if_complete();
    }

    /// Start or resume playback. A stopped timeline seeks first so future
    /// mobjects start hidden; an ended one restarts from 0.
    pub fn play(&mut self) {
        match self.timeline.playback_state() {
            PlaybackState::Ended => self.seek(0.0),
            PlaybackState::Stopped => self.seek(self.timeline.current_time()),
            _ => {}
        }
        self.timeline.play();
    }

    pub fn pause(&mut self) {
        self.timeline.pause();
    }

    /// Last segment starting at or before `time`, else the first segment.
    pub fn segment_at_time(&self, time: f64) -> Option<&Segment> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.start_time <= time)
            .or_else(|| self.segments.first())
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.segment_at_time(self.timeline.current_time())
    }

    /// Seek to the start of the segment after the current one.
    pub fn next_segment(&mut self) -> Option<&Segment> {
        let next = self.current_segment()?.index + 1;
        if next >= self.segments.len() {
            return None;
        }
        self.seek(self.segments[next].start_time);
        self.segments.get(next)
    }

    /// Rewind to the current segment's start once past the rewind threshold,
    /// otherwise go to the previous segment (or stay on the first).
    ///
    /// The threshold is `rewind_threshold` seconds (0.5 by default) from the
    /// segment start: with segments of 1, 2 and 1 seconds, calling this at
    /// t=1.2 lands on t=0, and at t=1.6 on t=1.
    pub fn prev_segment(&mut self) -> Option<&Segment> {
        let current = self.current_segment()?;
        let elapsed = self.timeline.current_time() - current.start_time;
        let target = if elapsed > self.timeline.config().rewind_threshold {
            current.index
        } else {
            current.index.saturating_sub(1)
        };
        self.seek(self.segments[target].start_time);
        self.segments.get(target)
    }

    /// Seek to the start of segment `index`.
    pub fn go_to_segment(&mut self, index: usize) -> Result<&Segment> {
        let count = self.segments.len();
        let start = self
            .segments
            .get(index)
            .map(|s| s.start_time)
            .ok_or(TimelineError::SegmentNotFound { index, count })?;
        self.seek(start);
        Ok(&self.segments[index])
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Index of the segment `id` first appears in.
    pub fn first_segment_of(&self, id: MobjectId) -> Option<usize> {
        self.first_segment.get(&id).copied()
    }

    pub fn is_hidden(&self, id: MobjectId) -> bool {
        self.hidden.contains_key(&id)
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    #[inline]
    pub fn current_time(&self) -> f64 {
        self.timeline.current_time()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    #[inline]
    pub fn playback_state(&self) -> PlaybackState {
        self.timeline.playback_state()
    }

    /// The underlying scheduler.
    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        self.timeline.drain_events()
    }
}

impl Playback for MasterTimeline {
    fn play(&mut self) {
        MasterTimeline::play(self)
    }

    fn pause(&mut self) {
        MasterTimeline::pause(self)
    }

    fn seek(&mut self, time: f64) {
        MasterTimeline::seek(self, time)
    }

    fn update(&mut self, dt: f64) {
        MasterTimeline::update(self, dt)
    }

    fn reset(&mut self) {
        MasterTimeline::reset(self)
    }

    fn duration(&self) -> f64 {
        MasterTimeline::duration(self)
    }

    fn current_time(&self) -> f64 {
        MasterTimeline::current_time(self)
    }

    fn is_playing(&self) -> bool {
        MasterTimeline::is_playing(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FadeIn, FadeOut};
    use crate::event::EventType;
    use crate::mobject::VMobject;
    use crate::RateFunction;
    use approx::assert_abs_diff_eq;

    fn fade_in(mobject: &MobjectRef, duration: f64) -> AnimationRef {
        FadeIn::new(mobject.clone())
            .with_duration(duration)
            .with_rate_function(RateFunction::Linear)
            .into_ref()
    }

    /// Segments of length 1, 2 and 1, each introducing its own square.
    fn three_slides() -> (Vec<MobjectRef>, MasterTimeline) {
        let squares: Vec<MobjectRef> = (0..3).map(|_| shared(VMobject::square(1.0))).collect();
        let mut master = MasterTimeline::new();
        for (square, duration) in squares.iter().zip([1.0, 2.0, 1.0]) {
            master.add_segment(vec![fade_in(square, duration)]);
        }
        (squares, master)
    }

    #[test]
    fn test_segments_are_contiguous() {
        let (squares, master) = three_slides();
        let starts: Vec<f64> = master.segments().iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![0.0, 1.0, 3.0]);
        assert_eq!(master.segment_count(), 3);
        assert_abs_diff_eq!(master.duration(), 4.0);
        assert_eq!(master.first_segment_of(squares[1].borrow().id()), Some(1));
    }

    #[test]
    fn test_first_appearance_is_first_write() {
        let square = shared(VMobject::square(1.0));
        let mut master = MasterTimeline::new();
        master.add_segment(vec![fade_in(&square, 1.0)]);
        master.add_segment(vec![FadeOut::new(square.clone()).into_ref()]);
        assert_eq!(master.first_segment_of(square.borrow().id()), Some(0));
    }

    #[test]
    fn test_wait_segment_records_nothing() {
        let mut master = MasterTimeline::new();
        let wait = master.add_wait_segment(2.0);
        assert!(wait.is_wait);
        assert!(wait.animations.is_empty());
        assert_abs_diff_eq!(wait.duration(), 2.0);
        assert!(master.first_segment.is_empty());
        assert_abs_diff_eq!(master.duration(), 2.0);
    }

    #[test]
    fn test_segment_at_time() {
        let (_, master) = three_slides();
        assert_eq!(master.segment_at_time(0.0).map(|s| s.index), Some(0));
        assert_eq!(master.segment_at_time(2.5).map(|s| s.index), Some(1));
        assert_eq!(master.segment_at_time(3.0).map(|s| s.index), Some(2));
        assert_eq!(master.segment_at_time(-1.0).map(|s| s.index), Some(0));
        assert!(MasterTimeline::new().segment_at_time(0.0).is_none());
    }

    #[test]
    fn test_navigation() {
        let (_, mut master) = three_slides();
        assert_eq!(master.next_segment().map(|s| s.index), Some(1));
        assert_abs_diff_eq!(master.current_time(), 1.0);

        master.seek(1.6);
        assert_eq!(master.prev_segment().map(|s| s.index), Some(1));
        assert_abs_diff_eq!(master.current_time(), 1.0);

        master.seek(1.2);
        assert_eq!(master.prev_segment().map(|s| s.index), Some(0));
        assert_abs_diff_eq!(master.current_time(), 0.0);

        assert_eq!(master.prev_segment().map(|s| s.index), Some(0));

        master.seek(3.5);
        assert!(master.next_segment().is_none());
        assert_abs_diff_eq!(master.current_time(), 3.5);
    }

    #[test]
    fn test_navigation_without_segments() {
        let mut master = MasterTimeline::new();
        assert!(master.next_segment().is_none());
        assert!(master.prev_segment().is_none());
        assert!(matches!(
            master.go_to_segment(0),
            Err(TimelineError::SegmentNotFound { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_future_mobjects_hidden_and_revealed() {
        let (squares, mut master) = three_slides();
        master.seek(0.5);
        assert_abs_diff_eq!(squares[0].borrow().opacity(), 0.5);
        assert_eq!(squares[1].borrow().opacity(), 0.0);
        assert_eq!(squares[2].borrow().opacity(), 0.0);
        assert!(master.is_hidden(squares[2].borrow().id()));

        master.seek(4.0);
        for square in &squares {
            assert_abs_diff_eq!(square.borrow().opacity(), 1.0);
        }
        assert!(master.hidden.is_empty());
    }

    #[test]
    fn test_hiding_can_be_disabled() {
        let square = shared(VMobject::square(1.0));
        let later = shared(VMobject::square(1.0));
        let mut master =
            MasterTimeline::with_config(TimelineConfig::default().with_hide_future_mobjects(false));
        master.add_segment(vec![fade_in(&square, 1.0)]);
        master.add_segment(vec![fade_in(&later, 1.0)]);
        master.seek(0.5);
        assert_eq!(later.borrow().opacity(), 1.0);
    }

    #[test]
    fn test_reset_pauses_at_start() {
        let (squares, mut master) = three_slides();
        master.play();
        master.update(2.0);
        master.reset();
        assert_eq!(master.current_time(), 0.0);
        assert!(!master.is_playing());
        assert_eq!(squares[1].borrow().opacity(), 0.0);
    }

    #[test]
    fn test_go_to_segment_emits_event() {
        let (_, mut master) = three_slides();
        master.drain_events();
        let segment = master.go_to_segment(2).map(|s| s.index);
        assert_eq!(segment, Ok(2));

        let events = master.drain_events();
        assert!(events
            .iter()
            .any(|e| e.event_type == EventType::SegmentEntered && e.segment == Some(2)));
    }
}
