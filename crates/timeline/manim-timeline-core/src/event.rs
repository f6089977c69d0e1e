//! Event queue for timeline playback notifications

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Types of timeline events
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventType {
    /// Playback started or resumed
    PlaybackStarted,
    /// Playback paused
    PlaybackPaused,
    /// The clock reached the end of the timeline
    PlaybackEnded,
    /// The timeline was seeked to a new time
    Seeked,
    /// The current segment changed
    SegmentEntered,
    /// The timeline was reset to its initial state
    Reset,
}

impl EventType {
    /// Get the name of this event type
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlaybackStarted => "playback_started",
            Self::PlaybackPaused => "playback_paused",
            Self::PlaybackEnded => "playback_ended",
            Self::Seeked => "seeked",
            Self::SegmentEntered => "segment_entered",
            Self::Reset => "reset",
        }
    }

    /// Check if this is a playback-related event
    #[inline]
    pub fn is_playback_event(&self) -> bool {
        matches!(
            self,
            Self::PlaybackStarted | Self::PlaybackPaused | Self::PlaybackEnded
        )
    }
}

/// Timeline event with associated data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Type of event
    pub event_type: EventType,
    /// Timeline time (seconds) when the event occurred
    pub time: f64,
    /// Segment index the event relates to, if any
    pub segment: Option<usize>,
}

impl TimelineEvent {
    pub fn new(event_type: EventType, time: f64) -> Self {
        Self {
            event_type,
            time,
            segment: None,
        }
    }

    #[inline]
    pub fn with_segment(mut self, index: usize) -> Self {
        self.segment = Some(index);
        self
    }

    #[inline]
    pub fn seeked(time: f64) -> Self {
        Self::new(EventType::Seeked, time)
    }

    #[inline]
    pub fn segment_entered(index: usize, time: f64) -> Self {
        Self::new(EventType::SegmentEntered, time).with_segment(index)
    }
}

/// Bounded FIFO of events; once full, the oldest event is dropped.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<TimelineEvent>,
    max_len: usize,
    enabled: bool,
}

impl EventQueue {
    pub fn new(max_len: usize, enabled: bool) -> Self {
        Self {
            events: VecDeque::new(),
            max_len,
            enabled,
        }
    }

    /// Queue an event. No-op while disabled or when the capacity is zero.
    pub fn push(&mut self, event: TimelineEvent) {
        if !self.enabled || self.max_len == 0 {
            return;
        }
        if self.events.len() == self.max_len {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<TimelineEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.events.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(EventType::SegmentEntered.name(), "segment_entered");
        assert!(EventType::PlaybackEnded.is_playback_event());
        assert!(!EventType::Seeked.is_playback_event());
    }

    #[test]
    fn test_queue_drops_oldest() {
        let mut queue = EventQueue::new(2, true);
        queue.push(TimelineEvent::seeked(0.0));
        queue.push(TimelineEvent::seeked(1.0));
        queue.push(TimelineEvent::seeked(2.0));

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time, 1.0);
        assert_eq!(events[1].time, 2.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_disabled_queue() {
        let mut queue = EventQueue::new(8, false);
        queue.push(TimelineEvent::segment_entered(1, 2.0));
        assert!(queue.is_empty());

        queue.set_enabled(true);
        queue.push(TimelineEvent::segment_entered(1, 2.0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain()[0].segment, Some(1));
    }
}
