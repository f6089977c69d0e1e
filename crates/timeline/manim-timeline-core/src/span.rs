//! Time spans on a timeline, in seconds.

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` of timeline seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl TimeSpan {
    /// Create a span; `end` is raised to `start` if it would precede it.
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[inline]
    pub fn from_start(start: f64, duration: f64) -> Self {
        Self::new(start, start + duration.max(0.0))
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check if `time` falls within `[start, end)`
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    /// `true` once `time` has reached the start of the span.
    #[inline]
    pub fn has_started(&self, time: f64) -> bool {
        time >= self.start
    }

    /// Normalize a time within this span to [0, 1]
    #[inline]
    pub fn normalize_time(&self, time: f64) -> f64 {
        let duration = self.duration();
        if duration <= 0.0 {
            return if time >= self.start { 1.0 } else { 0.0 };
        }
        ((time - self.start) / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_is_half_open() {
        let span = TimeSpan::new(1.0, 3.0);
        assert_eq!(span.duration(), 2.0);
        assert!(span.contains(1.0));
        assert!(span.contains(2.5));
        assert!(!span.contains(3.0));
        assert!(!span.contains(0.5));
    }

    #[test]
    fn test_normalize_time() {
        let span = TimeSpan::from_start(2.0, 4.0);
        assert_eq!(span.normalize_time(4.0), 0.5);
        assert_eq!(span.normalize_time(0.0), 0.0);
        assert_eq!(span.normalize_time(10.0), 1.0);
    }

    #[test]
    fn test_degenerate_span() {
        let span = TimeSpan::new(2.0, 1.0);
        assert_eq!(span.end, 2.0);
        assert_eq!(span.normalize_time(2.0), 1.0);
        assert_eq!(span.normalize_time(1.9), 0.0);
        assert!(span.has_started(2.0));
    }
}
