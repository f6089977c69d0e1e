//! Configuration for timelines and speed remapping

use crate::TimelineError;
use serde::{Deserialize, Serialize};

/// Number of integration intervals used by [`ChangeSpeed`](crate::ChangeSpeed).
pub const DEFAULT_SPEED_SAMPLES: usize = 200;
/// Floor applied to speed multipliers before they are inverted.
pub const DEFAULT_SPEED_EPSILON: f64 = 0.001;
/// How far into a segment `prev_segment` rewinds to that segment's own start.
pub const DEFAULT_REWIND_THRESHOLD: f64 = 0.5;

/// Configuration shared by [`Timeline`](crate::Timeline) and
/// [`MasterTimeline`](crate::MasterTimeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Trapezoid intervals for speed-curve integration and inversion
    pub speed_samples: usize,
    /// Minimum speed multiplier considered during integration
    pub speed_epsilon: f64,
    /// Seconds into a segment after which `prev_segment` rewinds to its start
    pub rewind_threshold: f64,
    /// Clamp seek targets into `[0, duration]`
    pub clamp_seek: bool,
    /// Force not-yet-introduced mobjects to zero opacity after a seek
    pub hide_future_mobjects: bool,
    /// Whether timelines queue [`TimelineEvent`](crate::TimelineEvent)s
    pub enable_events: bool,
    /// Maximum queued events before the oldest are dropped
    pub max_queued_events: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            speed_samples: DEFAULT_SPEED_SAMPLES,
            speed_epsilon: DEFAULT_SPEED_EPSILON,
            rewind_threshold: DEFAULT_REWIND_THRESHOLD,
            clamp_seek: true,
            hide_future_mobjects: true,
            enable_events: true,
            max_queued_events: 1024,
        }
    }
}

impl TimelineConfig {
    /// Slide-deck playback: events on, generous rewind window.
    pub fn presentation() -> Self {
        Self {
            rewind_threshold: 1.0,
            ..Self::default()
        }
    }

    /// Scrubbing preview in an editor: coarser speed tables, no events.
    pub fn preview() -> Self {
        Self {
            speed_samples: 64,
            enable_events: false,
            max_queued_events: 0,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.speed_samples == 0 {
            return Err(TimelineError::InvalidValue {
                reason: "Speed samples must be greater than 0".to_string(),
            });
        }

        if self.speed_epsilon <= 0.0 || !self.speed_epsilon.is_finite() {
            return Err(TimelineError::InvalidValue {
                reason: "Speed epsilon must be positive and finite".to_string(),
            });
        }

        if self.rewind_threshold < 0.0 || !self.rewind_threshold.is_finite() {
            return Err(TimelineError::InvalidValue {
                reason: "Rewind threshold must be non-negative and finite".to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn with_speed_samples(mut self, samples: usize) -> Self {
        self.speed_samples = samples;
        self
    }

    #[inline]
    pub fn with_speed_epsilon(mut self, epsilon: f64) -> Self {
        self.speed_epsilon = epsilon;
        self
    }

    #[inline]
    pub fn with_rewind_threshold(mut self, seconds: f64) -> Self {
        self.rewind_threshold = seconds;
        self
    }

    #[inline]
    pub fn with_clamp_seek(mut self, enabled: bool) -> Self {
        self.clamp_seek = enabled;
        self
    }

    #[inline]
    pub fn with_hide_future_mobjects(mut self, enabled: bool) -> Self {
        self.hide_future_mobjects = enabled;
        self
    }

    /// Enable or disable events
    #[inline]
    pub fn with_events(mut self, enabled: bool) -> Self {
        self.enable_events = enabled;
        self
    }

    #[inline]
    pub fn with_max_queued_events(mut self, max: usize) -> Self {
        self.max_queued_events = max;
        self
    }
}
