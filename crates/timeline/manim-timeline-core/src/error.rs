//! Error types for the timeline core

use serde::{Deserialize, Serialize};

/// Errors surfaced by configuration, parsing and index-based timeline APIs.
///
/// Playback itself (`update`, `seek`, `reset`) never fails; these errors only
/// come from inputs the caller hands in by value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Invalid value
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Color string could not be parsed
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// Segment index out of range
    #[error("Segment {index} not found (timeline has {count} segments)")]
    SegmentNotFound { index: usize, count: usize },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic timeline error
    #[error("Timeline error: {message}")]
    Generic { message: String },
}

impl TimelineError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidTime { .. } | Self::SegmentNotFound { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTime { .. } | Self::InvalidValue { .. } | Self::InvalidColor { .. } => {
                "validation"
            }
            Self::SegmentNotFound { .. } => "navigation",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TimelineError::new("test error");
        assert!(matches!(error, TimelineError::Generic { .. }));
        assert_eq!(error.to_string(), "Timeline error: test error");
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = TimelineError::SegmentNotFound { index: 4, count: 2 };
        assert!(recoverable.is_recoverable());

        let non_recoverable = TimelineError::InvalidColor {
            value: "#zz".to_string(),
        };
        assert!(!non_recoverable.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TimelineError::InvalidTime { time: -1.0 }.category(),
            "validation"
        );
        assert_eq!(
            TimelineError::SegmentNotFound { index: 0, count: 0 }.category(),
            "navigation"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: TimelineError = err.into();
        assert_eq!(converted.category(), "serialization");
    }

    #[test]
    fn test_serialization() {
        let error = TimelineError::SegmentNotFound { index: 3, count: 1 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: TimelineError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
