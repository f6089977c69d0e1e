use serde::{Deserialize, Serialize};

/// Playback state of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not playing, clock at the start
    #[default]
    Stopped,
    /// Clock advances on `update`
    Playing,
    /// Clock held; `play` resumes from the current time
    Paused,
    /// Clock reached the end of the timeline
    Ended,
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if playback can be (re)started
    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused | Self::Stopped | Self::Ended)
    }

    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl From<&str> for PlaybackState {
    fn from(s: &str) -> Self {
        match s {
            "stopped" => Self::Stopped,
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "ended" => Self::Ended,
            _ => Self::Stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(PlaybackState::Ended.can_resume());
        assert!(!PlaybackState::Playing.can_resume());
        assert!(PlaybackState::Playing.can_pause());
        assert!(!PlaybackState::Paused.is_playing());
    }

    #[test]
    fn test_names_round_trip() {
        for state in [
            PlaybackState::Stopped,
            PlaybackState::Playing,
            PlaybackState::Paused,
            PlaybackState::Ended,
        ] {
            assert_eq!(PlaybackState::from(state.name()), state);
        }
        assert_eq!(PlaybackState::from("bogus"), PlaybackState::Stopped);
    }
}
