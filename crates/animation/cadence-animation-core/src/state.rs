use std::fmt;

use serde::{Deserialize, Serialize};

/// Playback state of an animation controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    /// Not started yet, or stopped with no frame registered.
    #[default]
    Idle,
    Running,
    /// Time is frozen; frames keep reporting the frozen sample.
    Paused,
    /// Reached (or was forced to) the end of the timeline.
    Finished,
}

impl PlayState {
    /// Get the name of this play state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if the animation can be paused
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_serde() {
        for state in [
            PlayState::Idle,
            PlayState::Running,
            PlayState::Paused,
            PlayState::Finished,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.name()));
        }
    }

    #[test]
    fn only_running_can_pause() {
        assert!(PlayState::Running.can_pause());
        assert!(!PlayState::Idle.can_pause());
        assert!(!PlayState::Finished.can_pause());
    }
}
