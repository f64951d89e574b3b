//! Error types for the animation controller.

use serde::{Deserialize, Serialize};

/// Errors raised while building an animation or driving its controls.
///
/// Configuration problems are reported at construction; nothing in the
/// per-frame path returns an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Duration must be finite and strictly positive.
    #[error("Invalid duration: {duration} (must be finite and > 0)")]
    InvalidDuration { duration: f64 },

    #[error("Invalid delay: {delay} (must be finite and >= 0)")]
    InvalidDelay { delay: f64 },

    #[error("Invalid end delay: {end_delay} (must be finite and >= 0)")]
    InvalidEndDelay { end_delay: f64 },

    /// Interpolation needs at least a start and an end value.
    #[error("Expected at least 2 keyframes, got {count}")]
    TooFewKeyframes { count: usize },

    #[error("Keyframe {index} is not finite: {value}")]
    InvalidKeyframe { index: usize, value: f64 },

    #[error("Offset count {offsets} does not match keyframe count {keyframes}")]
    OffsetLengthMismatch { keyframes: usize, offsets: usize },

    /// Offsets must lie in [0, 1] and never decrease.
    #[error("Invalid offset at index {index}: {value}")]
    InvalidOffset { index: usize, value: f64 },

    #[error("Invalid easing: {reason}")]
    InvalidEasing { reason: String },

    /// Seek target was NaN or infinite.
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    #[error("Invalid playback rate: {rate}")]
    InvalidRate { rate: f64 },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimationError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. }
            | Self::InvalidDelay { .. }
            | Self::InvalidEndDelay { .. }
            | Self::TooFewKeyframes { .. }
            | Self::InvalidKeyframe { .. }
            | Self::OffsetLengthMismatch { .. }
            | Self::InvalidOffset { .. }
            | Self::InvalidEasing { .. } => "config",
            Self::InvalidTime { .. } | Self::InvalidRate { .. } => "control",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Failure signal of the completion future: the animation was stopped or
/// cancelled before it reached its natural end.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("animation stopped before completion")]
pub struct Stopped;
