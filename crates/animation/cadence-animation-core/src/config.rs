//! Animation configuration and the resolved timing model.

use serde::{Deserialize, Serialize};

use crate::easing::EasingSpec;
use crate::error::AnimationError;
use crate::interp::validate_offsets;

/// Playback direction per iteration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
    /// Even iterations forward, odd iterations backward.
    Alternate,
    /// Even iterations backward, odd iterations forward.
    AlternateReverse,
}

impl Direction {
    /// Whether iteration `iteration` plays backwards.
    #[inline]
    pub fn is_reversed(self, iteration: i64) -> bool {
        let odd = iteration.rem_euclid(2) == 1;
        match self {
            Direction::Normal => false,
            Direction::Reverse => true,
            Direction::Alternate => odd,
            Direction::AlternateReverse => !odd,
        }
    }
}

/// Immutable description of one animation. Times are in seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    pub keyframes: Vec<f64>,
    pub easing: EasingSpec,
    pub duration: f64,
    pub delay: f64,
    pub end_delay: f64,
    /// Additional iterations after the first.
    pub repeat: u32,
    pub direction: Direction,
    /// Position of each keyframe within an iteration; evenly spaced when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vec<f64>>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            keyframes: vec![0.0, 1.0],
            easing: EasingSpec::default(),
            duration: 0.3,
            delay: 0.0,
            end_delay: 0.0,
            repeat: 0,
            direction: Direction::Normal,
            offset: None,
        }
    }
}

impl AnimationConfig {
    /// Config with the given keyframes and defaults for everything else.
    pub fn from_keyframes(keyframes: impl Into<Vec<f64>>) -> Self {
        Self {
            keyframes: keyframes.into(),
            ..Self::default()
        }
    }

    /// Check every constraint the controller relies on.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AnimationError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(AnimationError::InvalidDelay { delay: self.delay });
        }
        if !self.end_delay.is_finite() || self.end_delay < 0.0 {
            return Err(AnimationError::InvalidEndDelay {
                end_delay: self.end_delay,
            });
        }
        if self.keyframes.len() < 2 {
            return Err(AnimationError::TooFewKeyframes {
                count: self.keyframes.len(),
            });
        }
        if let Some((index, &value)) = self
            .keyframes
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(AnimationError::InvalidKeyframe { index, value });
        }
        if let Some(offsets) = &self.offset {
            validate_offsets(offsets, self.keyframes.len())?;
        }
        self.easing.validate()
    }

    /// Replace a generator easing with what it generates. Other easings are
    /// returned unchanged.
    pub fn expand_generator(mut self) -> Result<Self, AnimationError> {
        if let EasingSpec::Generator(generator) = &self.easing {
            let generated = generator.create_animation(&self.keyframes);
            if matches!(generated.easing, EasingSpec::Generator(_)) {
                return Err(AnimationError::InvalidEasing {
                    reason: "easing generator produced another generator".into(),
                });
            }
            log::debug!(
                "easing generator expanded (keyframes overridden: {}, duration overridden: {})",
                generated.keyframes.is_some(),
                generated.duration.is_some()
            );
            self.easing = generated.easing;
            if let Some(keyframes) = generated.keyframes {
                self.keyframes = keyframes;
            }
            if let Some(duration) = generated.duration {
                self.duration = duration;
            }
        }
        Ok(self)
    }

    pub fn timing(&self) -> Timing {
        Timing {
            duration: self.duration,
            delay: self.delay,
            end_delay: self.end_delay,
            repeat: self.repeat,
            direction: self.direction,
        }
    }
}

/// The timing subset of a validated config, in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub duration: f64,
    pub delay: f64,
    pub end_delay: f64,
    pub repeat: u32,
    pub direction: Direction,
}

impl Timing {
    /// Active duration across all iterations: `duration * (repeat + 1)`.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.duration * (f64::from(self.repeat) + 1.0)
    }

    /// Point (after the delay) at which the animation completes.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.total_duration() + self.end_delay
    }
}
