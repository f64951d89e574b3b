//! Keyframe interpolation.
//!
//! Maps a timeline position in [0,1] to an output value: find the keyframe
//! segment containing the position (by offset), apply that segment's easing,
//! then blend the two neighbouring keyframes.

pub mod functions;

use std::fmt;

use crate::easing::EasingFn;
use crate::error::AnimationError;
use functions::{mix, progress, wrap};

/// Evenly spaced offsets: `i / (count - 1)`.
pub fn default_offsets(count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![0.0; count];
    }
    let last = (count - 1) as f64;
    (0..count).map(|i| i as f64 / last).collect()
}

/// Offsets must match the keyframe count, lie in [0,1] and never decrease.
pub fn validate_offsets(offsets: &[f64], keyframes: usize) -> Result<(), AnimationError> {
    if offsets.len() != keyframes {
        return Err(AnimationError::OffsetLengthMismatch {
            keyframes,
            offsets: offsets.len(),
        });
    }
    let mut prev = 0.0;
    for (index, &value) in offsets.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) || value < prev {
            return Err(AnimationError::InvalidOffset { index, value });
        }
        prev = value;
    }
    Ok(())
}

/// Pure, immutable sampler over a keyframe sequence.
#[derive(Clone)]
pub struct KeyframeInterpolator {
    keyframes: Vec<f64>,
    offsets: Vec<f64>,
    segment_easing: Option<Vec<EasingFn>>,
}

impl KeyframeInterpolator {
    pub fn new(
        keyframes: Vec<f64>,
        offsets: Option<Vec<f64>>,
        segment_easing: Option<Vec<EasingFn>>,
    ) -> Result<Self, AnimationError> {
        if keyframes.len() < 2 {
            return Err(AnimationError::TooFewKeyframes {
                count: keyframes.len(),
            });
        }
        let offsets = match offsets {
            Some(offsets) => {
                validate_offsets(&offsets, keyframes.len())?;
                offsets
            }
            None => default_offsets(keyframes.len()),
        };
        if matches!(&segment_easing, Some(list) if list.is_empty()) {
            return Err(AnimationError::InvalidEasing {
                reason: "segment easing list is empty".into(),
            });
        }
        Ok(Self {
            keyframes,
            offsets,
            segment_easing,
        })
    }

    #[inline]
    pub fn keyframes(&self) -> &[f64] {
        &self.keyframes
    }

    #[inline]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Sample the keyframes at timeline position `t`.
    pub fn sample(&self, t: f64) -> f64 {
        let last_segment = self.keyframes.len() - 2;
        let mut i = 0;
        while i < last_segment && t >= self.offsets[i + 1] {
            i += 1;
        }

        let mut local = progress(self.offsets[i], self.offsets[i + 1], t).clamp(0.0, 1.0);
        if let Some(list) = &self.segment_easing {
            local = (list[wrap(list.len(), i)])(local);
        }
        mix(self.keyframes[i], self.keyframes[i + 1], local)
    }
}

impl fmt::Debug for KeyframeInterpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeInterpolator")
            .field("keyframes", &self.keyframes)
            .field("offsets", &self.offsets)
            .field(
                "segment_easing",
                &self.segment_easing.as_ref().map(Vec::len),
            )
            .finish()
    }
}
