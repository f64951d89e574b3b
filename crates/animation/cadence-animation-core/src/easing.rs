//! Easing descriptors and their resolution into numeric functions.
//!
//! A descriptor is data (serializable, comparable); an [`EasingFn`] is the
//! pure `[0,1] -> [0,1]` function the controller applies each frame. The
//! [`EasingResolver`] capability turns one into the other and runs exactly
//! once, when an animation is built.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Resolved easing function.
pub type EasingFn = Rc<dyn Fn(f64) -> f64>;

/// Keyword easings. Everything except `Linear` is a CSS cubic bezier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedEasing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl NamedEasing {
    /// Bezier control points `(x1, y1, x2, y2)`, or `None` for linear.
    pub fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => None,
            Self::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
        }
    }
}

/// Where a `steps` easing jumps within each step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPosition {
    Start,
    #[default]
    End,
}

/// A single easing descriptor.
///
/// JSON shapes: `"ease-in"`, `[0.42, 0, 0.58, 1]`, `{ "steps": 4, "position": "start" }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Easing {
    Named(NamedEasing),
    CubicBezier([f64; 4]),
    Steps {
        steps: u32,
        #[serde(default)]
        position: StepPosition,
    },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Named(NamedEasing::Ease)
    }
}

impl Easing {
    pub fn validate(&self) -> Result<(), AnimationError> {
        match self {
            Easing::Named(_) => Ok(()),
            Easing::CubicBezier(ctrl) => {
                if ctrl.iter().any(|c| !c.is_finite()) {
                    return Err(AnimationError::InvalidEasing {
                        reason: format!("cubic bezier has non-finite control point: {ctrl:?}"),
                    });
                }
                if !(0.0..=1.0).contains(&ctrl[0]) || !(0.0..=1.0).contains(&ctrl[2]) {
                    return Err(AnimationError::InvalidEasing {
                        reason: format!("cubic bezier x control points must be in [0, 1]: {ctrl:?}"),
                    });
                }
                Ok(())
            }
            Easing::Steps { steps, .. } => {
                if *steps == 0 {
                    return Err(AnimationError::InvalidEasing {
                        reason: "steps easing needs at least one step".into(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Output of an [`EasingGenerator`]: a concrete easing, plus optional
/// replacement keyframes and duration (seconds).
#[derive(Clone, Debug)]
pub struct GeneratedAnimation {
    pub easing: EasingSpec,
    pub keyframes: Option<Vec<f64>>,
    pub duration: Option<f64>,
}

/// Easing that derives its curve from the keyframes it animates (springs,
/// glides, ...). Consulted once when the animation is built, never mid-flight.
pub trait EasingGenerator: fmt::Debug {
    fn create_animation(&self, keyframes: &[f64]) -> GeneratedAnimation;
}

/// Easing as supplied in an animation config.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EasingSpec {
    /// One easing over the whole iteration.
    Single(Easing),
    /// One easing per keyframe segment; segment `i` uses entry `i % len`.
    Segments(Vec<Easing>),
    #[serde(skip)]
    Generator(Rc<dyn EasingGenerator>),
}

impl Default for EasingSpec {
    fn default() -> Self {
        EasingSpec::Single(Easing::default())
    }
}

impl From<Easing> for EasingSpec {
    fn from(easing: Easing) -> Self {
        EasingSpec::Single(easing)
    }
}

impl From<NamedEasing> for EasingSpec {
    fn from(named: NamedEasing) -> Self {
        EasingSpec::Single(Easing::Named(named))
    }
}

impl EasingSpec {
    pub fn validate(&self) -> Result<(), AnimationError> {
        match self {
            EasingSpec::Single(easing) => easing.validate(),
            EasingSpec::Segments(list) => {
                if list.is_empty() {
                    return Err(AnimationError::InvalidEasing {
                        reason: "segment easing list is empty".into(),
                    });
                }
                list.iter().try_for_each(Easing::validate)
            }
            EasingSpec::Generator(_) => Ok(()),
        }
    }

    /// Resolve into the timeline easing and the optional per-segment list.
    ///
    /// Generators must already have been expanded; an unexpanded generator
    /// is reported as an invalid easing.
    pub fn resolve(&self, resolver: &dyn EasingResolver) -> Result<ResolvedEasing, AnimationError> {
        self.validate()?;
        match self {
            EasingSpec::Single(easing) => Ok(ResolvedEasing {
                timeline: resolver.resolve(easing),
                segments: None,
            }),
            EasingSpec::Segments(list) => Ok(ResolvedEasing {
                timeline: linear(),
                segments: Some(list.iter().map(|e| resolver.resolve(e)).collect()),
            }),
            EasingSpec::Generator(_) => Err(AnimationError::InvalidEasing {
                reason: "easing generator was not expanded before resolution".into(),
            }),
        }
    }
}

/// Easing after resolution.
#[derive(Clone)]
pub struct ResolvedEasing {
    /// Applied to the sampled iteration position before interpolation.
    pub timeline: EasingFn,
    /// Applied inside each keyframe segment by the interpolator.
    pub segments: Option<Vec<EasingFn>>,
}

impl fmt::Debug for ResolvedEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedEasing")
            .field("segments", &self.segments.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

/// Maps an easing descriptor to a pure function.
pub trait EasingResolver {
    fn resolve(&self, easing: &Easing) -> EasingFn;
}

/// Built-in resolver: keywords, cubic beziers and steps.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardEasing;

impl EasingResolver for StandardEasing {
    fn resolve(&self, easing: &Easing) -> EasingFn {
        match *easing {
            Easing::Named(named) => match named.control_points() {
                Some(ctrl) => cubic_bezier(ctrl),
                None => linear(),
            },
            Easing::CubicBezier(ctrl) => cubic_bezier(ctrl),
            Easing::Steps { steps, position } => Rc::new(move |p| steps_ease(p, steps, position)),
        }
    }
}

pub fn linear() -> EasingFn {
    Rc::new(|p| p)
}

/// Cubic bezier easing with fixed endpoints (0,0) and (1,1).
pub fn cubic_bezier(ctrl: [f64; 4]) -> EasingFn {
    let [x1, y1, x2, y2] = ctrl;
    // Bezier(0,0,1,1) is exactly linear
    if x1 == y1 && x2 == y2 {
        return linear();
    }
    Rc::new(move |t| bezier_ease_t(t, x1, y1, x2, y2))
}

/// Cubic Bezier basis function
#[inline]
fn bezier_basis(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Invert the x curve by bisection, then evaluate y at the found parameter.
#[inline]
fn bezier_ease_t(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // x is monotonic for x1/x2 in [0,1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..48 {
        let x = bezier_basis(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    bezier_basis(0.0, y1, y2, 1.0, mid)
}

fn steps_ease(progress: f64, steps: u32, position: StepPosition) -> f64 {
    let steps = f64::from(steps);
    let rounded = match position {
        StepPosition::End => (progress.min(0.999) * steps).floor(),
        StepPosition::Start => (progress.max(0.001) * steps).ceil(),
    };
    (rounded / steps).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn named_easings_hit_endpoints() {
        for named in [
            NamedEasing::Linear,
            NamedEasing::Ease,
            NamedEasing::EaseIn,
            NamedEasing::EaseOut,
            NamedEasing::EaseInOut,
        ] {
            let f = StandardEasing.resolve(&Easing::Named(named));
            assert_abs_diff_eq!(f(0.0), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(f(1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_about_midpoint() {
        let f = StandardEasing.resolve(&Easing::Named(NamedEasing::EaseInOut));
        assert_abs_diff_eq!(f(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(f(0.25) + f(0.75), 1.0, epsilon = 1e-6);
        // slow start
        assert!(f(0.1) < 0.1);
    }

    #[test]
    fn steps_end_and_start() {
        let end = StandardEasing.resolve(&Easing::Steps {
            steps: 4,
            position: StepPosition::End,
        });
        assert_eq!(end(0.0), 0.0);
        assert_eq!(end(0.3), 0.25);
        assert_eq!(end(1.0), 0.75);

        let start = StandardEasing.resolve(&Easing::Steps {
            steps: 4,
            position: StepPosition::Start,
        });
        assert_eq!(start(0.0), 0.25);
        assert_eq!(start(0.3), 0.5);
        assert_eq!(start(1.0), 1.0);
    }

    #[test]
    fn descriptors_parse_from_json() {
        let spec: EasingSpec = serde_json::from_str(r#""ease-out""#).unwrap();
        assert!(matches!(
            spec,
            EasingSpec::Single(Easing::Named(NamedEasing::EaseOut))
        ));

        let spec: EasingSpec = serde_json::from_str("[0.1, 0.2, 0.3, 0.4]").unwrap();
        assert!(matches!(spec, EasingSpec::Single(Easing::CubicBezier(_))));

        let spec: EasingSpec = serde_json::from_str(r#"["linear", {"steps": 3}]"#).unwrap();
        match spec {
            EasingSpec::Segments(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(
                    list[1],
                    Easing::Steps {
                        steps: 3,
                        position: StepPosition::End
                    }
                );
            }
            other => panic!("expected segments, got {other:?}"),
        }
    }

    #[test]
    fn invalid_descriptors_are_rejected() {
        assert!(Easing::Steps {
            steps: 0,
            position: StepPosition::End
        }
        .validate()
        .is_err());
        assert!(Easing::CubicBezier([1.5, 0.0, 0.5, 1.0]).validate().is_err());
        assert!(EasingSpec::Segments(vec![]).validate().is_err());
    }

    #[test]
    fn segments_resolve_with_linear_timeline() {
        let spec = EasingSpec::Segments(vec![Easing::Named(NamedEasing::EaseIn)]);
        let resolved = spec.resolve(&StandardEasing).unwrap();
        assert_eq!((resolved.timeline)(0.3), 0.3);
        assert_eq!(resolved.segments.map(|s| s.len()), Some(1));
    }
}
