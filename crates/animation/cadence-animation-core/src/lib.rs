//! Cadence Animation Core
//!
//! Frame-driven controller for keyframe animations of a numeric value. Given
//! keyframes, easing and timing (duration, delay, end delay, repeat,
//! direction), an [`Animation`] turns host frame timestamps into output
//! values and exposes play/pause/finish/stop/cancel/reverse/seek controls
//! plus a single-settlement completion future.
//!
//! The host supplies a [`FrameScheduler`] (time + frame registrations) and an
//! [`OutputSink`]; [`ManualScheduler`] is a virtual clock for deterministic
//! driving.

pub mod animation;
pub mod clock;
pub mod completion;
pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod progress;
pub mod scheduler;
pub mod state;
pub mod stored_config;

// Re-exports for consumers (hosts)
pub use animation::Animation;
pub use clock::Clock;
pub use completion::{Completion, Finished};
pub use config::{AnimationConfig, Direction, Timing};
pub use easing::{
    Easing, EasingFn, EasingGenerator, EasingResolver, EasingSpec, GeneratedAnimation,
    NamedEasing, StandardEasing, StepPosition,
};
pub use error::{AnimationError, Stopped};
pub use ids::FrameRequestId;
pub use interp::KeyframeInterpolator;
pub use outputs::{OutputSink, SampleLog};
pub use progress::IterationSample;
pub use scheduler::{run_blocking, FrameScheduler, ManualScheduler, SystemScheduler};
pub use state::PlayState;
pub use stored_config::{animation_config_to_json, parse_animation_config_json};

/// Animation result type
pub type Result<T> = core::result::Result<T, AnimationError>;
