//! Animation controller: clock + play state + progress + completion.
//!
//! Per frame: read elapsed time from the clock, turn it into a timeline
//! position, ease and interpolate it, deliver the value, then either settle
//! completion or register for the next frame. All controls are synchronous
//! and take effect before the next frame observes the state.

use std::fmt;

use crate::clock::Clock;
use crate::completion::{Completion, Finished};
use crate::config::{AnimationConfig, Timing};
use crate::easing::{EasingFn, EasingResolver, StandardEasing};
use crate::error::AnimationError;
use crate::ids::FrameRequestId;
use crate::interp::KeyframeInterpolator;
use crate::outputs::OutputSink;
use crate::progress;
use crate::scheduler::FrameScheduler;
use crate::state::PlayState;

/// One running animation of a numeric value.
///
/// Holds at most one outstanding frame registration and releases it on
/// every exit path (stop, cancel, finish, natural completion).
pub struct Animation<S: FrameScheduler, O: OutputSink> {
    scheduler: S,
    output: O,
    timing: Timing,
    easing: EasingFn,
    interpolator: KeyframeInterpolator,
    clock: Clock,
    play_state: PlayState,
    frame_request: Option<FrameRequestId>,
    finished: Finished<f64>,
}

impl<S: FrameScheduler, O: OutputSink> Animation<S, O> {
    /// Build an animation with the built-in easing resolver and start
    /// playing it.
    pub fn new(config: AnimationConfig, scheduler: S, output: O) -> Result<Self, AnimationError> {
        Self::with_resolver(config, &StandardEasing, scheduler, output)
    }

    /// Build an animation resolving easing through `resolver`, and start
    /// playing it.
    pub fn with_resolver(
        config: AnimationConfig,
        resolver: &dyn EasingResolver,
        scheduler: S,
        output: O,
    ) -> Result<Self, AnimationError> {
        let config = config.expand_generator()?;
        config.validate()?;

        let easing = config.easing.resolve(resolver)?;
        let interpolator = KeyframeInterpolator::new(
            config.keyframes.clone(),
            config.offset.clone(),
            easing.segments,
        )?;
        let timing = config.timing();

        log::debug!(
            "animation created: {} keyframes, duration {}s x{} ({:?}), delay {}s, end delay {}s",
            interpolator.keyframes().len(),
            timing.duration,
            timing.repeat + 1,
            timing.direction,
            timing.delay,
            timing.end_delay
        );

        let mut animation = Self {
            scheduler,
            output,
            timing,
            easing: easing.timeline,
            interpolator,
            clock: Clock::new(),
            play_state: PlayState::Idle,
            frame_request: None,
            finished: Finished::new(),
        };
        animation.play();
        Ok(animation)
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// Start, or resume from a pause without a jump in elapsed time.
    pub fn play(&mut self) {
        let now = self.scheduler.now();
        let previous = self.play_state;
        self.clock.start(now);
        self.play_state = PlayState::Running;
        self.request_frame();
        log::debug!(
            "play ({previous} -> running) at {now} ms, origin {:?}",
            self.clock.start_time()
        );
    }

    /// Freeze time. Frames keep firing and keep reporting the frozen sample.
    pub fn pause(&mut self) {
        if !self.play_state.can_pause() {
            log::debug!("pause ignored while {}", self.play_state);
            return;
        }
        let now = self.scheduler.now();
        self.clock.freeze(now);
        self.play_state = PlayState::Paused;
        log::debug!("pause at {now} ms (elapsed {:?} ms)", self.clock.pause_time());
    }

    /// Jump to the end of the timeline, deliver the end value and settle
    /// completion with it.
    pub fn finish(&mut self) {
        log::debug!("finish requested while {}", self.play_state);
        self.release_frame();
        let now = self.scheduler.now();
        self.clock.thaw(now);
        self.play_state = PlayState::Finished;
        self.step(now);
    }

    /// Stop without moving time. Completion fails with `Stopped` if it has
    /// not settled yet.
    pub fn stop(&mut self) {
        let previous = self.play_state;
        self.play_state = PlayState::Idle;
        self.release_frame();
        self.finished.reject();
        log::debug!("stop ({previous} -> idle)");
    }

    /// Stop and rewind: deliver the sample at elapsed time zero, however the
    /// clock was seeked, reversed or rescaled.
    pub fn cancel(&mut self) {
        self.stop();
        let now = self.scheduler.now();
        self.clock.thaw(now);
        let origin = self.clock.rewind();
        log::debug!("cancel: rewinding to {origin} ms");
        self.tick(origin);
    }

    /// Flip the playback direction; elapsed time is continuous at the call.
    pub fn reverse(&mut self) {
        let now = self.scheduler.now();
        self.clock.reverse(now);
        log::debug!("reverse: rate now {}", self.clock.rate());
    }

    // ------------------------------------------------------------------
    // Time & rate
    // ------------------------------------------------------------------

    /// Raw elapsed time (ms) computed by the last frame.
    #[inline]
    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    /// Seek to `time_ms` of raw elapsed time. Takes effect on the next frame.
    pub fn set_current_time(&mut self, time_ms: f64) -> Result<(), AnimationError> {
        if !time_ms.is_finite() {
            return Err(AnimationError::InvalidTime { time: time_ms });
        }
        let now = self.scheduler.now();
        self.clock.seek(now, time_ms);
        log::debug!("seek to {time_ms} ms");
        Ok(())
    }

    #[inline]
    pub fn playback_rate(&self) -> f64 {
        self.clock.rate()
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> Result<(), AnimationError> {
        if !rate.is_finite() {
            return Err(AnimationError::InvalidRate { rate });
        }
        let now = self.scheduler.now();
        self.clock.set_rate(now, rate);
        log::debug!("playback rate set to {rate}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    #[inline]
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    #[inline]
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Snapshot of the completion outcome.
    pub fn completion(&self) -> Completion<f64> {
        self.finished.outcome()
    }

    /// Awaitable completion: `Ok(final value)` or `Err(Stopped)`.
    pub fn finished(&self) -> Finished<f64> {
        self.finished.clone()
    }

    /// The registration the controller is waiting on, if any.
    #[inline]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.frame_request
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn output(&self) -> &O {
        &self.output
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Host entry point: registration `request` fired at `timestamp` (ms).
    ///
    /// Returns false, doing nothing, when `request` is not the outstanding
    /// registration (already fired, or withdrawn by stop/cancel/finish).
    pub fn on_frame(&mut self, request: FrameRequestId, timestamp: f64) -> bool {
        if self.frame_request != Some(request) {
            log::trace!("ignoring stale {request} at {timestamp} ms");
            return false;
        }
        self.frame_request = None;
        self.step(timestamp);
        true
    }

    fn step(&mut self, timestamp: f64) {
        let raw = self.clock.sample(timestamp);
        self.tick(raw);
    }

    /// One complete tick from raw elapsed time: sample, deliver, then settle
    /// or re-register.
    fn tick(&mut self, raw: f64) {
        let mut elapsed = progress::active_seconds(&self.timing, raw);

        let frozen = self.clock.is_frozen();
        if self.play_state == PlayState::Finished && !frozen {
            elapsed = self.timing.total_duration();
        }

        let sample = progress::sample(&self.timing, elapsed);
        let latest = self.interpolator.sample((self.easing)(sample.position));
        self.output.write(latest);
        log::trace!(
            "frame at raw {raw} ms: elapsed {elapsed}s, iteration {}, position {} -> {latest}",
            sample.iteration,
            sample.position
        );

        // Idle only samples here for a cancel rewind; it never completes.
        let done = !frozen
            && self.play_state != PlayState::Idle
            && (self.play_state == PlayState::Finished
                || progress::is_past_end(&self.timing, elapsed));

        if done {
            if self.play_state != PlayState::Finished {
                log::debug!("animation finished at {elapsed}s with value {latest}");
            }
            self.play_state = PlayState::Finished;
            self.finished.resolve(latest);
        } else if self.play_state != PlayState::Idle {
            self.request_frame();
        }
    }

    fn request_frame(&mut self) {
        if self.frame_request.is_none() {
            self.frame_request = Some(self.scheduler.request_frame());
        }
    }

    fn release_frame(&mut self) {
        if let Some(id) = self.frame_request.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

impl<S: FrameScheduler, O: OutputSink> fmt::Debug for Animation<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("timing", &self.timing)
            .field("interpolator", &self.interpolator)
            .field("clock", &self.clock)
            .field("play_state", &self.play_state)
            .field("frame_request", &self.frame_request)
            .field("completion", &self.finished.outcome())
            .finish_non_exhaustive()
    }
}
