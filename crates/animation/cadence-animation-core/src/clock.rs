//! The animation clock.
//!
//! Elapsed time is always derived from an adjustable origin,
//!
//! ```text
//! elapsed_ms = (now - start_time) * rate
//! ```
//!
//! and never accumulated frame by frame. Pause, resume, seek and rate
//! changes all work by moving `start_time` (or holding elapsed time), so
//! they compose without special cases.

use serde::Serialize;

/// Clock state owned by one animation. Timestamps and elapsed values are in
/// milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Clock {
    start_time: Option<f64>,
    /// Frozen elapsed time while paused.
    pause_time: Option<f64>,
    /// Elapsed time held while the rate is zero. The origin formula cannot
    /// express a non-zero elapsed time at rate zero.
    hold_time: Option<f64>,
    rate: f64,
    /// Elapsed time that a cancel rewinds to; set by the first `start`.
    cancel_time: Option<f64>,
    /// Raw elapsed time computed by the most recent frame.
    current_time: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start_time: None,
            pause_time: None,
            hold_time: None,
            rate: 1.0,
            cancel_time: None,
            current_time: 0.0,
        }
    }

    #[inline]
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    #[inline]
    pub fn pause_time(&self) -> Option<f64> {
        self.pause_time
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.pause_time.is_some()
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn cancel_time(&self) -> Option<f64> {
        self.cancel_time
    }

    /// Cached elapsed time from the last frame; not a live reading.
    #[inline]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Elapsed time at host timestamp `now`, or the frozen value when paused.
    pub fn elapsed_at(&self, now: f64) -> f64 {
        match self.pause_time.or(self.hold_time) {
            Some(frozen) => frozen,
            None => (now - self.start_time.unwrap_or(now)) * self.rate,
        }
    }

    /// Compute and cache the elapsed time for a frame at `now`.
    pub fn sample(&mut self, now: f64) -> f64 {
        let elapsed = self.elapsed_at(now);
        self.current_time = elapsed;
        elapsed
    }

    /// Cache and return the elapsed time a cancel rewinds to, whatever the
    /// origin, rate or freeze.
    pub fn rewind(&mut self) -> f64 {
        let origin = self.cancel_time.unwrap_or(0.0);
        self.current_time = origin;
        origin
    }

    /// Begin or resume running at `now`.
    ///
    /// Resuming from a freeze moves the origin so that elapsed time continues
    /// from the frozen value. A first start anchors the origin at `now`; an
    /// existing origin is otherwise kept.
    pub fn start(&mut self, now: f64) {
        if let Some(frozen) = self.pause_time.take() {
            self.place(now, frozen);
        } else if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        if self.cancel_time.is_none() {
            self.cancel_time = Some(0.0);
        }
    }

    /// Freeze elapsed time at its value for `now`. Already frozen clocks keep
    /// their frozen value.
    pub fn freeze(&mut self, now: f64) {
        if self.pause_time.is_none() {
            self.pause_time = Some(self.elapsed_at(now));
        }
    }

    /// Drop a freeze, continuing from the frozen value.
    pub fn thaw(&mut self, now: f64) {
        if let Some(frozen) = self.pause_time.take() {
            self.place(now, frozen);
        }
    }

    /// Move to elapsed time `time_ms`.
    ///
    /// Frozen clocks take the value directly; running clocks move their
    /// origin (or their zero-rate hold) so the next frame lands on it.
    pub fn seek(&mut self, now: f64, time_ms: f64) {
        if self.pause_time.is_some() {
            self.pause_time = Some(time_ms);
        } else {
            self.place(now, time_ms);
        }
    }

    /// Change the playback rate at `now`. Elapsed time is continuous at the
    /// call for every rate, including zero: a zero rate holds the current
    /// elapsed time until the rate becomes non-zero again.
    pub fn set_rate(&mut self, now: f64, rate: f64) {
        let elapsed = self.elapsed_at(now);
        self.rate = rate;
        if self.pause_time.is_none() && self.start_time.is_some() {
            self.place(now, elapsed);
        }
    }

    /// Negate the playback rate at `now`.
    pub fn reverse(&mut self, now: f64) {
        self.set_rate(now, -self.rate);
    }

    /// Running placement: make elapsed time at `now` equal `elapsed`.
    fn place(&mut self, now: f64, elapsed: f64) {
        if self.rate == 0.0 {
            self.hold_time = Some(elapsed);
            self.start_time.get_or_insert(now);
        } else {
            self.hold_time = None;
            self.start_time = Some(now - elapsed / self.rate);
        }
    }
}
