//! Frame scheduling capability and two hosts for it.
//!
//! The controller never calls a global frame API. It is handed a
//! [`FrameScheduler`] that tells time and hands out registrations; the host
//! fires a registration by calling [`Animation::on_frame`] with the id and
//! the frame timestamp.
//!
//! - [`ManualScheduler`]: virtual clock advanced by hand. Deterministic, used
//!   by tests and by hosts that own their own frame loop.
//! - [`SystemScheduler`] + [`run_blocking`]: wall-clock host that sleeps
//!   between frames on the calling thread.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crate::animation::Animation;
use crate::ids::{FrameIdAllocator, FrameRequestId};
use crate::outputs::OutputSink;

/// Host frame facility: a monotonic millisecond clock plus one-shot frame
/// registrations.
pub trait FrameScheduler {
    /// Current host time in milliseconds. Never decreases.
    fn now(&self) -> f64;

    /// Register interest in the next display frame.
    fn request_frame(&self) -> FrameRequestId;

    /// Withdraw a registration that has not fired yet.
    fn cancel_frame(&self, id: FrameRequestId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    #[inline]
    fn now(&self) -> f64 {
        (**self).now()
    }

    #[inline]
    fn request_frame(&self) -> FrameRequestId {
        (**self).request_frame()
    }

    #[inline]
    fn cancel_frame(&self, id: FrameRequestId) {
        (**self).cancel_frame(id)
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &T {
    #[inline]
    fn now(&self) -> f64 {
        (**self).now()
    }

    #[inline]
    fn request_frame(&self) -> FrameRequestId {
        (**self).request_frame()
    }

    #[inline]
    fn cancel_frame(&self, id: FrameRequestId) {
        (**self).cancel_frame(id)
    }
}

/// Virtual-clock scheduler.
///
/// Time moves only through [`advance`](Self::advance) and
/// [`set_time`](Self::set_time). Outstanding registrations are held until
/// [`take_pending`](Self::take_pending) drains them as one display refresh.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Cell<f64>,
    ids: FrameIdAllocator,
    pending: RefCell<BTreeSet<FrameRequestId>>,
    cancelled: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        let scheduler = Self::default();
        scheduler.now.set(now_ms);
        scheduler
    }

    /// Move the clock forward by `delta_ms`. Negative or non-finite deltas
    /// are ignored.
    pub fn advance(&self, delta_ms: f64) {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            log::warn!("ignoring clock advance by {delta_ms} ms");
            return;
        }
        self.now.set(self.now.get() + delta_ms);
    }

    /// Jump the clock to `now_ms`. Earlier times are ignored.
    pub fn set_time(&self, now_ms: f64) {
        if !now_ms.is_finite() || now_ms < self.now.get() {
            log::warn!(
                "ignoring clock move from {} ms back to {now_ms} ms",
                self.now.get()
            );
            return;
        }
        self.now.set(now_ms);
    }

    /// Drain every outstanding registration, in registration order. Each
    /// returned id should be fired once with the current time.
    pub fn take_pending(&self) -> Vec<FrameRequestId> {
        std::mem::take(&mut *self.pending.borrow_mut())
            .into_iter()
            .collect()
    }

    #[inline]
    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending.borrow().contains(&id)
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total registrations ever requested.
    #[inline]
    pub fn requested_count(&self) -> u64 {
        self.ids.issued()
    }

    /// Total registrations withdrawn before firing.
    #[inline]
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn request_frame(&self) -> FrameRequestId {
        let id = self.ids.alloc();
        self.pending.borrow_mut().insert(id);
        id
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        if self.pending.borrow_mut().remove(&id) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}

/// Wall-clock scheduler measuring milliseconds since its creation.
#[derive(Debug)]
pub struct SystemScheduler {
    origin: Instant,
    ids: FrameIdAllocator,
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            ids: FrameIdAllocator::new(),
        }
    }
}

impl FrameScheduler for SystemScheduler {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&self) -> FrameRequestId {
        self.ids.alloc()
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        // Nothing is queued host-side; the controller drops its own handle.
        log::trace!("cancelled {id}");
    }
}

/// Drive `animation` on the calling thread until it stops requesting frames,
/// sleeping `frame_interval` between frames. Returns the number of frames
/// fired.
pub fn run_blocking<S, O>(animation: &mut Animation<S, O>, frame_interval: Duration) -> usize
where
    S: FrameScheduler,
    O: OutputSink,
{
    let mut frames = 0;
    while let Some(request) = animation.pending_frame() {
        thread::sleep(frame_interval);
        let now = animation.scheduler().now();
        animation.on_frame(request, now);
        frames += 1;
    }
    log::debug!("frame loop exited after {frames} frames");
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_moves_backwards() {
        let sched = ManualScheduler::starting_at(100.0);
        sched.advance(16.0);
        assert_eq!(sched.now(), 116.0);
        sched.advance(-5.0);
        sched.set_time(50.0);
        assert_eq!(sched.now(), 116.0);
        sched.set_time(200.0);
        assert_eq!(sched.now(), 200.0);
    }

    #[test]
    fn registrations_drain_once() {
        let sched = ManualScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_eq!(sched.pending_count(), 2);
        sched.cancel_frame(a);
        sched.cancel_frame(a);
        assert_eq!(sched.cancelled_count(), 1);
        assert_eq!(sched.take_pending(), vec![b]);
        assert!(sched.take_pending().is_empty());
        assert_eq!(sched.requested_count(), 2);
    }

    #[test]
    fn shared_scheduler_through_rc() {
        let sched = Rc::new(ManualScheduler::new());
        let handle: Rc<ManualScheduler> = Rc::clone(&sched);
        let id = handle.request_frame();
        assert!(sched.is_pending(id));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let sched = SystemScheduler::new();
        let a = sched.now();
        let b = sched.now();
        assert!(b >= a);
        assert_ne!(sched.request_frame(), sched.request_frame());
    }
}
