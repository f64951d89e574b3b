//! Single-settlement completion contract.
//!
//! [`Completion`] is the tagged outcome; it only ever moves out of
//! `Pending`, once. [`Finished`] is the awaitable handle given to callers:
//! it resolves to the final output value, or to [`Stopped`] when the
//! animation was stopped or cancelled first.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use serde::{Deserialize, Serialize};

use crate::error::Stopped;

/// Outcome of an animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Completion<V> {
    #[default]
    Pending,
    Completed(V),
    Stopped,
}

impl<V> Completion<V> {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Completion::Pending)
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Move to `outcome` if still pending. Returns false (and changes
    /// nothing) when already settled.
    pub fn settle(&mut self, outcome: Completion<V>) -> bool {
        if self.is_settled() || outcome.is_pending() {
            return false;
        }
        *self = outcome;
        true
    }

    /// The settled result, if any.
    pub fn result(&self) -> Option<Result<&V, Stopped>> {
        match self {
            Completion::Pending => None,
            Completion::Completed(value) => Some(Ok(value)),
            Completion::Stopped => Some(Err(Stopped)),
        }
    }
}

#[derive(Debug)]
struct Shared<V> {
    outcome: Completion<V>,
    wakers: Vec<Waker>,
}

/// Awaitable completion handle. Clones observe the same outcome.
#[derive(Debug)]
pub struct Finished<V> {
    shared: Rc<RefCell<Shared<V>>>,
}

impl<V> Clone for Finished<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<V: Clone> Finished<V> {
    pub(crate) fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                outcome: Completion::Pending,
                wakers: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current outcome.
    pub fn outcome(&self) -> Completion<V> {
        self.shared.borrow().outcome.clone()
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.shared.borrow().outcome.is_settled()
    }

    pub(crate) fn resolve(&self, value: V) -> bool {
        self.settle(Completion::Completed(value))
    }

    pub(crate) fn reject(&self) -> bool {
        self.settle(Completion::Stopped)
    }

    fn settle(&self, outcome: Completion<V>) -> bool {
        let wakers = {
            let mut shared = self.shared.borrow_mut();
            if !shared.outcome.settle(outcome) {
                log::trace!("completion already settled; ignoring");
                return false;
            }
            std::mem::take(&mut shared.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
        true
    }
}

impl<V: Clone> Future for Finished<V> {
    type Output = Result<V, Stopped>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        match &shared.outcome {
            Completion::Completed(value) => Poll::Ready(Ok(value.clone())),
            Completion::Stopped => Poll::Ready(Err(Stopped)),
            Completion::Pending => {
                if !shared.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    shared.wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}
