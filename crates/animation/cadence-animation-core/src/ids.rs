//! Identifiers for frame registrations.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle returned by a frame scheduler for one registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

impl fmt::Display for FrameRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Monotonic allocator for FrameRequestId.
/// Takes `&self` so schedulers shared behind `Rc` can allocate.
#[derive(Default, Debug)]
pub struct FrameIdAllocator {
    next: Cell<u64>,
}

impl FrameIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&self) -> FrameRequestId {
        let id = FrameRequestId(self.next.get());
        self.next.set(self.next.get().wrapping_add(1));
        id
    }

    /// Number of ids handed out so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.next.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let alloc = FrameIdAllocator::new();
        assert_eq!(alloc.alloc(), FrameRequestId(0));
        assert_eq!(alloc.alloc(), FrameRequestId(1));
        assert_eq!(alloc.issued(), 2);
        assert_eq!(FrameRequestId(7).to_string(), "frame#7");
    }
}
