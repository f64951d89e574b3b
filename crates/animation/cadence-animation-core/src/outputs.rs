//! Output contract of the controller.
//!
//! Every frame delivers exactly one value to the sink, including the frame
//! that settles completion. Any `FnMut(f64)` is a sink.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives the sampled output value once per frame.
pub trait OutputSink {
    fn write(&mut self, value: f64);
}

impl<F: FnMut(f64)> OutputSink for F {
    #[inline]
    fn write(&mut self, value: f64) {
        self(value)
    }
}

/// Sink that records every delivered value. Clones share the same log, so a
/// host can keep one while the animation owns another.
#[derive(Clone, Debug, Default)]
pub struct SampleLog {
    values: Rc<RefCell<Vec<f64>>>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn values(&self) -> Vec<f64> {
        self.values.borrow().clone()
    }

    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.values.borrow().last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

impl OutputSink for SampleLog {
    #[inline]
    fn write(&mut self, value: f64) {
        self.values.borrow_mut().push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |v: f64| seen.push(v);
            sink.write(0.5);
            sink.write(1.0);
        }
        assert_eq!(seen, vec![0.5, 1.0]);
    }

    #[test]
    fn sample_log_clones_share_storage() {
        let log = SampleLog::new();
        let mut writer = log.clone();
        writer.write(3.0);
        assert_eq!(log.last(), Some(3.0));
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(writer.is_empty());
    }
}
