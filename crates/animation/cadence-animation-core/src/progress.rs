//! Progress calculation: elapsed time -> iteration-aware, direction-aware
//! timeline position.
//!
//! Pure functions over [`Timing`]; the controller feeds them the clock's raw
//! elapsed time each frame.

use crate::config::Timing;

/// Everything derived from one elapsed-time sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationSample {
    /// Seconds since the delay elapsed (never negative).
    pub elapsed: f64,
    /// `elapsed / duration`; exceeds 1 across iterations.
    pub progress: f64,
    /// Zero-based iteration. An exact boundary belongs to the iteration it ends.
    pub iteration: i64,
    /// Progress within the iteration after direction adjustment.
    pub iteration_progress: f64,
    /// Position handed to easing + interpolation, in [0,1].
    pub position: f64,
}

/// Convert raw elapsed milliseconds into active seconds: rebase on the delay,
/// clamped at zero so nothing advances before the delay has passed.
#[inline]
pub fn active_seconds(timing: &Timing, raw_elapsed_ms: f64) -> f64 {
    (raw_elapsed_ms / 1000.0 - timing.delay).max(0.0)
}

/// Sample the timeline at `elapsed` active seconds.
pub fn sample(timing: &Timing, elapsed: f64) -> IterationSample {
    let progress = elapsed / timing.duration;
    let mut iteration = progress.floor() as i64;
    let mut iteration_progress = progress % 1.0;

    // A sample landing exactly on a boundary is the end of the iteration
    // that just completed, not the start of the next one.
    if iteration_progress == 0.0 && progress >= 1.0 {
        iteration_progress = 1.0;
        iteration -= 1;
    }

    if timing.direction.is_reversed(iteration) {
        iteration_progress = 1.0 - iteration_progress;
    }

    let position = if elapsed >= timing.total_duration() {
        1.0
    } else {
        iteration_progress.min(1.0)
    };

    IterationSample {
        elapsed,
        progress,
        iteration,
        iteration_progress,
        position,
    }
}

/// Whether a sample at `elapsed` active seconds has run past the end delay.
#[inline]
pub fn is_past_end(timing: &Timing, elapsed: f64) -> bool {
    elapsed >= timing.end_time()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Direction;
    use approx::assert_abs_diff_eq;

    fn timing(duration: f64, repeat: u32, direction: Direction) -> Timing {
        Timing {
            duration,
            delay: 0.0,
            end_delay: 0.0,
            repeat,
            direction,
        }
    }

    #[test]
    fn alternate_reverses_odd_iterations() {
        let t = timing(1.0, 3, Direction::Alternate);
        let s0 = sample(&t, 0.25);
        assert_eq!(s0.iteration, 0);
        assert_abs_diff_eq!(s0.iteration_progress, 0.25);
        let s1 = sample(&t, 1.25);
        assert_eq!(s1.iteration, 1);
        assert_abs_diff_eq!(s1.iteration_progress, 0.75);
    }

    #[test]
    fn reverse_reverses_every_iteration() {
        let t = timing(1.0, 2, Direction::Reverse);
        assert_abs_diff_eq!(sample(&t, 0.25).iteration_progress, 0.75);
        assert_abs_diff_eq!(sample(&t, 1.25).iteration_progress, 0.75);
        assert_abs_diff_eq!(sample(&t, 2.25).iteration_progress, 0.75);
    }

    #[test]
    fn alternate_reverse_starts_backwards() {
        let t = timing(1.0, 1, Direction::AlternateReverse);
        assert_abs_diff_eq!(sample(&t, 0.25).iteration_progress, 0.75);
        assert_abs_diff_eq!(sample(&t, 1.25).iteration_progress, 0.25);
    }

    #[test]
    fn boundary_belongs_to_ending_iteration() {
        let t = timing(1.0, 2, Direction::Alternate);
        let s = sample(&t, 1.0);
        assert_eq!(s.iteration, 0);
        assert_eq!(s.iteration_progress, 1.0);
        assert_eq!(s.position, 1.0);

        // Iteration 1 (reversed) ends at 2.0 -> progress 1 reversed to 0.
        let s = sample(&t, 2.0);
        assert_eq!(s.iteration, 1);
        assert_eq!(s.iteration_progress, 0.0);
        assert_eq!(s.position, 0.0);
    }

    #[test]
    fn start_of_timeline_is_iteration_zero() {
        let t = timing(2.0, 0, Direction::Normal);
        let s = sample(&t, 0.0);
        assert_eq!(s.iteration, 0);
        assert_eq!(s.position, 0.0);
    }

    #[test]
    fn end_of_timeline_always_samples_one() {
        let t = timing(1.0, 1, Direction::Alternate);
        let s = sample(&t, 2.0);
        assert_eq!(s.iteration, 1);
        assert_eq!(s.position, 1.0);
        assert_eq!(sample(&t, 7.3).position, 1.0);
    }

    #[test]
    fn alternate_example_midpoints() {
        let t = timing(1.0, 1, Direction::Alternate);
        let a = sample(&t, 0.5);
        assert_eq!((a.iteration, a.position), (0, 0.5));
        let b = sample(&t, 1.5);
        assert_abs_diff_eq!(b.progress, 1.5);
        assert_eq!((b.iteration, b.position), (1, 0.5));
    }

    #[test]
    fn delay_rebases_and_clamps() {
        let t = Timing {
            delay: 0.5,
            ..timing(1.0, 0, Direction::Normal)
        };
        assert_eq!(active_seconds(&t, 200.0), 0.0);
        assert_eq!(active_seconds(&t, -300.0), 0.0);
        assert_abs_diff_eq!(active_seconds(&t, 750.0), 0.25);
    }

    #[test]
    fn end_check_includes_end_delay() {
        let t = Timing {
            end_delay: 0.5,
            ..timing(1.0, 1, Direction::Normal)
        };
        assert!(!is_past_end(&t, 2.0));
        assert!(!is_past_end(&t, 2.4999));
        assert!(is_past_end(&t, 2.5));
    }
}
