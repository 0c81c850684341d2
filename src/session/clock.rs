//! Monotonic time source for elapsed-time stamping.

use std::time::Instant;

/// Source of monotonic instants.
///
/// Event timestamps are measured against this clock, so wall-clock adjustments
/// during a recording never reorder or skew them.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
