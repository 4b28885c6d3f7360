//! Time source abstraction
//!
//! The controller reads time only through [`Clock`], so polling and
//! acknowledgement deadlines can be driven by a simulated clock in tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct ManualClockState {
    now: Instant,
    auto_advance: Duration,
}

/// Manually driven clock
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the controller. With auto-advance set, every `now()` call
/// returns the current time and then moves it forward by the step, which
/// lets a blocking wait run to its deadline without sleeping.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualClockState>>,
}

impl ManualClock {
    /// Clock frozen at the current instant
    pub fn new() -> Self {
        Self::with_auto_advance(Duration::ZERO)
    }

    /// Clock that steps forward on every read
    pub fn with_auto_advance(step: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualClockState {
                now: Instant::now(),
                auto_advance: step,
            })),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.state.lock().now += by;
    }

    pub fn set_auto_advance(&self, step: Duration) {
        self.state.lock().auto_advance = step;
    }

    /// Current time without triggering auto-advance
    pub fn peek(&self) -> Instant {
        self.state.lock().now
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let mut state = self.state.lock();
        let now = state.now;
        let step = state.auto_advance;
        state.now += step;
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
