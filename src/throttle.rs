// throttle.rs - leading-edge call-rate limiting

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Admits at most one call per `limit`, measured from each admitted call's start.
///
/// Calls arriving inside the window are dropped outright: nothing is queued
/// and no trailing call is made once the window closes.
#[derive(Debug, Clone)]
pub struct Throttle<C = SystemClock> {
    limit: Duration,
    clock: C,
    reopens_at: Option<Duration>,
}

impl Throttle<SystemClock> {
    pub fn new(limit: Duration) -> Self {
        Self::with_clock(limit, SystemClock::new())
    }
}

impl<C: Clock> Throttle<C> {
    pub fn with_clock(limit: Duration, clock: C) -> Self {
        Self {
            limit,
            clock,
            reopens_at: None,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Whether a call made now would be admitted.
    pub fn is_open(&self) -> bool {
        self.reopens_at
            .map_or(true, |reopens_at| self.clock.now() >= reopens_at)
    }

    /// Admits the caller and starts a new window, or returns `false` while one is running.
    pub fn try_acquire(&mut self) -> bool {
        let now = self.clock.now();
        if self.reopens_at.is_some_and(|reopens_at| now < reopens_at) {
            return false;
        }
        self.reopens_at = Some(now + self.limit);
        true
    }

    /// Runs `f` if admitted and hands back whatever it returns, futures included, without awaiting it.
    pub fn call<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        if self.try_acquire() {
            Some(f())
        } else {
            None
        }
    }
}

/// A function bundled with its own [`Throttle`].
pub struct Throttled<F, C = SystemClock> {
    func: F,
    throttle: Throttle<C>,
}

impl<F> Throttled<F, SystemClock> {
    pub fn new(func: F, limit: Duration) -> Self {
        Self::with_clock(func, limit, SystemClock::new())
    }
}

impl<F, C: Clock> Throttled<F, C> {
    pub fn with_clock(func: F, limit: Duration, clock: C) -> Self {
        Self {
            func,
            throttle: Throttle::with_clock(limit, clock),
        }
    }

    /// Invokes the wrapped function with `args` if the throttle admits it.
    pub fn call<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let func = &mut self.func;
        self.throttle.call(|| func(args))
    }
}
