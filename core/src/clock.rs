use std::rc::Rc;
use std::time::Duration;
use web_time::Instant;

/// Source of timestamps, read only when a game starts and when it ends.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a handle can be kept
/// after passing one to an engine.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<core::cell::Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::default(),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Whole seconds in `duration`, rounding half a second up.
pub fn round_secs(duration: Duration) -> u64 {
    let millis = duration.as_millis() + 500;
    u64::try_from(millis / 1000).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance_millis(1500);

        assert_eq!(clock.now() - start, Duration::from_millis(1500));
    }

    #[test]
    fn round_secs_rounds_to_nearest() {
        assert_eq!(round_secs(Duration::ZERO), 0);
        assert_eq!(round_secs(Duration::from_millis(499)), 0);
        assert_eq!(round_secs(Duration::from_millis(500)), 1);
        assert_eq!(round_secs(Duration::from_millis(2499)), 2);
        assert_eq!(round_secs(Duration::from_secs(61)), 61);
    }
}
