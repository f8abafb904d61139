use core::fmt::Debug;
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "std")]
pub use std_mod::*;

/// Generic abstraction for a clock which measures elapsed time with a granularity of whole
/// seconds.
///
/// The elapsed time must never go backwards. Implementations should be based on a monotonic
/// time source and saturate at 0 if the start point lies in the future.
pub trait SecondsClock {
    /// Opaque start point captured by [Self::now].
    type Instant: Copy + Debug;

    fn now(&self) -> Self::Instant;

    /// Whole seconds elapsed between `start` and now, rounded down.
    fn elapsed_secs(&self, start: Self::Instant) -> u64;
}

/// Clock driven by a seconds counter owned by the application.
///
/// The counter is usually advanced by a periodic task, an interrupt handler or a simulation
/// loop. Clones share the same counter.
#[cfg(target_has_atomic = "64")]
#[derive(Debug, Copy, Clone)]
pub struct TickClock<'a> {
    seconds: &'a AtomicU64,
}

#[cfg(target_has_atomic = "64")]
impl<'a> TickClock<'a> {
    pub const fn new(seconds: &'a AtomicU64) -> Self {
        Self { seconds }
    }

    #[inline]
    pub fn now_secs(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Advance the shared counter by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.seconds.fetch_add(secs, Ordering::Relaxed);
    }
}

#[cfg(target_has_atomic = "64")]
impl SecondsClock for TickClock<'_> {
    type Instant = u64;

    fn now(&self) -> Self::Instant {
        self.now_secs()
    }

    fn elapsed_secs(&self, start: Self::Instant) -> u64 {
        self.now_secs().saturating_sub(start)
    }
}

#[cfg(feature = "std")]
pub mod std_mod {
    use super::SecondsClock;

    /// Monotonic clock based on [std::time::Instant].
    ///
    /// Adjustments of the system wall-clock do not affect the elapsed time.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct StdClock;

    impl SecondsClock for StdClock {
        type Instant = std::time::Instant;

        fn now(&self) -> Self::Instant {
            std::time::Instant::now()
        }

        fn elapsed_secs(&self, start: Self::Instant) -> u64 {
            std::time::Instant::now()
                .saturating_duration_since(start)
                .as_secs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_clock_elapsed() {
        let secs = AtomicU64::new(100);
        let clock = TickClock::new(&secs);
        let start = clock.now();
        assert_eq!(start, 100);
        assert_eq!(clock.elapsed_secs(start), 0);
        clock.advance(7);
        assert_eq!(clock.now_secs(), 107);
        assert_eq!(clock.elapsed_secs(start), 7);
    }

    #[test]
    fn test_tick_clock_copies_share_counter() {
        let secs = AtomicU64::new(0);
        let clock = TickClock::new(&secs);
        let copy = clock;
        clock.advance(3);
        assert_eq!(copy.now_secs(), 3);
        secs.store(10, Ordering::Relaxed);
        assert_eq!(copy.now_secs(), 10);
        assert_eq!(clock.now_secs(), 10);
    }

    #[test]
    fn test_tick_clock_start_in_future_saturates() {
        let secs = AtomicU64::new(5);
        let clock = TickClock::new(&secs);
        assert_eq!(clock.elapsed_secs(20), 0);
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_std_clock_elapsed_right_after_start() {
        let clock = StdClock;
        let start = clock.now();
        assert_eq!(clock.elapsed_secs(start), 0);
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_std_clock_start_in_future_saturates() {
        let clock = StdClock;
        let start = clock.now() + std::time::Duration::from_secs(30);
        assert_eq!(clock.elapsed_secs(start), 0);
    }
}
