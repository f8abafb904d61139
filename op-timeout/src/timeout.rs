//! Countdown timeout budget.
//!
//! A [Timeout] holds a budget of whole seconds and the point in time it was started at.
//! Querying it computes the remaining budget on demand. The countdown is a plain value:
//! copies keep the budget and the start point, and queries never mutate it.
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::SecondsClock;

/// [Timeout] measured with the monotonic standard library clock.
#[cfg(feature = "std")]
pub type StdTimeout = Timeout<crate::time::StdClock>;

/// Returned when the elapsed time strictly exceeds a non-zero budget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("timeout of {budget_secs} s expired, {elapsed_secs} s elapsed")]
pub struct TimeoutExpiredError {
    pub budget_secs: u16,
    pub elapsed_secs: u64,
}

impl TimeoutExpiredError {
    /// Seconds by which the budget was exceeded.
    #[inline]
    pub const fn overrun_secs(&self) -> u64 {
        self.elapsed_secs.saturating_sub(self.budget_secs as u64)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutState {
    /// Budget of 0 seconds. Never expires.
    Disabled,
    Active { remaining_secs: u16 },
    /// Terminal state.
    Expired { elapsed_secs: u64 },
}

/// Countdown over a budget of whole seconds.
///
/// A budget of 0 is the sentinel for a disabled timeout: [Self::remaining_secs] always
/// returns 0 for it and the clock is not read. For a non-zero budget `B` and `E` elapsed
/// seconds, the remaining budget is `B - E` while `E <= B`. Once `E > B`, the query fails
/// with a [TimeoutExpiredError]. Reaching exactly `E == B` yields 0 and is not an error.
///
/// The countdown can be converted into a [u16] with [TryFrom] wherever a remaining seconds
/// value is expected.
///
/// # Example
///
/// ```
/// use core::sync::atomic::AtomicU64;
/// use op_timeout::{time::TickClock, Timeout, TimeoutState};
///
/// let secs = AtomicU64::new(0);
/// let clock = TickClock::new(&secs);
/// let timeout = Timeout::with_clock(5, clock);
/// clock.advance(2);
/// assert_eq!(timeout.remaining_secs().unwrap(), 3);
/// clock.advance(4);
/// assert_eq!(timeout.state(), TimeoutState::Expired { elapsed_secs: 6 });
/// let error = u16::try_from(timeout).unwrap_err();
/// assert_eq!(error.overrun_secs(), 1);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Timeout<C: SecondsClock> {
    budget_secs: u16,
    started_at: Option<C::Instant>,
    clock: C,
}

impl<C: SecondsClock> Timeout<C> {
    /// Create a disabled timeout which has no start point.
    pub const fn disabled(clock: C) -> Self {
        Self {
            budget_secs: 0,
            started_at: None,
            clock,
        }
    }

    /// Create a countdown over `budget_secs` seconds which starts now.
    pub fn with_clock(budget_secs: u16, clock: C) -> Self {
        let started_at = Some(clock.now());
        Self {
            budget_secs,
            started_at,
            clock,
        }
    }

    #[inline]
    pub fn budget_secs(&self) -> u16 {
        self.budget_secs
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.budget_secs == 0
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whole seconds elapsed since the start. Returns [None] for a disabled timeout.
    pub fn elapsed_secs(&self) -> Option<u64> {
        if self.is_disabled() {
            return None;
        }
        self.started_at
            .map(|started_at| self.clock.elapsed_secs(started_at))
    }

    /// Remaining budget in whole seconds.
    ///
    /// Returns 0 for a disabled timeout. Returns a [TimeoutExpiredError] if the elapsed
    /// time strictly exceeds the budget.
    pub fn remaining_secs(&self) -> Result<u16, TimeoutExpiredError> {
        let Some(elapsed_secs) = self.elapsed_secs() else {
            return Ok(0);
        };
        if elapsed_secs > u64::from(self.budget_secs) {
            log::debug!(
                "timeout of {} s expired, {} s elapsed",
                self.budget_secs,
                elapsed_secs
            );
            return Err(TimeoutExpiredError {
                budget_secs: self.budget_secs,
                elapsed_secs,
            });
        }
        // Cast is lossless, elapsed time is bounded by the budget here.
        Ok(self.budget_secs - elapsed_secs as u16)
    }

    /// Remaining budget as a [Duration] which can be passed to APIs expecting an optional
    /// timeout, for example [std::net::TcpStream::set_read_timeout].
    ///
    /// A disabled timeout yields [None]. Please note that a countdown which has exactly
    /// reached its budget yields [Duration::ZERO], which some APIs reject.
    pub fn remaining_timeout(&self) -> Result<Option<Duration>, TimeoutExpiredError> {
        if self.is_disabled() {
            return Ok(None);
        }
        self.remaining_secs()
            .map(|secs| Some(Duration::from_secs(secs.into())))
    }

    pub fn state(&self) -> TimeoutState {
        if self.is_disabled() {
            return TimeoutState::Disabled;
        }
        match self.remaining_secs() {
            Ok(remaining_secs) => TimeoutState::Active { remaining_secs },
            Err(e) => TimeoutState::Expired {
                elapsed_secs: e.elapsed_secs,
            },
        }
    }

    pub fn has_expired(&self) -> bool {
        matches!(self.state(), TimeoutState::Expired { .. })
    }
}

impl<C: SecondsClock + Default> Default for Timeout<C> {
    fn default() -> Self {
        Self::disabled(C::default())
    }
}

#[cfg(feature = "std")]
impl Timeout<crate::time::StdClock> {
    /// Create a countdown over `budget_secs` seconds measured with the monotonic
    /// [crate::time::StdClock].
    pub fn new(budget_secs: u16) -> Self {
        Self::with_clock(budget_secs, crate::time::StdClock)
    }
}

impl<C: SecondsClock> TryFrom<Timeout<C>> for u16 {
    type Error = TimeoutExpiredError;

    fn try_from(timeout: Timeout<C>) -> Result<Self, Self::Error> {
        timeout.remaining_secs()
    }
}

impl<C: SecondsClock> TryFrom<&Timeout<C>> for u16 {
    type Error = TimeoutExpiredError;

    fn try_from(timeout: &Timeout<C>) -> Result<Self, Self::Error> {
        timeout.remaining_secs()
    }
}
