use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::SecondsClock;
use crate::timeout::Timeout;

/// The requested budget does not fit into the 16 bit seconds range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("timeout budget of {0} s exceeds the maximum of {max} s", max = u16::MAX)]
pub struct BudgetOutOfRangeError(pub u64);

/// Configured timeout budget which can be used to start fresh countdowns.
///
/// The default configuration is a disabled timeout. With the `serde` feature, the
/// configuration can be loaded as part of an application configuration file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeoutConfig {
    budget_secs: u16,
}

impl TimeoutConfig {
    pub const fn new(budget_secs: u16) -> Self {
        Self { budget_secs }
    }

    pub const fn disabled() -> Self {
        Self::new(0)
    }

    /// Create a configuration from a [Duration]. Sub-second parts are truncated.
    pub fn from_duration(duration: Duration) -> Result<Self, BudgetOutOfRangeError> {
        let secs = duration.as_secs();
        u16::try_from(secs)
            .map(Self::new)
            .map_err(|_| BudgetOutOfRangeError(secs))
    }

    #[inline]
    pub const fn budget_secs(&self) -> u16 {
        self.budget_secs
    }

    #[inline]
    pub const fn is_disabled(&self) -> bool {
        self.budget_secs == 0
    }

    /// Start a new countdown with the configured budget.
    pub fn start_with_clock<C: SecondsClock>(&self, clock: C) -> Timeout<C> {
        if self.is_disabled() {
            return Timeout::disabled(clock);
        }
        Timeout::with_clock(self.budget_secs, clock)
    }

    /// Start a new countdown with the configured budget using the monotonic
    /// [crate::time::StdClock].
    #[cfg(feature = "std")]
    pub fn start(&self) -> crate::timeout::StdTimeout {
        self.start_with_clock(crate::time::StdClock)
    }
}

impl From<u16> for TimeoutConfig {
    fn from(budget_secs: u16) -> Self {
        Self::new(budget_secs)
    }
}

impl TryFrom<Duration> for TimeoutConfig {
    type Error = BudgetOutOfRangeError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::from_duration(duration)
    }
}
