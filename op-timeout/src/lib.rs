//! # op-timeout: Countdown timeout budgets
//!
//! This crate provides a small value type, [Timeout], which represents a fixed budget of whole
//! seconds that shrinks as time elapses from the moment the value was created. It is intended
//! to be passed by value into operations which need a "seconds remaining" figure, for example
//! the timeout parameter of a network call, without those operations needing to know when the
//! countdown was started.
//!
//! ## Overview
//!
//!  - The [timeout] module contains the [Timeout] countdown, its [TimeoutState] and the
//!    [TimeoutExpiredError] returned once the budget was exceeded.
//!  - The [time] module contains the [SecondsClock] abstraction used to measure elapsed time.
//!    With the `std` feature, the monotonic [time::StdClock] is provided.
//!  - The [config] module contains the [TimeoutConfig] which can be loaded from configuration
//!    files and used to start fresh countdowns.
//!
//! A budget of 0 seconds is a sentinel for a disabled timeout. Querying a disabled timeout
//! always yields 0 remaining seconds and never fails.
//!
//! ## Example
//!
//! ```
//! use op_timeout::StdTimeout;
//!
//! let timeout = StdTimeout::new(10);
//! // Querying right after creation yields the full budget.
//! assert_eq!(timeout.remaining_secs().unwrap(), 10);
//! let raw: u16 = timeout.try_into().unwrap();
//! assert_eq!(raw, 10);
//!
//! let disabled = StdTimeout::default();
//! assert_eq!(disabled.remaining_secs().unwrap(), 0);
//! ```
#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod config;
pub mod time;
pub mod timeout;

pub use config::{BudgetOutOfRangeError, TimeoutConfig};
pub use time::SecondsClock;
pub use timeout::{Timeout, TimeoutExpiredError, TimeoutState};

#[cfg(feature = "std")]
pub use timeout::StdTimeout;
