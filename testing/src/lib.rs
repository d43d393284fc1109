//! # Cinebook Testing
//!
//! Testing utilities and helpers for the Cinebook booking funnel.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Assertion helpers for reducers
//! - A fluent Given-When-Then harness for reducer tests
//!
//! ## Example
//!
//! ```ignore
//! use cinebook_testing::{ReducerTest, test_clock};
//!
//! #[test]
//! fn selecting_a_country_resets_the_city() {
//!     ReducerTest::new(SelectionReducer)
//!         .with_env(test_environment())
//!         .given_state(state_with_city())
//!         .when_action(SelectionAction::SelectCountry(other_country()))
//!         .then_state(|state| assert!(state.city.is_none()))
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use cinebook_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible. Availability
    /// date filtering depends on "today", so funnel tests pin it here.
    ///
    /// # Example
    ///
    /// ```
    /// use cinebook_testing::mocks::FixedClock;
    /// use cinebook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

mod reducer_test;

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
