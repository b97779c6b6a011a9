//! # StayScout Testing
//!
//! Testing utilities and helpers for the StayScout reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given/When/Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use stayscout_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(StorefrontReducer)
//!     .with_env(test_environment())
//!     .given_state(StorefrontState::new(true))
//!     .when_action(StorefrontAction::Navigate(NavRequest::About))
//!     .then_state(|state| assert!(matches!(state.page, Page::About)))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use stayscout_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stayscout_core::environment::Viewport;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stayscout_testing::mocks::FixedClock;
    /// use stayscout_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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
    /// Panics if the hardcoded timestamp fails to parse, which should
    /// never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Viewport that counts `scroll_to_top` invocations
    ///
    /// Used to verify the scroll-to-top contract fires on every accepted
    /// navigation transition.
    #[derive(Debug, Default)]
    pub struct RecordingViewport {
        scrolls: AtomicUsize,
    }

    impl RecordingViewport {
        /// Create a new recording viewport
        #[must_use]
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Number of scroll-to-top invocations observed so far
        #[must_use]
        pub fn scroll_count(&self) -> usize {
            self.scrolls.load(Ordering::SeqCst)
        }
    }

    impl Viewport for RecordingViewport {
        fn scroll_to_top(&self) {
            self.scrolls.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, RecordingViewport, test_clock};
