// Report clock
// started_at_ms and elapsed_ms of a scan pass are read from here

/// Wall clock in epoch milliseconds
pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> i64;

    /// Milliseconds since `start_ms`; a clock stepping backwards gives 0
    fn elapsed_since(&self, start_ms: i64) -> i64 {
        (self.now_millis() - start_ms).max(0)
    }
}

pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that advances by a fixed step on every reading
    pub struct SteppingTimeProvider {
        now: AtomicI64,
        step_ms: i64,
    }

    impl SteppingTimeProvider {
        pub fn new(start_ms: i64, step_ms: i64) -> Self {
            Self {
                now: AtomicI64::new(start_ms),
                step_ms,
            }
        }
    }

    impl TimeProvider for SteppingTimeProvider {
        fn now_millis(&self) -> i64 {
            self.now.fetch_add(self.step_ms, Ordering::SeqCst)
        }
    }
}
