//! Time source abstraction
//!
//! Series windows and the live ticker read "now" through a [`Clock`] so
//! they can be driven by a fixed or manually advanced time in tests.

use crate::types::{millis_to_datetime, TimestampMillis};
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> TimestampMillis {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::from_millis(start.timestamp_millis())
    }

    pub fn from_millis(millis: TimestampMillis) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        millis_to_datetime(self.now_millis())
    }

    fn now_millis(&self) -> TimestampMillis {
        self.millis.load(Ordering::SeqCst)
    }
}
