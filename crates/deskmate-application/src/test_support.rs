//! Shared test doubles.

use chrono::{DateTime, TimeZone, Utc};
use deskmate_core::clock::Clock;
use std::sync::Mutex;

/// Clock that only moves when the test moves it.
pub(crate) struct ManualClock {
    now_ms: Mutex<i64>,
}

impl ManualClock {
    pub(crate) fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Mutex::new(now_ms),
        }
    }

    pub(crate) fn advance(&self, delta_ms: i64) {
        *self.now_ms.lock().unwrap() += delta_ms;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(*self.now_ms.lock().unwrap())
            .unwrap()
    }
}
