use chrono::{DateTime, Utc};
use crate::ports::Clock;

pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self { Self }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Always reports the same instant; used for `--at` and in tests.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self { Self(at) }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { self.0 }
}
