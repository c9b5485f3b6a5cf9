//! Wall-clock adapter for the clock port.

use chrono::{DateTime, Utc};

use crate::domain::ports::Clock;

/// System UTC clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
