use chrono::{DateTime, Utc};

/// Source of the current time, so adapters can be tested against a fixed date.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
