use chrono::{DateTime, Utc};

/// Time source for defaulting record dates. Handed to the registry as an
/// explicit capability so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
