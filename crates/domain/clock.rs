use chrono::{DateTime, SubsecRound, Utc};

/// Fractional-second digits a `timestamptz` column keeps.
pub const STORAGE_SUBSEC_DIGITS: u16 = 6;

/// Drops precision Postgres would discard, so a stored instant reads back equal.
pub fn to_storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORAGE_SUBSEC_DIGITS)
}

/// Source of "now" for validation and expiration.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
