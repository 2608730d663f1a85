use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

pub type Id = String;

/// Sub-second digits kept by `TIMESTAMPTZ` columns (microseconds)
pub const STORED_SUBSEC_DIGITS: u16 = 6;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Current instant truncated to the precision the database stores losslessly.
///
/// A value produced here compares equal to itself after a round trip through
/// Postgres, so `created_at == updated_at` holds for freshly created rows both
/// in the response and on a later read. Every mutation takes exactly one
/// instant from this function and stamps it on every row it writes.
pub fn normalized_now() -> DateTime<Utc> {
    normalize(Utc::now())
}

/// Like `normalized_now`, but strictly later than `previous`.
///
/// Two mutations of one row inside the same microsecond (or across a clock
/// step backwards) would otherwise stamp an `updated_at` that does not move.
pub fn normalized_now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = normalized_now();
    if now > previous {
        now
    } else {
        normalize(previous) + Duration::microseconds(1)
    }
}

pub fn normalize(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}
