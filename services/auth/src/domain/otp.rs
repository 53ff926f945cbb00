//! Numeric one-time codes and expiry checks.

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

/// `len` decimal digits, each drawn uniformly from the thread CSPRNG.
/// Leading zeros are kept.
pub fn generate_otp(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

pub fn expiry_timestamp(minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes)
}

/// Expired when absent or strictly before now. An expiry equal to now is still valid.
pub fn is_expired(expires_at: Option<DateTime<Utc>>) -> bool {
    is_expired_at(expires_at, Utc::now())
}

pub fn is_expired_at(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(exp) => exp < now,
        None => true,
    }
}

/// Parse an RFC 3339 expiry. Unparseable input is treated as absent, hence expired.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
