use chrono::Duration;
use rand::Rng;

/// How long an issued code stays valid.
pub const CODE_TTL_MINUTES: i64 = 10;

pub fn code_ttl() -> Duration {
    Duration::minutes(CODE_TTL_MINUTES)
}

/// Generates a uniform-random 6-digit code. Leading zeros are preserved:
/// "004217" is a valid code and must be submitted exactly as issued.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..=999_999);
    format!("{n:06}")
}
