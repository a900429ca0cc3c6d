/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Prefixed string id, e.g. `ntf-73839201928`
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, snowflake_id())
}

/// Whole minutes elapsed between two millisecond timestamps (never negative)
pub fn elapsed_minutes(from_millis: i64, now_millis: i64) -> i64 {
    (now_millis - from_millis).max(0) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_fits_js_safe_integer() {
        let id = snowflake_id();
        assert!(id > 0);
        assert!(id < (1_i64 << 53));
    }

    #[test]
    fn test_prefixed_id() {
        let id = prefixed_id("inv");
        assert!(id.starts_with("inv-"));
    }

    #[test]
    fn test_elapsed_minutes() {
        assert_eq!(elapsed_minutes(0, 59_999), 0);
        assert_eq!(elapsed_minutes(0, 60_000), 1);
        assert_eq!(elapsed_minutes(0, 25 * 60_000 + 1), 25);
        // clock skew never yields negative elapsed time
        assert_eq!(elapsed_minutes(120_000, 0), 0);
    }
}
