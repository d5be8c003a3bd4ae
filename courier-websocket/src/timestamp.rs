//! Millisecond timestamps for log records.

/// Milliseconds since the Unix epoch, UTC.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_monotonic_enough() {
        let first = now();
        let second = now();
        // 2020-01-01T00:00:00Z
        assert!(first > 1_577_836_800_000);
        assert!(second >= first);
    }
}
