//! 时间工具函数
//!
//! 数据库只存 `i64` Unix millis，API 层统一输出 RFC 3339 (UTC, 毫秒精度)。

use chrono::{DateTime, SecondsFormat, Utc};

/// 当前时间 Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix millis → RFC 3339 字符串，例如 `2024-05-01T10:00:00.000Z`
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_rfc3339() {
        assert_eq!(millis_to_rfc3339(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(millis_to_rfc3339(1_714_557_600_123), "2024-05-01T10:00:00.123Z");
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(now_millis() > 1_704_067_200_000);
    }
}
