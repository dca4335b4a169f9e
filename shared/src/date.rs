//! 时间类型模块
//!
//! `Timestamp`: 可比较的毫秒时间戳，用于排序和展示。
//! 后端的 `createdAt` 可能是 RFC 3339、不带时区的 LocalDateTime 或纯日期，
//! 统一在这里解析。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix 纪元，缺失或无法解析的时间按此处理
    pub const EPOCH: Timestamp = Timestamp(0);

    /// 解析时间字符串
    ///
    /// 不带时区的时间按 UTC 处理。返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }

        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Self(naive.and_utc().timestamp_millis()));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc().timestamp_millis()))
    }

    /// 解析失败时退化为纪元零
    pub fn parse_or_epoch(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or(Self::EPOCH)
    }

    /// 格式化为 `YYYY-MM-DD`
    pub fn format_date(&self) -> String {
        DateTime::from_timestamp_millis(self.0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
