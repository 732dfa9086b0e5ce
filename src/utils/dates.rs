//! 日期工具
//!
//! 考勤与课程中的"日期"统一以当天 UTC 零点的 Unix 时间戳存储。

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::errors::{EduSystemError, Result};

/// 表单中的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 日期对应的零点时间戳
pub fn day_start_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// 时间戳所在的日期
pub fn date_from_timestamp(ts: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .date_naive()
}

/// 解析表单提交的日期（YYYY-MM-DD）
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        EduSystemError::validation(format!("Invalid date '{value}', expected YYYY-MM-DD"))
    })
}

/// 截止到 `today`（含）的最近 `days` 天，按时间升序
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64)
        .rev()
        .map(|offset| today - chrono::Duration::days(offset))
        .collect()
}
