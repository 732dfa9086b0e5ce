use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{EduSystemError, Result};
use crate::utils::dates::parse_date;
use crate::utils::form::non_empty;

// 考勤页面的表单动作，由隐藏字段 `action` 区分
#[derive(Debug, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum AttendanceActionForm {
    Mark {
        student_id: Option<String>,
        status: Option<String>,
    },
    MarkBulk {
        bulk_date: Option<String>,
        status_all: Option<String>,
    },
    GenerateReport {
        start_date: Option<String>,
        end_date: Option<String>,
    },
}

// 报表日期区间（闭区间，按天）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn from_form(start: Option<String>, end: Option<String>) -> Result<Self> {
        let (Some(start), Some(end)) = (non_empty(start), non_empty(end)) else {
            return Err(EduSystemError::validation(
                "Start and end dates are required for the report",
            ));
        };

        let start = parse_date(&start)?;
        let end = parse_date(&end)?;
        if start > end {
            return Err(EduSystemError::validation(
                "Start date must not be after the end date",
            ));
        }

        Ok(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_range_missing_bound() {
        let err = DateRange::from_form(s("2025-09-01"), None).unwrap_err();
        assert_eq!(
            err.message(),
            "Start and end dates are required for the report"
        );
        assert!(DateRange::from_form(s(""), s("2025-09-01")).is_err());
    }

    #[test]
    fn test_range_start_after_end_rejected() {
        let err = DateRange::from_form(s("2025-09-10"), s("2025-09-01")).unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[test]
    fn test_range_inclusive() {
        let range = DateRange::from_form(s("2025-09-01"), s("2025-09-01")).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(range.start, day);
        assert_eq!(range.end, day);
    }
}
