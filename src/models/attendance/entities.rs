use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{EduSystemError, Result};
use crate::utils::form::non_empty;

// 考勤记录，每个 (学生, 日期) 只有一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub present: bool,
}

// 带学生姓名的考勤记录，用于报表
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceDetail {
    pub id: i64,
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub present: bool,
}

// 表单提交的考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// 未提交时默认为出勤；其他取值视为非法
    pub fn from_form(value: Option<String>) -> Result<Self> {
        match non_empty(value).as_deref() {
            None | Some("present") => Ok(AttendanceStatus::Present),
            Some("absent") => Ok(AttendanceStatus::Absent),
            Some(other) => Err(EduSystemError::validation(format!(
                "Invalid attendance status '{other}', expected 'present' or 'absent'"
            ))),
        }
    }

    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

// 学生当天的考勤状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum TodayStatus {
    Present,
    Absent,
    NotMarked,
}

impl From<Option<bool>> for TodayStatus {
    fn from(present: Option<bool>) -> Self {
        match present {
            Some(true) => TodayStatus::Present,
            Some(false) => TodayStatus::Absent,
            None => TodayStatus::NotMarked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_form() {
        assert_eq!(
            AttendanceStatus::from_form(None).unwrap(),
            AttendanceStatus::Present
        );
        assert_eq!(
            AttendanceStatus::from_form(Some("".into())).unwrap(),
            AttendanceStatus::Present
        );
        assert_eq!(
            AttendanceStatus::from_form(Some("absent".into())).unwrap(),
            AttendanceStatus::Absent
        );
        assert!(AttendanceStatus::from_form(Some("late".into())).is_err());
    }

    #[test]
    fn test_today_status() {
        assert_eq!(TodayStatus::from(Some(true)), TodayStatus::Present);
        assert_eq!(TodayStatus::from(None), TodayStatus::NotMarked);
        assert_eq!(
            serde_json::to_string(&TodayStatus::NotMarked).unwrap(),
            "\"not_marked\""
        );
    }
}
