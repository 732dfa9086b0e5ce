use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{Attendance, AttendanceDetail, AttendanceStatus, TodayStatus};
use crate::models::students::entities::Student;

// 某天的考勤快照
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub present: i64,
    pub absent: i64,
    /// 学生总数减去当天已记录的人数
    pub not_marked: i64,
}

// 周趋势图中的一天
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct DayCount {
    pub date: NaiveDate,
    pub present: i64,
    pub absent: i64,
}

// 报表中按日期汇总的统计
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct DateStats {
    pub date: NaiveDate,
    pub present: i64,
    pub absent: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 按日期升序
    pub records: Vec<AttendanceDetail>,
    /// 仅包含有记录的日期，按日期升序
    pub date_stats: Vec<DateStats>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceToday {
    pub student: Student,
    pub status: TodayStatus,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceOverviewResponse {
    pub students: Vec<StudentAttendanceToday>,
    pub today: DailySnapshot,
    pub weekly_trend: Vec<DayCount>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub attendance: Attendance,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkMarkResponse {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked: i64,
}
