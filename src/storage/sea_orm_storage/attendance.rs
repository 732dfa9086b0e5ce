//! 考勤存储操作

use std::collections::HashMap;

use chrono::NaiveDate;

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{EduSystemError, Result};
use crate::models::attendance::entities::{Attendance, AttendanceDetail};
use crate::utils::dates::{date_from_timestamp, day_start_timestamp};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 录入考勤；同一学生同一天只保留一条，重复录入覆盖出勤状态
    pub async fn upsert_attendance_impl(
        &self,
        student_id: i64,
        date: NaiveDate,
        present: bool,
    ) -> Result<Attendance> {
        let day = day_start_timestamp(date);
        let model = ActiveModel {
            student_id: Set(student_id),
            date: Set(day),
            present: Set(present),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        AttendanceRecords::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::Date])
                    .update_columns([Column::Present, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("记录考勤失败: {e}")))?;

        let record = AttendanceRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(day))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考勤失败: {e}")))?
            .ok_or_else(|| {
                EduSystemError::database_operation(format!(
                    "考勤记录写入后未找到: student={student_id}, date={date}"
                ))
            })?;

        Ok(record.into_attendance())
    }

    /// 某一天的全部考勤
    pub async fn list_attendance_on_impl(&self, date: NaiveDate) -> Result<Vec<Attendance>> {
        let records = AttendanceRecords::find()
            .filter(Column::Date.eq(day_start_timestamp(date)))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 闭区间 [start, end] 内的考勤，按日期升序，附带学生姓名
    pub async fn list_attendance_between_impl(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceDetail>> {
        let records = AttendanceRecords::find()
            .filter(Column::Date.between(day_start_timestamp(start), day_start_timestamp(end)))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考勤报表失败: {e}")))?;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();

        let names: HashMap<i64, (String, String)> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, (s.first_name, s.last_name)))
            .collect();

        Ok(records
            .into_iter()
            .map(|r| {
                let (first_name, last_name) =
                    names.get(&r.student_id).cloned().unwrap_or_default();
                AttendanceDetail {
                    id: r.id,
                    student_id: r.student_id,
                    first_name,
                    last_name,
                    date: date_from_timestamp(r.date),
                    present: r.present,
                }
            })
            .collect())
    }
}
