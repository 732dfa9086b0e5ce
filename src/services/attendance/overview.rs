use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::AttendanceService;
use super::aggregate::{TREND_DAYS, daily_snapshot, weekly_trend};
use crate::errors::Result;
use crate::models::attendance::entities::TodayStatus;
use crate::models::attendance::responses::{AttendanceOverviewResponse, StudentAttendanceToday};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::dates::today;

async fn load_overview(storage: Arc<dyn Storage>) -> Result<AttendanceOverviewResponse> {
    let today = today();
    let week_start = today - chrono::Duration::days(TREND_DAYS as i64 - 1);

    let students = storage.list_students(None).await?;
    let todays = storage.list_attendance_on(today).await?;
    let week = storage.list_attendance_between(week_start, today).await?;

    let by_student: HashMap<i64, bool> = todays.iter().map(|a| (a.student_id, a.present)).collect();
    let snapshot = daily_snapshot(
        today,
        todays.iter().map(|a| (a.date, a.present)),
        students.len() as u64,
    );

    Ok(AttendanceOverviewResponse {
        students: students
            .into_iter()
            .map(|student| StudentAttendanceToday {
                status: TodayStatus::from(by_student.get(&student.id).copied()),
                student,
            })
            .collect(),
        today: snapshot,
        weekly_trend: weekly_trend(today, week.iter().map(|r| (r.date, r.present))),
    })
}

pub async fn attendance_overview(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_overview(storage).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Attendance overview retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to load attendance",
        )),
    }
}
