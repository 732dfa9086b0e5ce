use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::info;

use super::AttendanceService;
use crate::errors::{EduSystemError, Result};
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::attendance::responses::{BulkMarkResponse, MarkAttendanceResponse};
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::dates::{parse_date, today};
use crate::utils::form::{non_empty, parse_optional_id};

async fn mark_today(
    storage: Arc<dyn Storage>,
    student_id: i64,
    status: AttendanceStatus,
) -> Result<(Student, MarkAttendanceResponse)> {
    let student = storage
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))?;

    let attendance = storage
        .upsert_attendance(student.id, today(), status.is_present())
        .await?;

    Ok((student, MarkAttendanceResponse { attendance }))
}

/// 记录单个学生今天的考勤
pub async fn mark_attendance(
    service: &AttendanceService,
    student_id: Option<String>,
    status: Option<String>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let parsed = parse_optional_id(student_id, "studentId").and_then(|id| {
        let id = id.ok_or_else(|| EduSystemError::validation("Student is required"))?;
        Ok((id, AttendanceStatus::from_form(status)?))
    });
    let (student_id, status) = match parsed {
        Ok(v) => v,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::AttendanceInvalid,
                "Failed to mark attendance",
            ));
        }
    };

    let storage = service.get_storage(request);
    match mark_today(storage, student_id, status).await {
        Ok((student, response)) => {
            let message = format!("Marked {} as {}", student.full_name(), status.as_str());
            info!("{}", message);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::AttendanceMarkFailed,
            "Failed to mark attendance",
        )),
    }
}

/// 为所有学生记录某天的考勤
///
/// 每个学生一次 upsert 并发执行，任一失败即整体失败，已写入的记录不回滚。
async fn mark_all(
    storage: Arc<dyn Storage>,
    date: chrono::NaiveDate,
    status: AttendanceStatus,
) -> Result<i64> {
    let students = storage.list_students(None).await?;
    let present = status.is_present();

    let marked = try_join_all(
        students
            .iter()
            .map(|student| storage.upsert_attendance(student.id, date, present)),
    )
    .await?;

    Ok(marked.len() as i64)
}

pub async fn mark_bulk(
    service: &AttendanceService,
    bulk_date: Option<String>,
    status_all: Option<String>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let parsed = non_empty(bulk_date)
        .ok_or_else(|| EduSystemError::validation("Date is required for bulk attendance marking"))
        .and_then(|d| parse_date(&d))
        .and_then(|date| Ok((date, AttendanceStatus::from_form(status_all)?)));
    let (date, status) = match parsed {
        Ok(v) => v,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::AttendanceInvalid,
                "Failed to mark bulk attendance",
            ));
        }
    };

    let storage = service.get_storage(request);
    match mark_all(storage, date, status).await {
        Ok(marked) => {
            let message = format!(
                "Marked all {} students as {} for {}",
                marked,
                status.as_str(),
                date
            );
            info!("{}", message);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkMarkResponse {
                    date,
                    status,
                    marked,
                },
                message,
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::AttendanceMarkFailed,
            "Failed to mark bulk attendance",
        )),
    }
}
