use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AttendanceService;
use super::aggregate::date_stats;
use crate::errors::Result;
use crate::models::attendance::requests::DateRange;
use crate::models::attendance::responses::AttendanceReport;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

async fn build_report(storage: Arc<dyn Storage>, range: DateRange) -> Result<AttendanceReport> {
    let records = storage
        .list_attendance_between(range.start, range.end)
        .await?;

    Ok(AttendanceReport {
        start_date: range.start,
        end_date: range.end,
        date_stats: date_stats(records.iter().map(|r| (r.date, r.present))),
        records,
    })
}

/// 生成闭区间 [start, end] 的考勤报表
pub async fn generate_report(
    service: &AttendanceService,
    start_date: Option<String>,
    end_date: Option<String>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let range = match DateRange::from_form(start_date, end_date) {
        Ok(range) => range,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::AttendanceInvalid,
                "Failed to generate attendance report",
            ));
        }
    };

    let storage = service.get_storage(request);
    match build_report(storage, range).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Attendance report generated successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::AttendanceReportFailed,
            "Failed to generate attendance report",
        )),
    }
}
