use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::GradeService;
use super::aggregate::{progress_series, summarize_scores};
use crate::errors::{EduSystemError, Result};
use crate::models::grades::requests::{GradeReportFilter, UpsertGrade};
use crate::models::grades::responses::{GradeReport, GradeUpsertResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

async fn save_grade(storage: Arc<dyn Storage>, grade: UpsertGrade) -> Result<GradeUpsertResponse> {
    if storage.get_student_by_id(grade.student_id).await?.is_none() {
        return Err(EduSystemError::not_found("Student not found"));
    }
    if storage.get_course_by_id(grade.course_id).await?.is_none() {
        return Err(EduSystemError::not_found("Course not found"));
    }

    let (grade, created) = storage.upsert_grade(grade).await?;
    Ok(GradeUpsertResponse { grade, created })
}

pub async fn add_grade(
    service: &GradeService,
    student_id: Option<String>,
    course_id: Option<String>,
    score: Option<String>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let grade = match UpsertGrade::from_form(student_id, course_id, score) {
        Ok(grade) => grade,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::GradeInvalid,
                "Failed to save grade",
            ));
        }
    };

    let storage = service.get_storage(request);
    match save_grade(storage, grade).await {
        Ok(response) if response.created => {
            info!(
                "Grade created for student {} in course {}",
                response.grade.student_id, response.grade.course_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Grade added successfully")))
        }
        Ok(response) => {
            info!(
                "Grade updated for student {} in course {}",
                response.grade.student_id, response.grade.course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Grade updated successfully")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::GradeSaveFailed,
            "Failed to save grade",
        )),
    }
}

async fn build_report(storage: Arc<dyn Storage>, filter: GradeReportFilter) -> Result<GradeReport> {
    let grades = storage.list_grade_details(filter.clone()).await?;
    let scores: Vec<f64> = grades.iter().map(|g| g.score).collect();

    let progress_data = match filter.single_pair() {
        Some((student_id, course_id)) => {
            let history = storage.list_grade_history(student_id, course_id).await?;
            Some(progress_series(&history))
        }
        None => None,
    };

    Ok(GradeReport {
        stats: summarize_scores(&scores),
        grades,
        progress_data,
    })
}

pub async fn generate_report(
    service: &GradeService,
    student_id: Option<String>,
    course_id: Option<String>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let filter = match GradeReportFilter::from_form(student_id, course_id) {
        Ok(filter) => filter,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::GradeInvalid,
                "Failed to generate report",
            ));
        }
    };

    let storage = service.get_storage(request);
    match build_report(storage, filter).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Report generated successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::GradeReportFailed,
            "Failed to generate report",
        )),
    }
}
