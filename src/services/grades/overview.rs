use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::GradeService;
use super::aggregate::{course_averages, grade_distribution, student_averages};
use crate::errors::Result;
use crate::models::grades::requests::GradeReportFilter;
use crate::models::grades::responses::GradeOverviewResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

async fn load_overview(storage: Arc<dyn Storage>) -> Result<GradeOverviewResponse> {
    let students = storage.list_students(None).await?;
    let courses = storage.list_courses().await?;
    let grades = storage
        .list_grade_details(GradeReportFilter::default())
        .await?;

    Ok(GradeOverviewResponse {
        course_averages: course_averages(&grades, &courses),
        student_averages: student_averages(&grades, &students),
        grade_distribution: grade_distribution(grades.iter().map(|g| g.score)),
        students,
        courses,
        grades,
    })
}

pub async fn grade_overview(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_overview(storage).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Grade overview retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to load grades",
        )),
    }
}
