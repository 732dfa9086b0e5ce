use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::responses::CourseListResponse};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseListResponse { items },
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to retrieve courses",
        )),
    }
}
