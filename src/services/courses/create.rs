use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{requests::CreateCourseForm, responses::CourseResponse},
};

pub async fn create_course(
    service: &CourseService,
    form: CreateCourseForm,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_course = match form.validate() {
        Ok(course) => course,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::CourseInvalid,
                "Failed to create course",
            ));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_course(new_course).await {
        Ok(course) => {
            info!("Course '{}' created (ID: {})", course.name, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CourseResponse { course },
                "Course created successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::CourseCreationFailed,
            "Failed to create course",
        )),
    }
}
