use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::CreateStudentForm, responses::StudentResponse},
};

pub async fn create_student(
    service: &StudentService,
    form: CreateStudentForm,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_student = match form.validate() {
        Ok(student) => student,
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::StudentInvalid,
                "Failed to create student",
            ));
        }
    };

    let storage = service.get_storage(request);

    // 邮箱唯一
    match storage.get_student_by_email(&new_student.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "A student with this email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(ApiResponse::from_error(
                &e,
                ErrorCode::StudentCreationFailed,
                "Failed to create student",
            ));
        }
    }

    match storage.create_student(new_student).await {
        Ok(student) => {
            info!("Student {} created (ID: {})", student.full_name(), student.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse { student },
                "Student created successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::StudentCreationFailed,
            "Failed to create student",
        )),
    }
}
