use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::StudentListQuery, responses::StudentListResponse},
};

pub async fn list_students(
    service: &StudentService,
    query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students(query.search).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to retrieve students",
        )),
    }
}
