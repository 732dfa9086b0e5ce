use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireSession;
use crate::models::{ApiResponse, ErrorCode, auth::responses::UserInfoResponse};

pub async fn handle_get_user(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireSession::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Current user",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}
