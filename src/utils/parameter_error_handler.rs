use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError, UrlencodedError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(kind: &str, detail: String) -> actix_web::Error {
    debug!("{} payload rejected: {}", kind, detail);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid {kind} payload: {detail}"),
    ));
    InternalError::from_response(detail, response).into()
}

// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("JSON", err.to_string())
}

// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("query", err.to_string())
}

// 表单请求体解析失败（包括未知的 action）
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("form", err.to_string())
}
