use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::error;
use ts_rs::TS;

use crate::errors::EduSystemError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将业务错误转换为 HTTP 响应
    ///
    /// 校验失败返回 400 并原样展示消息，资源不存在返回 404；
    /// 其余错误记录日志后只返回通用的 `failure` 消息。
    pub fn from_error(err: &EduSystemError, code: ErrorCode, failure: &str) -> HttpResponse {
        match err {
            EduSystemError::Validation(msg) | EduSystemError::DateParse(msg) => {
                HttpResponse::BadRequest().json(Self::error_empty(code, msg.as_str()))
            }
            EduSystemError::NotFound(msg) => {
                HttpResponse::NotFound().json(Self::error_empty(ErrorCode::NotFound, msg.as_str()))
            }
            _ => {
                error!("{}: {}", failure, err);
                HttpResponse::InternalServerError().json(Self::error_empty(code, failure))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_from_error_status() {
        let resp = ApiResponse::from_error(
            &EduSystemError::validation("All fields are required"),
            ErrorCode::GradeInvalid,
            "Failed to save grade",
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiResponse::from_error(
            &EduSystemError::not_found("Student not found"),
            ErrorCode::GradeInvalid,
            "Failed to save grade",
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiResponse::from_error(
            &EduSystemError::database_operation("disk I/O error"),
            ErrorCode::GradeSaveFailed,
            "Failed to save grade",
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_serialization() {
        let json = serde_json::to_value(ApiResponse::success(3_i64, "ok")).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 3);

        let json = serde_json::to_value(ApiResponse::error_empty(ErrorCode::NotFound, "x")).unwrap();
        assert_eq!(json["code"], 1004);
        assert!(json.get("data").is_none());
    }
}
