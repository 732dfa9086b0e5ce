use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginForm, responses::LoginResponse},
};
use crate::utils::form::{checkbox, non_empty};
use crate::utils::password::verify_password;
use crate::utils::session::SessionUtils;
use crate::utils::validate::is_safe_redirect_path;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 登录后的跳转目标，非站内路径一律回到首页
fn sanitize_redirect(redirect_to: Option<String>) -> String {
    non_empty(redirect_to)
        .filter(|path| is_safe_redirect_path(path))
        .unwrap_or_else(|| "/".to_string())
}

pub async fn handle_login(
    service: &AuthService,
    form: LoginForm,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (Some(email), Some(password)) = (non_empty(form.email), non_empty(form.password)) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Email and password are required",
        )));
    };
    let email = email.trim().to_lowercase();
    let remember = checkbox(form.remember);
    let redirect_to = sanitize_redirect(form.redirect_to);

    let storage = service.get_storage(request);

    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) if verify_password(&password, &user.password_hash) => user,
        Ok(_) => {
            tracing::info!("Failed login attempt for {}", email);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load user for login: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    let lifetime = SessionUtils::session_lifetime(remember);
    let token = match SessionUtils::issue_token(user.id, &user.role.to_string(), lifetime) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to create session",
                )),
            );
        }
    };

    tracing::info!("User {} logged in (remember: {})", user.email, remember);

    let response = LoginResponse {
        user,
        redirect_to,
        expires_at: chrono::Utc::now() + lifetime,
    };

    Ok(HttpResponse::Ok()
        .cookie(SessionUtils::create_session_cookie(&token, remember))
        .json(ApiResponse::success(response, "Login successful")))
}
