use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::session_user_key;
use crate::middlewares::require_session::session_token;
use crate::models::ApiResponse;
use crate::utils::session::SessionUtils;

use super::AuthService;

/// 处理用户登出
/// 清除会话 Cookie，并移除缓存中的会话用户
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = session_token(request)
        && let Some(cache) = service.get_cache(request)
    {
        cache.remove(&session_user_key(&token)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(SessionUtils::create_empty_session_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
