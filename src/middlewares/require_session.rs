/*!
 * 会话认证中间件
 *
 * 从会话 Cookie 中读取令牌并校验，成功后把当前用户放入请求扩展。
 * 用于 API 作用域：未登录时返回 401 JSON。页面路由的跳转逻辑见 `routes::frontend`。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireSession)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * 处理程序中用 `RequireSession::extract_user(&req)` 取出用户。
 */

use crate::cache::{CacheResult, ObjectCache, session_user_key};
use crate::config::AppConfig;
use crate::models::{ErrorCode, users::entities};
use crate::storage::Storage;
use crate::utils::session::SessionUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireSession;

/// 读取请求中的会话令牌
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(&AppConfig::get().session.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析会话令牌对应的用户，优先查缓存
pub async fn resolve_session_user(req: &HttpRequest) -> Result<entities::User, String> {
    let token = session_token(req).ok_or_else(|| "Missing session cookie".to_string())?;

    let claims = SessionUtils::verify_token(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        "Invalid or expired session".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let cache_key = session_user_key(&token);

    if let Some(cache) = &cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
                Ok(user) => return Ok(user),
                Err(_) => {
                    cache.remove(&cache_key).await;
                    info!("Failed to deserialize cached session user");
                }
            },
            CacheResult::NotFound => debug!("Session user not cached"),
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in session".to_string())?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    // 缓存中不含密码哈希（序列化时跳过）
    if let Some(cache) = &cache
        && let Ok(user_json) = serde_json::to_string(&user)
    {
        cache.insert_raw(cache_key, user_json).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match resolve_session_user(req.request()).await {
                Ok(user) => {
                    debug!("Session authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireSession {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了 RequireSession 中间件的路由处理程序中使用
    pub fn extract_user(req: &HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }
}
