use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话 Claims，签名后存放在会话 Cookie 中
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // 用户角色
    pub exp: usize,   // Expiration time (时间戳)
    pub iat: usize,   // Issued at (签发时间)
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct SessionUtils;

impl SessionUtils {
    /// 会话有效期："记住我" 使用天数，否则使用小时数
    pub fn session_lifetime(remember: bool) -> chrono::Duration {
        let config = &AppConfig::get().session;
        if remember {
            chrono::Duration::days(config.remember_me_days)
        } else {
            chrono::Duration::hours(config.expiry_hours)
        }
    }

    /// 签发会话令牌
    pub fn issue_token(
        user_id: i64,
        role: &str,
        lifetime: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::issue_token_with_secret(&AppConfig::get().session.secret, user_id, role, lifetime)
    }

    fn issue_token_with_secret(
        secret: &str,
        user_id: i64,
        role: &str,
        lifetime: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (now + lifetime).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    /// 验证会话令牌（签名与过期时间）
    pub fn verify_token(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        Self::verify_token_with_secret(&AppConfig::get().session.secret, token)
    }

    fn verify_token_with_secret(
        secret: &str,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    /// 创建会话 Cookie；未勾选 "记住我" 时为浏览器会话 Cookie
    pub fn create_session_cookie(token: &str, remember: bool) -> Cookie<'static> {
        let config = AppConfig::get();
        let mut builder = Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production()); // 生产环境下使用 HTTPS

        if remember {
            builder = builder.max_age(actix_web::cookie::time::Duration::days(
                config.session.remember_me_days,
            ));
        }

        builder.finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_verify() {
        let token =
            SessionUtils::issue_token_with_secret(SECRET, 42, "ADMIN", chrono::Duration::hours(1))
                .unwrap();
        let claims = SessionUtils::verify_token_with_secret(SECRET, &token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "ADMIN");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            SessionUtils::issue_token_with_secret(SECRET, 7, "USER", chrono::Duration::hours(1))
                .unwrap();
        assert!(SessionUtils::verify_token_with_secret("other", &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            SessionUtils::issue_token_with_secret(SECRET, 7, "USER", chrono::Duration::hours(-2))
                .unwrap();
        assert!(SessionUtils::verify_token_with_secret(SECRET, &token).is_err());
    }
}
