//! 对象缓存
//!
//! 目前只缓存会话令牌对应的用户，值以 JSON 字符串存放。

pub mod object_cache;

use async_trait::async_trait;

pub use object_cache::moka::MokaCacheWrapper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String);
    async fn remove(&self, key: &str);
}

/// 会话用户的缓存键
pub fn session_user_key(token: &str) -> String {
    format!("session:{token}")
}
