use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, ttl: {}s",
            max_capacity, ttl_secs
        );
        Self { inner }
    }

    /// 按全局配置创建
    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self::new(config.cache.memory.max_capacity, config.cache.default_ttl)
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String) {
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new(100, 60);
        assert_eq!(cache.get_raw("session:a").await, CacheResult::NotFound);

        cache
            .insert_raw("session:a".to_string(), "{\"id\":1}".to_string())
            .await;
        assert_eq!(
            cache.get_raw("session:a").await,
            CacheResult::Found("{\"id\":1}".to_string())
        );

        cache.remove("session:a").await;
        assert_eq!(cache.get_raw("session:a").await, CacheResult::NotFound);
    }
}
