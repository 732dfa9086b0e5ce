use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::config::AppConfig;
use crate::models::courses::entities::BillingType;
use crate::models::courses::requests::NewCourse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建 admin@example.com
async fn seed_admin(storage: &Arc<dyn Storage>, password: Option<String>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用 ADMIN_PASSWORD，否则生成随机密码
    let password = password.filter(|p| !p.is_empty()).unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        role: UserRole::Admin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

fn demo_courses() -> Vec<NewCourse> {
    let start_date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default();
    let end_date = NaiveDate::from_ymd_opt(2025, 12, 15);

    [
        ("Mathematics 101", "Introduction to algebra and geometry"),
        ("English Literature", "Classic and modern literature"),
        (
            "Computer Science Fundamentals",
            "Programming and computational thinking",
        ),
    ]
    .into_iter()
    .map(|(name, description)| NewCourse {
        name: name.to_string(),
        description: Some(description.to_string()),
        start_date,
        end_date,
        price: None,
        currency: "USD".to_string(),
        billing_type: BillingType::OneTime,
    })
    .collect()
}

/// 课程表为空时写入演示课程
async fn seed_demo_courses(storage: &Arc<dyn Storage>) {
    match storage.count_courses().await {
        Ok(0) => {}
        Ok(count) => {
            debug!("Database already has {} course(s), skipping demo seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count courses: {}, skipping demo seed", e);
            return;
        }
    }

    for course in demo_courses() {
        let name = course.name.clone();
        if let Err(e) = storage.create_course(course).await {
            warn!("Failed to create demo course '{}': {}", name, e);
        }
    }
    info!("Demo courses created");
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和初始数据
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage, std::env::var("ADMIN_PASSWORD").ok()).await;

    if config.app.seed_demo_data {
        seed_demo_courses(&storage).await;
    }

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::from_config());
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::password::verify_password;

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_seed_admin_once() {
        let storage = storage().await;
        seed_admin(&storage, Some("adminpassword".to_string())).await;
        seed_admin(&storage, Some("other".to_string())).await;

        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage
            .get_user_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());
        assert!(verify_password("adminpassword", &admin.password_hash));
    }

    #[tokio::test]
    async fn test_seed_admin_generates_password() {
        let storage = storage().await;
        seed_admin(&storage, None).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_demo_courses_only_when_empty() {
        let storage = storage().await;
        seed_demo_courses(&storage).await;
        seed_demo_courses(&storage).await;

        let courses = storage.list_courses().await.unwrap();
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Computer Science Fundamentals",
                "English Literature",
                "Mathematics 101"
            ]
        );
        assert_eq!(
            courses[0].end_date,
            NaiveDate::from_ymd_opt(2025, 12, 15)
        );
    }

    #[test]
    fn test_random_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
    }
}
