//! 路由测试辅助：内存数据库、会话 Cookie 与应用装配

use actix_web::{
    App,
    body::MessageBody,
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use std::sync::Arc;

use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::models::{
    courses::entities::Course,
    students::entities::Student,
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::{
    Storage,
    sea_orm_storage::{SeaOrmStorage, new_course, new_student},
};
use crate::utils::{form_error_handler, password::hash_password, session::SessionUtils};

pub(crate) struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::new_in_memory()
            .await
            .expect("in-memory storage");
        Self {
            storage: Arc::new(storage),
            cache: Arc::new(MokaCacheWrapper::new(100, 60)),
        }
    }

    /// 注入存储、缓存和表单错误处理器
    pub fn app<T>(&self, app: App<T>) -> App<T>
    where
        T: ServiceFactory<
                ServiceRequest,
                Config = (),
                Error = actix_web::Error,
                InitError = (),
            >,
    {
        app.app_data(web::FormConfig::default().error_handler(form_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.cache.clone()))
    }

    pub async fn create_user(&self, email: &str, password: &str, role: UserRole) -> User {
        self.storage
            .create_user(CreateUserRequest {
                email: email.to_string(),
                password_hash: hash_password(password).expect("hash"),
                role,
            })
            .await
            .expect("create user")
    }

    pub async fn admin(&self) -> User {
        self.create_user("admin@example.com", "adminpassword", UserRole::Admin)
            .await
    }

    pub async fn teacher(&self) -> User {
        self.create_user("teacher@example.com", "teacherpassword", UserRole::User)
            .await
    }

    pub async fn add_student(&self, first: &str, last: &str) -> Student {
        self.storage
            .create_student(new_student(first, last))
            .await
            .expect("create student")
    }

    pub async fn add_course(&self, name: &str) -> Course {
        self.storage
            .create_course(new_course(name))
            .await
            .expect("create course")
    }

    pub fn session_cookie(user: &User) -> Cookie<'static> {
        let token = SessionUtils::issue_token(
            user.id,
            &user.role.to_string(),
            chrono::Duration::hours(1),
        )
        .expect("issue token");
        SessionUtils::create_session_cookie(&token, false)
    }
}

pub(crate) async fn read_json<B>(resp: ServiceResponse<B>) -> serde_json::Value
where
    B: MessageBody,
{
    let bytes = actix_web::test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("json body")
}
