pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::CreateCourseForm;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        form: CreateCourseForm,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, form, request).await
    }

    // 根据ID获取课程
    pub async fn get_course(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }
}
