pub mod actions;
pub mod aggregate;
pub mod overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::GradeActionForm;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 成绩页面数据：学生、课程、成绩列表及图表聚合
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::grade_overview(self, request).await
    }

    // 成绩页面表单动作
    pub async fn handle_action(
        &self,
        form: GradeActionForm,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match form {
            GradeActionForm::AddGrade {
                student_id,
                course_id,
                score,
            } => actions::add_grade(self, student_id, course_id, score, request).await,
            GradeActionForm::GenerateReport {
                report_student_id,
                report_course_id,
            } => {
                actions::generate_report(self, report_student_id, report_course_id, request).await
            }
        }
    }
}
