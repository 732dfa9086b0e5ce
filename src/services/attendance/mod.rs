pub mod aggregate;
pub mod mark;
pub mod overview;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::AttendanceActionForm;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 考勤页面数据：学生当天状态、当天快照与周趋势
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::attendance_overview(self, request).await
    }

    // 考勤页面表单动作
    pub async fn handle_action(
        &self,
        form: AttendanceActionForm,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match form {
            AttendanceActionForm::Mark { student_id, status } => {
                mark::mark_attendance(self, student_id, status, request).await
            }
            AttendanceActionForm::MarkBulk {
                bulk_date,
                status_all,
            } => mark::mark_bulk(self, bulk_date, status_all, request).await,
            AttendanceActionForm::GenerateReport {
                start_date,
                end_date,
            } => report::generate_report(self, start_date, end_date, request).await,
        }
    }
}
