use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::GradeActionForm;
use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn grade_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.overview(&req).await
}

pub async fn grade_action(
    req: HttpRequest,
    form: web::Form<GradeActionForm>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.handle_action(form.into_inner(), &req).await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireSession)
            .route("", web::get().to(grade_overview))
            .route("", web::post().to(grade_action)),
    );
}
