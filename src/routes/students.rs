use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{CreateStudentForm, StudentListQuery};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(query.into_inner(), &req)
        .await
}

pub async fn create_student(
    req: HttpRequest,
    form: web::Form<CreateStudentForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(form.into_inner(), &req)
        .await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(student_id.0, &req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .route("/{id}", web::get().to(get_student)),
    );
}
