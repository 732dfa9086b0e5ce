use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::CreateCourseForm;
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    form: web::Form<CreateCourseForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(form.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .route("/{id}", web::get().to(get_course)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestContext, read_json};
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_create_course_defaults() {
        let ctx = TestContext::new().await;
        let admin = ctx.admin().await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_course_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(TestContext::session_cookie(&admin))
            .set_form([
                ("name", "Mathematics 101"),
                ("startDate", "2025-09-01"),
                ("endDate", "2025-12-15"),
                ("price", "120.5"),
                ("billingType", "SOMETHING_ELSE"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = read_json(resp).await;
        assert_eq!(body["data"]["course"]["currency"], "USD");
        assert_eq!(body["data"]["course"]["billingType"], "ONE_TIME");

        let req = test::TestRequest::get()
            .uri("/api/v1/courses")
            .cookie(TestContext::session_cookie(&admin))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_create_course_validation() {
        let ctx = TestContext::new().await;
        let admin = ctx.admin().await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_course_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(TestContext::session_cookie(&admin))
            .set_form([("description", "no name")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(body["message"], "Course name and start date are required");
    }

    #[actix_web::test]
    async fn test_create_course_requires_admin() {
        let ctx = TestContext::new().await;
        let teacher = ctx.teacher().await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_course_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([("name", "Art"), ("startDate", "2025-09-01")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
