use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::AttendanceActionForm;
use crate::services::AttendanceService;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn attendance_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.overview(&req).await
}

pub async fn attendance_action(
    req: HttpRequest,
    form: web::Form<AttendanceActionForm>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .handle_action(form.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireSession)
            .route("", web::get().to(attendance_overview))
            .route("", web::post().to(attendance_action)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestContext, read_json};
    use crate::utils::dates::today;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_mark_twice_keeps_single_record() {
        let ctx = TestContext::new().await;
        let teacher = ctx.teacher().await;
        let ada = ctx.add_student("Ada", "Lovelace").await;
        ctx.add_student("Alan", "Turing").await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_attendance_routes)).await;

        let ada_id = ada.id.to_string();
        for status in ["present", "absent"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/attendance")
                .cookie(TestContext::session_cookie(&teacher))
                .set_form([
                    ("action", "mark"),
                    ("studentId", ada_id.as_str()),
                    ("status", status),
                ])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body = read_json(resp).await;
            assert_eq!(
                body["message"],
                format!("Marked Ada Lovelace as {status}")
            );
        }

        let records = ctx
            .storage
            .list_attendance_on(today())
            .await
            .expect("attendance");
        assert_eq!(records.len(), 1);
        assert!(!records[0].present);

        let req = test::TestRequest::get()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        let data = &body["data"];
        assert_eq!(data["today"]["present"], 0);
        assert_eq!(data["today"]["absent"], 1);
        assert_eq!(data["today"]["notMarked"], 1);
        assert_eq!(data["weeklyTrend"].as_array().map(Vec::len), Some(7));
        assert_eq!(data["weeklyTrend"][6]["absent"], 1);

        let statuses: Vec<&str> = data["students"]
            .as_array()
            .expect("students")
            .iter()
            .filter_map(|s| s["status"].as_str())
            .collect();
        assert_eq!(statuses, vec!["absent", "not_marked"]);
    }

    #[actix_web::test]
    async fn test_mark_invalid_status() {
        let ctx = TestContext::new().await;
        let teacher = ctx.teacher().await;
        let ada = ctx.add_student("Ada", "Lovelace").await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_attendance_routes)).await;

        let ada_id = ada.id.to_string();
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([
                ("action", "mark"),
                ("studentId", ada_id.as_str()),
                ("status", "late"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([("action", "mark"), ("studentId", "4242")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_bulk_mark_and_report() {
        let ctx = TestContext::new().await;
        let teacher = ctx.teacher().await;
        ctx.add_student("Ada", "Lovelace").await;
        ctx.add_student("Alan", "Turing").await;
        let app =
            test::init_service(ctx.app(App::new()).configure(configure_attendance_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([("action", "mark-bulk"), ("bulkDate", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(
            body["message"],
            "Date is required for bulk attendance marking"
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([
                ("action", "mark-bulk"),
                ("bulkDate", "2025-10-01"),
                ("statusAll", "absent"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["data"]["marked"], 2);
        assert_eq!(
            body["message"],
            "Marked all 2 students as absent for 2025-10-01"
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([
                ("action", "generate-report"),
                ("startDate", "2025-10-01"),
                ("endDate", "2025-10-01"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["data"]["records"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["data"]["dateStats"][0]["absent"], 2);
        assert_eq!(body["data"]["dateStats"][0]["total"], 2);

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(TestContext::session_cookie(&teacher))
            .set_form([
                ("action", "generate-report"),
                ("startDate", "2025-10-02"),
                ("endDate", "2025-10-01"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
