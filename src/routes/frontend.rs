//! 前端静态资源路由
//!
//! 使用 rust-embed 嵌入前端构建产物，支持：
//! - SPA fallback（未找到的路由返回 index.html）
//! - 自定义前端目录覆盖（开发用）
//! - 页面访问控制（未登录跳转登录页，非管理员不能进入管理页面）
//! - %BASE_PATH% 占位符替换

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use rust_embed::Embed;
use std::path::Path;

use crate::middlewares::require_session::resolve_session_user;
use crate::utils::validate::is_safe_redirect_path;

const LOGIN_PAGE: &str = "/login";

/// 仅管理员可访问的页面
const ADMIN_PAGES: &[&str] = &["/students/new", "/courses/new"];

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "webp" => "image/webp",
        "webm" => "video/webm",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        "map" => "application/json",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    // 静态资源（带 hash 的）可以长期缓存
    matches!(
        ext,
        "js" | "css"
            | "woff"
            | "woff2"
            | "ttf"
            | "eot"
            | "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "svg"
            | "webp"
    )
}

/// 处理 HTML 文件中的占位符替换
fn process_html(content: &[u8]) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);
    html.replace("%BASE_PATH%", "").into_bytes()
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    let custom_path = format!("./frontend-custom/{}", path);
    std::fs::read(&custom_path).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| get_embedded_file(path))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 未登录时的登录页地址，路径合法时附带 redirectTo
fn login_location(page_path: &str) -> String {
    if is_safe_redirect_path(page_path) {
        format!("{LOGIN_PAGE}?redirectTo={page_path}")
    } else {
        LOGIN_PAGE.to_string()
    }
}

/// 页面访问控制，需要跳转时返回 303 响应
async fn guard_page(req: &HttpRequest, page_path: &str) -> Option<HttpResponse> {
    let user = resolve_session_user(req).await.ok();
    let page = page_path.trim_end_matches('/');

    match user {
        // 已登录用户访问登录页时回到首页
        Some(_) if page == LOGIN_PAGE => Some(see_other("/")),
        Some(user) if ADMIN_PAGES.contains(&page) && !user.is_admin() => Some(see_other("/")),
        Some(_) => None,
        None if page == LOGIN_PAGE => None,
        None => Some(see_other(&login_location(page_path))),
    }
}

/// 前端资源请求处理
pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // 静态资源直接返回，其余路径视为页面
    let asset = if path.is_empty() || path == "index.html" {
        None
    } else {
        get_file(path)
    };

    let (content, file_path) = match asset {
        Some(content) => (Some(content), path),
        None => {
            if let Some(redirect) = guard_page(&req, &format!("/{path}")).await {
                return Ok(redirect);
            }
            // SPA fallback: 页面路由返回 index.html
            (get_file("index.html"), "index.html")
        }
    };

    match content {
        Some(mut data) => {
            let mime = get_mime_type(file_path);

            // 处理 HTML 文件中的占位符
            if mime.starts_with("text/html") {
                data = process_html(&data);
            }

            let mut response = HttpResponse::Ok();
            response.content_type(mime);

            // 设置缓存头
            if should_cache(file_path) {
                response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
            } else {
                response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
            }

            Ok(response.body(data))
        }
        None => {
            // 如果连 index.html 都没有，返回一个简单的提示
            Ok(HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(
                    r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>EduSystem</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The frontend assets have not been built or embedded.</p>
    <p>Please build the frontend first:</p>
    <pre>cd frontend && npm run build</pre>
</body>
</html>"#,
                ))
        }
    }
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    // 所有非 API 路由都交给前端处理
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("image.png"), "image/png");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_login_location() {
        assert_eq!(login_location("/grades"), "/login?redirectTo=/grades");
        assert_eq!(login_location("/"), "/login?redirectTo=/");
        assert_eq!(login_location("/a b"), "/login");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("app.js"));
        assert!(should_cache("style.css"));
        assert!(should_cache("logo.png"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("manifest.json"));
    }

    mod guard {
        use super::super::configure_frontend_routes;
        use crate::routes::test_support::TestContext;
        use actix_web::{App, http::StatusCode, http::header, test};

        #[actix_web::test]
        async fn test_unauthenticated_page_redirects_to_login() {
            let ctx = TestContext::new().await;
            let app =
                test::init_service(ctx.app(App::new()).configure(configure_frontend_routes))
                    .await;

            let req = test::TestRequest::get().uri("/attendance").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                resp.headers().get(header::LOCATION).unwrap(),
                "/login?redirectTo=/attendance"
            );

            let req = test::TestRequest::get().uri("/login").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        #[actix_web::test]
        async fn test_admin_pages_require_admin() {
            let ctx = TestContext::new().await;
            let teacher = ctx.teacher().await;
            let admin = ctx.admin().await;
            let app =
                test::init_service(ctx.app(App::new()).configure(configure_frontend_routes))
                    .await;

            let req = test::TestRequest::get()
                .uri("/students/new")
                .cookie(TestContext::session_cookie(&teacher))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

            let req = test::TestRequest::get()
                .uri("/students/new")
                .cookie(TestContext::session_cookie(&admin))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let req = test::TestRequest::get()
                .uri("/grades")
                .cookie(TestContext::session_cookie(&teacher))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
