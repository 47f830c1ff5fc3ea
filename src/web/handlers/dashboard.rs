use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use koji_admin::services::StatsService;

use crate::web::helpers::render;
use crate::web::nav::Shell;
use crate::web::session::AdminSession;
use crate::web::state::AppState;
use crate::web::templates::DashboardTemplate;

#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/dashboard"))
        .finish()
}

#[get("")]
pub async fn overview(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    req: HttpRequest,
) -> impl Responder {
    let session = session.into_inner();
    let stats = StatsService::new(state.backend.as_ref(), &session.token)
        .load()
        .await;
    let (stats, error) = match stats {
        Ok(stats) => (Some(stats), None),
        Err(e) => {
            log::error!("Failed to load dashboard stats: {}", e);
            (None, Some(e.to_string()))
        }
    };

    render(DashboardTemplate {
        shell: Shell::new(&session, req.path()),
        stats,
        error,
    })
}

/// Registers the overview under the `/dashboard` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(overview);
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    use crate::web::handlers;
    use crate::web::session::SESSION_COOKIE;
    use crate::web::testing::{TOKEN, app_state, signed_in};

    const SOME_ID: &str = "0190a3c4-5b6e-7f00-8000-000000000001";

    #[actix_web::test]
    async fn test_dashboard_routes_require_session() {
        let (_, state) = app_state(signed_in());
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        for uri in [
            "/dashboard",
            "/dashboard/users",
            "/dashboard/quotes",
            "/dashboard/products",
            format!("/dashboard/products/{SOME_ID}/delete").as_str(),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(resp.headers().get("Location").unwrap(), "/auth/login");
        }
    }

    #[actix_web::test]
    async fn test_gate_runs_before_body_and_path_parsing() {
        let (backend, state) = app_state(signed_in());
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        let requests = [
            test::TestRequest::post()
                .uri("/dashboard/products")
                .set_json(json!({ "name": "Vis" })),
            test::TestRequest::post()
                .uri("/dashboard/products")
                .set_form([("name", "Vis"), ("price_ht", "1")]),
            test::TestRequest::post()
                .uri("/dashboard/products/not-a-uuid/delete")
                .set_form([("confirm", "yes")]),
            test::TestRequest::post()
                .uri(&format!("/dashboard/products/{SOME_ID}/delete"))
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{}"),
            test::TestRequest::post()
                .uri("/dashboard/products/image")
                .insert_header(("Content-Type", "text/plain"))
                .set_payload("pixels"),
        ];

        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(resp.headers().get("Location").unwrap(), "/auth/login");
        }
        assert_eq!(backend.calls().insert, 0);
        assert_eq!(backend.calls().delete, 0);
        assert_eq!(backend.calls().upload, 0);
    }

    #[actix_web::test]
    async fn test_stale_token_redirects_htmx_requests() {
        let (_, state) = app_state(signed_in());
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard/products")
            .insert_header(("HX-Request", "true"))
            .cookie(Cookie::new(SESSION_COOKIE, "expired"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("HX-Redirect").unwrap(), "/auth/login");
    }

    #[actix_web::test]
    async fn test_root_redirects_to_dashboard() {
        let (_, state) = app_state(signed_in());
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/dashboard");
    }

    #[actix_web::test]
    async fn test_overview_shows_counts_and_pending_value() {
        let backend = signed_in()
            .with_rows("users", vec![json!({}), json!({}), json!({})])
            .with_rows(
                "quotes",
                vec![
                    json!({ "status": "en_cours", "total_amount": 1200.5 }),
                    json!({ "status": "pending", "total_amount": "300" }),
                    json!({ "status": "accepte", "total_amount": 9000 }),
                ],
            );
        let (_, state) = app_state(backend);
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new(SESSION_COOKIE, TOKEN))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = std::str::from_utf8(&body).unwrap();

        assert!(body.contains("€1 500,50"), "{body}");
        assert!(body.contains(r#"<a href="/dashboard" class="active">"#));
    }

    #[actix_web::test]
    async fn test_overview_reports_backend_failure() {
        let backend = signed_in();
        backend.fail_queries("relation is unavailable");
        let (_, state) = app_state(backend);
        let app = test::init_service(
            App::new().app_data(state).configure(handlers::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new(SESSION_COOKIE, TOKEN))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert!(
            std::str::from_utf8(&body)
                .unwrap()
                .contains("relation is unavailable")
        );
    }
}
