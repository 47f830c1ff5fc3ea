use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use koji_admin::backend::Session;
use koji_admin::services::CredentialFlow;

use crate::web::forms::CredentialsForm;
use crate::web::helpers::{redirect, render};
use crate::web::session::{
    LOGIN_PATH, removal_cookie, session_cookie, session_token,
};
use crate::web::state::AppState;
use crate::web::templates::{LoginTemplate, SignupTemplate};

const LANDING_PATH: &str = "/dashboard";

fn establish(
    req: &HttpRequest,
    state: &AppState,
    session: &Session,
) -> HttpResponse {
    let mut resp = redirect(req, LANDING_PATH);
    if let Err(e) =
        resp.add_cookie(&session_cookie(session, state.cookie_secure))
    {
        log::error!("Failed to set session cookie: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    resp
}

#[get("/auth/login")]
pub async fn login_form() -> impl Responder {
    render(LoginTemplate {
        email: String::new(),
        error: None,
    })
}

#[post("/auth/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CredentialsForm>,
) -> impl Responder {
    let flow = CredentialFlow::new(state.backend.as_ref());

    match flow.sign_in(&form.email, &form.password).await {
        Ok(session) => establish(&req, &state, &session),
        Err(e) => {
            log::warn!("Sign-in rejected: {}", e);
            render(LoginTemplate {
                email: form.email.trim().to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[get("/auth/signup")]
pub async fn signup_form() -> impl Responder {
    render(SignupTemplate {
        email: String::new(),
        error: None,
    })
}

#[post("/auth/signup")]
pub async fn signup_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CredentialsForm>,
) -> impl Responder {
    let flow = CredentialFlow::new(state.backend.as_ref());

    match flow.sign_up(&form.email, &form.password).await {
        Ok(session) => establish(&req, &state, &session),
        Err(e) => {
            log::warn!("Sign-up rejected: {}", e);
            render(SignupTemplate {
                email: form.email.trim().to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

/// Ends the session locally even when the backend cannot be reached.
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    if let Some(token) = session_token(&req) {
        if let Err(e) = state.backend.sign_out(&token).await {
            log::warn!("Backend sign-out failed: {}", e);
        }
    }

    let mut resp = redirect(&req, LOGIN_PATH);
    if let Err(e) = resp.add_cookie(&removal_cookie(state.cookie_secure)) {
        log::error!("Failed to clear session cookie: {}", e);
    }
    resp
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(signup_form)
        .service(signup_submit)
        .service(logout);
}
