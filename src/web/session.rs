use actix_web::body::{EitherBody, MessageBody};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse, web};

use koji_admin::backend::{AccessToken, AuthUser, Session};

use crate::web::helpers::is_htmx;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "koji_session";
pub const LOGIN_PATH: &str = "/auth/login";

/// Used when the backend does not say how long a token lives.
const FALLBACK_SESSION_SECS: i64 = 60 * 60;

/// The signed-in administrator behind a dashboard request.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: AccessToken,
    pub user: AuthUser,
}

pub fn session_token(req: &HttpRequest) -> Option<AccessToken> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .map(AccessToken::new)
}

pub fn login_redirect(req: &HttpRequest) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Unauthorized()
            .insert_header(("HX-Redirect", LOGIN_PATH))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .finish()
    }
}

/// Resolves the session cookie to a live user, or the response sending the
/// visitor to the login page. Nothing under `/dashboard` renders without it.
pub async fn require_session(
    req: &HttpRequest,
    state: &AppState,
) -> Result<AdminSession, HttpResponse> {
    let Some(token) = session_token(req) else {
        return Err(login_redirect(req));
    };

    match state.backend.get_current_user(&token).await {
        Ok(Some(user)) => Ok(AdminSession { token, user }),
        Ok(None) => Err(login_redirect(req)),
        Err(e) => {
            log::warn!("Session check failed ({:?}): {}", e.status(), e);
            Err(login_redirect(req))
        }
    }
}

/// Gate for the `/dashboard` scope. Runs before any handler extractor, so a
/// visitor without a live session never sees a body or path error, only the
/// login redirect. The resolved [`AdminSession`] is left in the request
/// extensions for `web::ReqData`.
pub async fn session_gate(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, Error> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        log::error!("Application state missing for {}", req.path());
        return Err(actix_web::error::ErrorInternalServerError(
            "application state is not configured",
        ));
    };

    match require_session(req.request(), &state).await {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        }
        Err(resp) => Ok(req.into_response(resp).map_into_right_body()),
    }
}

pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    let lifetime = session
        .expires_in
        .and_then(|secs| i64::try_from(secs).ok())
        .unwrap_or(FALLBACK_SESSION_SECS);

    Cookie::build(SESSION_COOKIE, session.access_token.as_str().to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(lifetime))
        .finish()
}

pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}
