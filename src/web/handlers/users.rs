use actix_web::{HttpRequest, Responder, get, web};

use koji_admin::models::UserProfile;
use koji_admin::services::{CollectionBrowser, filter};

use crate::web::forms::SearchQuery;
use crate::web::helpers::render;
use crate::web::nav::Shell;
use crate::web::session::AdminSession;
use crate::web::state::AppState;
use crate::web::templates::UsersTemplate;

#[get("/users")]
pub async fn users_list(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let listing = CollectionBrowser::new(state.backend.as_ref(), &session.token)
        .newest_first::<UserProfile>()
        .await;
    let (users, error) = match listing {
        Ok(users) => (users, None),
        Err(e) => {
            log::error!("Failed to list users: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    render(UsersTemplate {
        shell: Shell::new(&session, req.path()),
        users: filter(&users, query.term()),
        total: users.len(),
        query: query.term(),
        error,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users_list);
}
