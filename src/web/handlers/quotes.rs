use actix_web::{HttpRequest, Responder, get, web};

use koji_admin::models::Quote;
use koji_admin::services::{CollectionBrowser, filter};

use crate::web::forms::SearchQuery;
use crate::web::helpers::render;
use crate::web::nav::Shell;
use crate::web::session::AdminSession;
use crate::web::state::AppState;
use crate::web::templates::QuotesTemplate;

#[get("/quotes")]
pub async fn quotes_list(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let listing = CollectionBrowser::new(state.backend.as_ref(), &session.token)
        .newest_first::<Quote>()
        .await;
    let (quotes, error) = match listing {
        Ok(quotes) => (quotes, None),
        Err(e) => {
            log::error!("Failed to list quotes: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    render(QuotesTemplate {
        shell: Shell::new(&session, req.path()),
        quotes: filter(&quotes, query.term()),
        total: quotes.len(),
        query: query.term(),
        error,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(quotes_list);
}
