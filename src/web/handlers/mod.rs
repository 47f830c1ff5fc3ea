pub mod auth;
pub mod dashboard;
pub mod products;
pub mod quotes;
pub mod users;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::web::session::session_gate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    cfg.service(dashboard::root).service(
        web::scope("/dashboard")
            .wrap(from_fn(session_gate))
            .configure(dashboard::configure)
            .configure(users::configure)
            .configure(quotes::configure)
            .configure(products::configure),
    );
}
