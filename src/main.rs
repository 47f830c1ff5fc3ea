mod web;

use std::sync::Arc;

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer, middleware};
use tracing_subscriber::EnvFilter;

use koji_admin::backend::{Backend, SupabaseClient};
use koji_admin::config::Config;

use web::middleware::SecurityHeaders;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let backend: Arc<dyn Backend> =
        Arc::new(SupabaseClient::from_config(&config));
    let state = Data::new(web::AppState::new(backend, &config));
    let static_dir = config.static_dir.clone();

    log::info!(
        "Koji admin listening on {} (backend {})",
        config.bind_addr,
        config.supabase_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(web::handlers::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
