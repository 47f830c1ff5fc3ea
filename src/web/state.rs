use std::sync::Arc;

use koji_admin::backend::Backend;
use koji_admin::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, config: &Config) -> Self {
        Self {
            backend,
            cookie_secure: config.cookie_secure,
        }
    }
}
