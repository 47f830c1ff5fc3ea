//! Fixtures for handler tests, on top of the library's in-memory backend.

use std::sync::Arc;

use actix_web::web::Data;
use serde_json::{Value, json};
use uuid::Uuid;

use koji_admin::testing::MemoryBackend;

use crate::web::state::AppState;

pub const TOKEN: &str = "test-access-token";
pub const ADMIN_EMAIL: &str = "chef@koji.fr";
pub const ADMIN_PASSWORD: &str = "secret1";

/// A backend where the administrator is registered and `TOKEN` is live.
pub fn signed_in() -> MemoryBackend {
    MemoryBackend::new().with_session(ADMIN_EMAIL, ADMIN_PASSWORD, TOKEN)
}

pub fn app_state(
    backend: MemoryBackend,
) -> (Arc<MemoryBackend>, Data<AppState>) {
    let backend = Arc::new(backend);
    let state = AppState {
        backend: backend.clone(),
        cookie_secure: false,
    };
    (backend, Data::new(state))
}

pub fn product_row(id: Uuid, name: &str, brand: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "price_ht": price,
        "unit": "u",
        "category": "Outillage",
        "brand": brand,
        "image_url": null,
        "packaging": null,
        "created_at": "2024-04-18T08:00:00Z",
    })
}
