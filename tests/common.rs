#![allow(dead_code)]

use serde_json::{Value, json};
use uuid::Uuid;

use koji_admin::backend::AccessToken;

pub use koji_admin::testing::{MemoryBackend, STORAGE_HOST};

pub fn token() -> AccessToken {
    AccessToken::new("test-token")
}

pub fn product_row(name: &str, brand: &str, category: &str, price: &str) -> Value {
    json!({
        "id": Uuid::now_v7(),
        "name": name,
        "price_ht": price,
        "unit": "u",
        "category": category,
        "brand": brand,
        "image_url": null,
        "packaging": null,
        "created_at": "2024-05-20T08:00:00Z",
    })
}

pub fn get_seed_products() -> Vec<Value> {
    vec![
        product_row("Peinture blanche mate", "Tollens", "Peinture", "42.90"),
        product_row("Perceuse visseuse", "Bosch", "Outillage", "129"),
        product_row("Enduit de lissage", "Semin", "Enduit", "18.5"),
    ]
}

pub fn get_seed_users() -> Vec<Value> {
    vec![
        json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "email": "marie@atelier-durand.fr",
            "profession": "Peintre",
            "is_pro": true,
            "business_info": { "companyName": "Atelier Durand" },
            "created_at": "2024-03-02T09:15:00Z",
        }),
        json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "email": "paul@example.com",
            "profession": null,
            "is_pro": false,
            "business_info": { "siret": "123" },
            "created_at": "2024-02-11T17:40:00Z",
        }),
        json!({
            "id": "00000000-0000-0000-0000-000000000003",
            "email": "lea@example.com",
            "created_at": "2024-01-05T08:00:00Z",
        }),
    ]
}

pub fn get_seed_quotes() -> Vec<Value> {
    vec![
        json!({
            "id": "00000000-0000-0000-0000-0000000000a1",
            "client_name": "Jean Martin",
            "client_email": "jean.martin@example.com",
            "total_amount": 1250.0,
            "status": "en_cours",
            "created_at": "2024-05-10T10:00:00Z",
        }),
        json!({
            "id": "00000000-0000-0000-0000-0000000000a2",
            "client_name": null,
            "client_email": "inconnu@example.com",
            "total_amount": "980.40",
            "status": "pending",
            "created_at": "2024-05-08T10:00:00Z",
        }),
        json!({
            "id": "00000000-0000-0000-0000-0000000000a3",
            "client_name": "Sophie Bernard",
            "client_email": "sophie@example.com",
            "total_amount": 4300,
            "status": "accepte",
            "created_at": "2024-04-28T10:00:00Z",
            "signed_at": "2024-05-02T16:30:00Z",
        }),
        json!({
            "id": "00000000-0000-0000-0000-0000000000a4",
            "client_name": "Luc Petit",
            "total_amount": 600,
            "status": null,
            "created_at": "2024-04-20T10:00:00Z",
        }),
    ]
}
