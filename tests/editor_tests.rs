mod common;

#[cfg(test)]
pub mod editor_tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::common::*;

    use koji_admin::common::{EditorError, ValidationError};
    use koji_admin::models::*;
    use koji_admin::services::*;

    async fn load(backend: &MemoryBackend) -> RecordCache<Product> {
        let token = token();
        let products = CollectionBrowser::new(backend, &token)
            .newest_first::<Product>()
            .await
            .unwrap();
        RecordCache::new(products)
    }

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price_ht: price.to_string(),
            ..ProductDraft::default()
        }
    }

    #[tokio::test]
    async fn test_create_prepends_the_stored_record() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let token = token();

        let created = RecordEditor::new(&backend, &token)
            .create(&mut cache, &draft("Vis", "12.5"))
            .await
            .unwrap()
            .clone();

        assert_eq!(created.name, "Vis");
        assert_eq!(created.price_ht, Decimal::new(125, 1));
        assert_eq!(created.unit.as_deref(), Some("u"));
        assert_eq!(created.category.as_deref(), Some("Materiaux"));

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.records()[0].id, created.id);
        assert_eq!(backend.calls().insert, 1);

        let stored = &backend.rows("products")[0];
        assert_eq!(stored["consumption_rule_type"], "fixed");
        assert_eq!(stored["consumption_rule_factor"], 1.0);
        assert!(stored["brand"].is_null());
    }

    #[tokio::test]
    async fn test_create_white_paint_uses_store_echo() {
        let backend = MemoryBackend::new();
        let mut cache = RecordCache::default();
        let token = token();
        let form = ProductDraft {
            name: "White Paint".into(),
            price_ht: "12.50".into(),
            unit: "u".into(),
            ..ProductDraft::default()
        };

        let before = cache.len();
        let id = RecordEditor::new(&backend, &token)
            .create(&mut cache, &form)
            .await
            .unwrap()
            .id;

        assert_eq!(cache.len(), before + 1);
        let head = &cache.records()[0];
        assert_eq!(head.id, id);
        assert_eq!(head.price_ht, Decimal::new(125, 1));
        assert_eq!(
            backend.rows("products")[0]["id"],
            serde_json::json!(id)
        );
    }

    #[tokio::test]
    async fn test_create_with_blank_name_never_reaches_backend() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let token = token();

        let err = RecordEditor::new(&backend, &token)
            .create(&mut cache, &draft("   ", "3"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EditorError::Validation(ValidationError::EmptyName)
        ));
        assert_eq!(backend.calls().insert, 0);
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_prices_locally() {
        let backend = MemoryBackend::new();
        let mut cache = RecordCache::default();
        let token = token();
        let editor = RecordEditor::new(&backend, &token);

        for (price, expected) in [
            ("", ValidationError::MissingPrice),
            ("douze", ValidationError::InvalidPrice("douze".into())),
            ("-4", ValidationError::NegativePrice),
        ] {
            let err = editor
                .create(&mut cache, &draft("Vis", price))
                .await
                .unwrap_err();
            match err {
                EditorError::Validation(e) => assert_eq!(e, expected),
                other => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(backend.calls().insert, 0);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_cache_unchanged() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let before = cache.clone();
        backend.fail_collection(
            "products",
            "new row violates row-level security policy",
        );
        let token = token();

        let err = RecordEditor::new(&backend, &token)
            .create(&mut cache, &draft("Vis", "1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "new row violates row-level security policy");
        assert_eq!(cache, before);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_record() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let target = cache.records()[1].id;
        let token = token();

        let outcome = RecordEditor::new(&backend, &token)
            .delete(&mut cache, target, Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(target));
        assert_eq!(backend.rows("products").len(), 2);
        assert_eq!(backend.calls().delete, 1);
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_call() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let target = cache.records()[0].id;
        let token = token();

        let outcome = RecordEditor::new(&backend, &token)
            .delete(&mut cache, target, Confirmation::Declined)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(cache.len(), 3);
        assert_eq!(backend.calls().delete, 0);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        backend.fail_collection("products", "permission denied");
        let target = cache.records()[0].id;
        let token = token();

        let err = RecordEditor::new(&backend, &token)
            .delete(&mut cache, target, Confirmation::Confirmed)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "permission denied");
        assert!(cache.contains(target));
    }

    #[tokio::test]
    async fn test_delete_of_unknown_id_is_harmless() {
        let backend =
            MemoryBackend::new().with_rows("products", get_seed_products());
        let mut cache = load(&backend).await;
        let token = token();

        let outcome = RecordEditor::new(&backend, &token)
            .delete(&mut cache, Uuid::now_v7(), Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_confirmation_from_form() {
        assert_eq!(Confirmation::from_form(Some("yes")), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_form(Some(" TRUE ")), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_form(Some("no")), Confirmation::Declined);
        assert_eq!(Confirmation::from_form(None), Confirmation::Declined);
    }
}
