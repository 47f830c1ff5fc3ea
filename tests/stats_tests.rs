mod common;

#[cfg(test)]
pub mod stats_tests {
    use rust_decimal::Decimal;

    use super::common::*;

    use koji_admin::services::StatsService;

    fn seeded() -> MemoryBackend {
        MemoryBackend::new()
            .with_rows("users", get_seed_users())
            .with_rows("quotes", get_seed_quotes())
            .with_rows("products", get_seed_products())
    }

    #[tokio::test]
    async fn test_stats_counts_and_pending_value() {
        let backend = seeded();
        let token = token();

        let stats = StatsService::new(&backend, &token).load().await.unwrap();

        assert_eq!(stats.users_count, 3);
        assert_eq!(stats.quotes_count, 4);
        assert_eq!(stats.products_count, 3);
        // en_cours 1250 + pending 980.40; accepted and null statuses excluded.
        assert_eq!(stats.potential_value, Decimal::new(223040, 2));
        assert_eq!(stats.potential_value_display(), "€2 230,40");
        assert_eq!(backend.calls().count, 3);
        assert_eq!(backend.calls().select, 1);
    }

    #[tokio::test]
    async fn test_stats_on_empty_project() {
        let backend = MemoryBackend::new();
        let token = token();

        let stats = StatsService::new(&backend, &token).load().await.unwrap();

        assert_eq!(stats.users_count, 0);
        assert_eq!(stats.potential_value, Decimal::ZERO);
        assert_eq!(stats.potential_value_display(), "€0,00");
    }

    #[tokio::test]
    async fn test_stats_fail_as_a_whole() {
        let backend = seeded();
        backend.fail_collection("products", "relation \"products\" does not exist");
        let token = token();

        let err = StatsService::new(&backend, &token).load().await.unwrap_err();

        assert_eq!(err.to_string(), "relation \"products\" does not exist");
    }
}
