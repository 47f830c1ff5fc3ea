use rust_decimal::Decimal;
use serde_json::Value;

use std::str::FromStr;

use crate::backend::{AccessToken, Query, QueryApi};
use crate::common::BackendError;
use crate::models::{
    DashboardStats, Product, Quote, QuoteStatus, Record, UserProfile,
};

/// Aggregates for the overview page.
pub struct StatsService<'a, Q: ?Sized> {
    query: &'a Q,
    token: &'a AccessToken,
}

impl<'a, Q: QueryApi + ?Sized> StatsService<'a, Q> {
    pub fn new(query: &'a Q, token: &'a AccessToken) -> Self {
        Self { query, token }
    }

    /// Runs the four queries concurrently. Any failure fails the whole load.
    pub async fn load(&self) -> Result<DashboardStats, BackendError> {
        let users = Query::table(UserProfile::COLLECTION);
        let quotes = Query::table(Quote::COLLECTION);
        let products = Query::table(Product::COLLECTION);
        let pending = Query::table(Quote::COLLECTION)
            .columns("total_amount")
            .in_list("status", QuoteStatus::PENDING_LABELS);

        let (users_count, quotes_count, products_count, pending_rows) =
            futures_util::try_join!(
                self.query.count(self.token, &users),
                self.query.count(self.token, &quotes),
                self.query.count(self.token, &products),
                self.query.select(self.token, &pending),
            )?;

        Ok(DashboardStats {
            users_count,
            quotes_count,
            products_count,
            potential_value: pending_rows.iter().map(amount_of).sum(),
        })
    }
}

/// `total_amount` of a row; missing or unreadable amounts count as zero.
fn amount_of(row: &Value) -> Decimal {
    let text = match row.get("total_amount") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_of_reads_numbers_and_strings() {
        assert_eq!(
            amount_of(&json!({ "total_amount": 12.5 })),
            Decimal::new(125, 1)
        );
        assert_eq!(
            amount_of(&json!({ "total_amount": "99.90" })),
            Decimal::new(9990, 2)
        );
    }

    #[test]
    fn test_amount_of_defaults_to_zero() {
        assert_eq!(amount_of(&json!({ "total_amount": null })), Decimal::ZERO);
        assert_eq!(amount_of(&json!({})), Decimal::ZERO);
        assert_eq!(
            amount_of(&json!({ "total_amount": "n/a" })),
            Decimal::ZERO
        );
    }
}
