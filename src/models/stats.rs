use rust_decimal::Decimal;

use super::format_euros;

/// Figures shown on the dashboard overview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub users_count: u64,
    pub quotes_count: u64,
    pub products_count: u64,
    /// Sum of `total_amount` over pending quotes.
    pub potential_value: Decimal,
}

impl DashboardStats {
    pub fn potential_value_display(&self) -> String {
        format_euros(self.potential_value)
    }
}
