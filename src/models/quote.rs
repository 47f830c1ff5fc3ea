use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::{QuoteStatus, Record, Searchable, format_date, format_euros};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
}

impl Record for Quote {
    const COLLECTION: &'static str = "quotes";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Quote {
    fn search_fields(&self) -> Vec<&str> {
        [self.client_name.as_deref(), self.client_email.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Quote {
    pub fn client_label(&self) -> &str {
        self.client_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Prospect")
    }

    pub fn client_email_label(&self) -> &str {
        self.client_email.as_deref().unwrap_or_default()
    }

    pub fn total_display(&self) -> String {
        format_euros(self.total_amount.unwrap_or_default())
    }

    pub fn issued_on(&self) -> String {
        format_date(&self.created_at)
    }

    pub fn signed_on(&self) -> Option<String> {
        self.signed_at.as_ref().map(format_date)
    }
}
