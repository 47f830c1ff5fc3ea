use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::{Record, Searchable, format_date};

/// A row of the `users` profile collection. Profiles are created by the
/// sign-up flow of the client apps; the dashboard only reads them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub is_pro: Option<bool>,
    #[serde(default)]
    pub business_info: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Record for UserProfile {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for UserProfile {
    fn search_fields(&self) -> Vec<&str> {
        [
            self.email.as_deref(),
            self.profession.as_deref(),
            self.company_name(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl UserProfile {
    pub fn email_label(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn initial(&self) -> String {
        self.email
            .as_deref()
            .and_then(|e| e.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn profession_label(&self) -> &str {
        self.profession
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("Client")
    }

    pub fn has_pro_status(&self) -> bool {
        self.is_pro.unwrap_or(false)
    }

    fn company_name(&self) -> Option<&str> {
        self.business_info
            .as_ref()
            .and_then(|info| info.get("companyName"))
            .and_then(Value::as_str)
    }

    /// `None` when the user has no business info at all.
    pub fn company_label(&self) -> Option<&str> {
        match &self.business_info {
            None | Some(Value::Null) => None,
            Some(_) => Some(self.company_name().unwrap_or("Unknown Corp")),
        }
    }

    pub fn joined_on(&self) -> String {
        format_date(&self.created_at)
    }
}
