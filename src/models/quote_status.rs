use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a quote. Legacy labels written by older clients are
/// folded into the three canonical states.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl QuoteStatus {
    /// Stored labels that all mean "still pending".
    pub const PENDING_LABELS: [&'static str; 2] = ["pending", "en_cours"];

    /// Maps any stored label to a status; unknown labels are pending.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "accepted" | "accepte" | "signed" => Self::Accepted,
            "rejected" | "refuse" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Signed",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuoteStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(Self::from_label)
            .unwrap_or_default())
    }
}
