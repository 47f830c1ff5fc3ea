use serde::{Deserialize, Serialize};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize,
)]
pub enum ProductCategory {
    #[default]
    Materiaux,
    Peinture,
    Enduit,
    Outillage,
    Electricite,
    Plomberie,
    Sol,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 7] = [
        Self::Materiaux,
        Self::Peinture,
        Self::Enduit,
        Self::Outillage,
        Self::Electricite,
        Self::Plomberie,
        Self::Sol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Materiaux => "Materiaux",
            Self::Peinture => "Peinture",
            Self::Enduit => "Enduit",
            Self::Outillage => "Outillage",
            Self::Electricite => "Electricite",
            Self::Plomberie => "Plomberie",
            Self::Sol => "Sol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Electricite => "Electricite (cables, sockets...)",
            Self::Plomberie => "Plomberie (pipes, taps...)",
            Self::Sol => "Sol (tiles, parquet...)",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("invalid product category: {}", s))
    }
}
