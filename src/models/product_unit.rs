use serde::{Deserialize, Serialize};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize,
)]
pub enum ProductUnit {
    #[default]
    #[serde(rename = "u")]
    Unit,
    #[serde(rename = "m2")]
    Area,
    #[serde(rename = "ml")]
    Length,
    #[serde(rename = "L")]
    Volume,
    #[serde(rename = "kg")]
    Mass,
}

impl ProductUnit {
    pub const ALL: [ProductUnit; 5] = [
        Self::Unit,
        Self::Area,
        Self::Length,
        Self::Volume,
        Self::Mass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "u",
            Self::Area => "m2",
            Self::Length => "ml",
            Self::Volume => "L",
            Self::Mass => "kg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unit => "Unit (u)",
            Self::Area => "Square metre (m²)",
            Self::Length => "Linear metre (ml)",
            Self::Volume => "Litre (L)",
            Self::Mass => "Kilogram (kg)",
        }
    }
}

impl std::fmt::Display for ProductUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for ProductUnit {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for ProductUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "u" => Ok(Self::Unit),
            "m2" => Ok(Self::Area),
            "ml" => Ok(Self::Length),
            "l" => Ok(Self::Volume),
            "kg" => Ok(Self::Mass),
            _ => Err(format!("invalid product unit: {}", s)),
        }
    }
}
