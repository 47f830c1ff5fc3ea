use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::str::FromStr;

use super::{
    Draft, ProductCategory, ProductUnit, Record, Searchable, format_euros,
};
use crate::common::ValidationError;

/// A catalog entry as stored by the backend.
///
/// Unit and category are kept as the raw strings the store returns; the fixed
/// option sets are only enforced when a product is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price_ht: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row sent to the `products` collection on creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price_ht: Decimal,
    pub unit: ProductUnit,
    pub category: ProductCategory,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub packaging: Option<String>,
    pub consumption_rule_type: &'static str,
    pub consumption_rule_factor: f64,
}

/// The product form exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub price_ht: String,
    pub unit: String,
    pub category: String,
    pub brand: String,
    pub packaging: String,
    pub image_url: String,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.brand.as_deref(),
            self.category.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Product {
    pub fn brand_label(&self) -> &str {
        self.brand.as_deref().unwrap_or_default()
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    pub fn unit_code(&self) -> &str {
        self.unit.as_deref().unwrap_or(ProductUnit::Unit.as_str())
    }

    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn price_display(&self) -> String {
        format_euros(self.price_ht)
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price_ht: String::new(),
            unit: ProductUnit::default().as_str().to_string(),
            category: ProductCategory::default().as_str().to_string(),
            brand: String::new(),
            packaging: String::new(),
            image_url: String::new(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses a typed price. A comma decimal separator is accepted.
pub fn parse_price(input: &str) -> Result<Decimal, ValidationError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingPrice);
    }

    let price = Decimal::from_str(&raw.replace(',', "."))
        .map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice);
    }

    Ok(price)
}

impl Draft for ProductDraft {
    type Record = Product;
    type Insert = NewProduct;

    fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let price_ht = parse_price(&self.price_ht)?;

        let unit = ProductUnit::from_str(&self.unit).map_err(|_| {
            ValidationError::UnknownOption {
                field: "unit",
                value: self.unit.clone(),
            }
        })?;
        let category =
            ProductCategory::from_str(&self.category).map_err(|_| {
                ValidationError::UnknownOption {
                    field: "category",
                    value: self.category.clone(),
                }
            })?;

        Ok(NewProduct {
            name: name.to_string(),
            price_ht,
            unit,
            category,
            brand: optional(&self.brand),
            image_url: optional(&self.image_url),
            packaging: optional(&self.packaging),
            consumption_rule_type: "fixed",
            consumption_rule_factor: 1.0,
        })
    }
}
