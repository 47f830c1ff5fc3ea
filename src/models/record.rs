use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::common::ValidationError;

/// A row of a named backend collection.
pub trait Record: DeserializeOwned + Clone {
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// Records that can be narrowed by a free-text search term.
pub trait Searchable {
    /// The fixed set of string fields a search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any search field.
    /// An empty term matches everything.
    fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Raw form input for a new record of `Self::Record`.
pub trait Draft {
    type Record: Record;
    type Insert: Serialize;

    /// Checks required fields and produces the row to insert.
    fn validate(&self) -> Result<Self::Insert, ValidationError>;
}
