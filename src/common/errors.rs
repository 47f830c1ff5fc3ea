use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors returned by the hosted backend, one variant per surface.
///
/// The `Display` of the surface variants is the backend's own message so it can
/// be shown to the administrator verbatim.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{message}")]
    Auth { status: u16, message: String },

    #[error("{message}")]
    Query { status: u16, message: String },

    #[error("{message}")]
    Storage { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Product name is required")]
    EmptyName,

    #[error("Price is required")]
    MissingPrice,

    #[error("Price must be a number, got '{0}'")]
    InvalidPrice(String),

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("An upload is already in progress")]
    Busy,

    #[error("No file selected")]
    NoFile,

    #[error("File is too large ({size} bytes, limit is {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Query { status, .. }
            | Self::Storage { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}
