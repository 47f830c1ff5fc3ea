//! Contract with the hosted backend.
//!
//! The dashboard talks to three surfaces of one backend project: auth, the
//! collection query API and object storage. Each surface is a trait so the
//! services can be exercised against an in-memory implementation;
//! [`SupabaseClient`] is the HTTP implementation used by the server.

pub use query::*;
pub use supabase::SupabaseClient;

mod query;
mod supabase;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{BackendError, ValidationError};

/// Bearer token proving the caller's identity to the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trims the email and checks both fields are present.
    pub fn new(
        email: &str,
        password: &str,
    ) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !validate_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Email validation
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.len() > 64
        || domain.is_empty()
        || domain.contains('@')
    {
        return false;
    }

    // Domain must have at least one dot
    domain.contains('.')
}

/// Identity as reported by the auth surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    pub fn role(&self) -> Option<&str> {
        self.user_metadata.get("role").and_then(Value::as_str)
    }

    pub fn email_label(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: AccessToken,
    /// Lifetime of the access token in seconds, when the backend says.
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, BackendError>;

    /// Registers an account whose metadata carries `role`.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        role: &str,
    ) -> Result<AuthUser, BackendError>;

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError>;

    /// `Ok(None)` when the token is missing, expired or revoked.
    async fn get_current_user(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthUser>, BackendError>;
}

#[async_trait]
pub trait QueryApi: Send + Sync {
    async fn select(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<Vec<Value>, BackendError>;

    /// Number of rows matching the query, without fetching them.
    async fn count(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<u64, BackendError>;

    /// Inserts one row and returns it as stored.
    async fn insert(
        &self,
        token: &AccessToken,
        collection: &str,
        row: &Value,
    ) -> Result<Value, BackendError>;

    async fn delete(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<(), BackendError>;
}

#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn upload(
        &self,
        token: &AccessToken,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    fn public_url(&self, bucket: &str, key: &str)
    -> Result<String, BackendError>;
}

/// Everything the dashboard needs from one backend project.
pub trait Backend: AuthApi + QueryApi + StorageApi {}

impl<T: AuthApi + QueryApi + StorageApi> Backend for T {}
