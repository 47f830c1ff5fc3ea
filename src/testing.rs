//! In-memory backend for tests, built with `cfg(test)` or the `testing`
//! feature. It keeps rows, accounts, sessions and stored objects behind one
//! lock, counts every call and can be told to fail.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::backend::{
    AccessToken, AuthApi, AuthUser, Credentials, Filter, Query, QueryApi,
    Session, StorageApi,
};
use crate::common::BackendError;

pub const STORAGE_HOST: &str = "https://storage.koji.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub sign_in: usize,
    pub sign_up: usize,
    pub sign_out: usize,
    pub select: usize,
    pub count: usize,
    pub insert: usize,
    pub delete: usize,
    pub upload: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
struct State {
    rows: HashMap<String, Vec<Value>>,
    accounts: Vec<Account>,
    tokens: HashMap<String, Uuid>,
    objects: Vec<StoredObject>,
    calls: Calls,
    auth_failure: Option<String>,
    query_failure: Option<String>,
    query_failures: HashMap<String, String>,
    storage_failure: Option<String>,
}

/// Backend project kept in memory, with call counters and injectable
/// failures.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, collection: &str, rows: Vec<Value>) -> Self {
        self.state
            .lock()
            .unwrap()
            .rows
            .insert(collection.to_string(), rows);
        self
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.state.lock().unwrap().accounts.push(Account {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password: password.to_string(),
            role: "admin".to_string(),
        });
        self
    }

    /// Registers an account that already holds the live session `token`.
    pub fn with_session(
        self,
        email: &str,
        password: &str,
        token: &str,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let account = Account {
                id: Uuid::now_v7(),
                email: email.to_string(),
                password: password.to_string(),
                role: "admin".to_string(),
            };
            state.tokens.insert(token.to_string(), account.id);
            state.accounts.push(account);
        }
        self
    }

    pub fn fail_auth(&self, message: &str) {
        self.state.lock().unwrap().auth_failure = Some(message.to_string());
    }

    /// Every query against `collection` fails with `message`.
    pub fn fail_collection(&self, collection: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .query_failures
            .insert(collection.to_string(), message.to_string());
    }

    /// Every query, whatever the collection, fails with `message`.
    pub fn fail_queries(&self, message: &str) {
        self.state.lock().unwrap().query_failure = Some(message.to_string());
    }

    pub fn fail_storage(&self, message: &str) {
        self.state.lock().unwrap().storage_failure =
            Some(message.to_string());
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.lock().unwrap().accounts.clone()
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.state.lock().unwrap().objects.clone()
    }

    fn check_query(
        state: &State,
        collection: &str,
    ) -> Result<(), BackendError> {
        let failure = state
            .query_failure
            .as_ref()
            .or_else(|| state.query_failures.get(collection));
        match failure {
            Some(message) => Err(BackendError::Query {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn auth_user(account: &Account) -> AuthUser {
    AuthUser {
        id: account.id,
        email: Some(account.email.clone()),
        user_metadata: json!({ "role": account.role }),
    }
}

fn cell(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match filter {
        Filter::Eq { column, value } => cell(row, column) == *value,
        Filter::In { column, values } => values.contains(&cell(row, column)),
    })
}

#[async_trait]
impl AuthApi for MemoryBackend {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.sign_in += 1;
        if let Some(message) = &state.auth_failure {
            return Err(BackendError::Auth {
                status: 400,
                message: message.clone(),
            });
        }

        let account = state
            .accounts
            .iter()
            .find(|a| {
                a.email == credentials.email
                    && a.password == credentials.password
            })
            .cloned()
            .ok_or_else(|| BackendError::Auth {
                status: 400,
                message: "Invalid login credentials".into(),
            })?;

        let token = format!("token-{}", Uuid::now_v7());
        state.tokens.insert(token.clone(), account.id);
        Ok(Session {
            access_token: AccessToken::new(token),
            expires_in: Some(3600),
            user: auth_user(&account),
        })
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        role: &str,
    ) -> Result<AuthUser, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.sign_up += 1;
        if let Some(message) = &state.auth_failure {
            return Err(BackendError::Auth {
                status: 422,
                message: message.clone(),
            });
        }
        if state.accounts.iter().any(|a| a.email == credentials.email) {
            return Err(BackendError::Auth {
                status: 422,
                message: "User already registered".into(),
            });
        }

        let account = Account {
            id: Uuid::now_v7(),
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            role: role.to_string(),
        };
        state.accounts.push(account.clone());
        Ok(auth_user(&account))
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.sign_out += 1;
        state.tokens.remove(token.as_str());
        Ok(())
    }

    async fn get_current_user(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthUser>, BackendError> {
        let state = self.state.lock().unwrap();
        let Some(id) = state.tokens.get(token.as_str()) else {
            return Ok(None);
        };
        Ok(state.accounts.iter().find(|a| a.id == *id).map(auth_user))
    }
}

#[async_trait]
impl QueryApi for MemoryBackend {
    async fn select(
        &self,
        _token: &AccessToken,
        query: &Query,
    ) -> Result<Vec<Value>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.select += 1;
        Self::check_query(&state, &query.collection)?;

        Ok(state
            .rows
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(
        &self,
        _token: &AccessToken,
        query: &Query,
    ) -> Result<u64, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.count += 1;
        Self::check_query(&state, &query.collection)?;

        Ok(state
            .rows
            .get(&query.collection)
            .map(|rows| {
                rows.iter().filter(|row| matches(row, &query.filters)).count()
            })
            .unwrap_or_default() as u64)
    }

    async fn insert(
        &self,
        _token: &AccessToken,
        collection: &str,
        row: &Value,
    ) -> Result<Value, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.insert += 1;
        Self::check_query(&state, collection)?;

        let mut stored = row.clone();
        stored["id"] = json!(Uuid::now_v7());
        stored["created_at"] = json!("2024-06-01T10:00:00Z");
        state
            .rows
            .entry(collection.to_string())
            .or_default()
            .insert(0, stored.clone());
        Ok(stored)
    }

    async fn delete(
        &self,
        _token: &AccessToken,
        query: &Query,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.delete += 1;
        Self::check_query(&state, &query.collection)?;

        if let Some(rows) = state.rows.get_mut(&query.collection) {
            rows.retain(|row| !matches(row, &query.filters));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageApi for MemoryBackend {
    async fn upload(
        &self,
        _token: &AccessToken,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.upload += 1;
        if let Some(message) = &state.storage_failure {
            return Err(BackendError::Storage {
                status: 400,
                message: message.clone(),
            });
        }
        if state.objects.iter().any(|o| o.bucket == bucket && o.key == key) {
            return Err(BackendError::Storage {
                status: 409,
                message: "The resource already exists".into(),
            });
        }

        state.objects.push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        Ok(())
    }

    fn public_url(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, BackendError> {
        Ok(format!("{STORAGE_HOST}/{bucket}/{key}"))
    }
}
