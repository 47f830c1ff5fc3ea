use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    AccessToken, AuthApi, AuthUser, Credentials, Query, QueryApi, Session,
    StorageApi,
};
use crate::common::BackendError;
use crate::config::Config;

/// HTTP client for a hosted Supabase project (GoTrue, PostgREST, Storage).
///
/// Built once at startup and shared; the per-request access token is passed
/// to every call instead of being stored here.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    user: AuthUser,
}

/// Sign-up answers with a session when confirmation is off, or with the bare
/// user otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    WithSession { user: AuthUser },
    User(AuthUser),
}

#[derive(Clone, Copy)]
enum Surface {
    Auth,
    Query,
    Storage,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, collection: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    fn query_url(&self, query: &Query) -> String {
        format!(
            "{}?{}",
            self.rest_url(&query.collection),
            query.query_string()
        )
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            urlencoding::encode(key)
        )
    }

    /// Requests carrying only the project key.
    fn anon(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.api_key)
    }

    /// Requests made on behalf of a signed-in user.
    fn authed(
        &self,
        builder: RequestBuilder,
        token: &AccessToken,
    ) -> RequestBuilder {
        self.anon(builder).bearer_auth(token.as_str())
    }

    async fn failure(surface: Surface, resp: Response) -> BackendError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        log::debug!("backend request failed ({status}): {body}");

        match surface {
            Surface::Auth => BackendError::Auth { status, message },
            Surface::Query => BackendError::Query { status, message },
            Surface::Storage => BackendError::Storage { status, message },
        }
    }

    async fn parse<R: DeserializeOwned>(
        surface: Surface,
        resp: Response,
    ) -> Result<R, BackendError> {
        if !resp.status().is_success() {
            return Err(Self::failure(surface, resp).await);
        }
        resp.json::<R>()
            .await
            .map_err(|e| BackendError::Decode(format!("response body: {e}")))
    }

    async fn expect_success(
        surface: Surface,
        resp: Response,
    ) -> Result<(), BackendError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(surface, resp).await)
        }
    }
}

#[async_trait]
impl AuthApi for SupabaseClient {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, BackendError> {
        let req = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }));
        let resp = self.anon(req).send().await?;
        let token: TokenResponse = Self::parse(Surface::Auth, resp).await?;

        Ok(Session {
            access_token: AccessToken::new(token.access_token),
            expires_in: token.expires_in,
            user: token.user,
        })
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        role: &str,
    ) -> Result<AuthUser, BackendError> {
        let req = self.http.post(self.auth_url("signup")).json(
            &serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
                "data": { "role": role },
            }),
        );
        let resp = self.anon(req).send().await?;
        let created: SignUpResponse = Self::parse(Surface::Auth, resp).await?;

        Ok(match created {
            SignUpResponse::WithSession { user } => user,
            SignUpResponse::User(user) => user,
        })
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let req = self.http.post(self.auth_url("logout"));
        let resp = self.authed(req, token).send().await?;
        Self::expect_success(Surface::Auth, resp).await
    }

    async fn get_current_user(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthUser>, BackendError> {
        if token.as_str().is_empty() {
            return Ok(None);
        }

        let req = self.http.get(self.auth_url("user"));
        let resp = self.authed(req, token).send().await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Self::parse(Surface::Auth, resp).await.map(Some),
        }
    }
}

#[async_trait]
impl QueryApi for SupabaseClient {
    async fn select(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<Vec<Value>, BackendError> {
        let req = self.http.get(self.query_url(query));
        let resp = self.authed(req, token).send().await?;
        Self::parse(Surface::Query, resp).await
    }

    async fn count(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<u64, BackendError> {
        let req = self
            .http
            .head(self.query_url(query))
            .header("Prefer", "count=exact");
        let resp = self.authed(req, token).send().await?;
        if !resp.status().is_success() {
            return Err(Self::failure(Surface::Query, resp).await);
        }

        resp.headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total)
            .ok_or_else(|| {
                BackendError::Decode(format!(
                    "no row count returned for '{}'",
                    query.collection
                ))
            })
    }

    async fn insert(
        &self,
        token: &AccessToken,
        collection: &str,
        row: &Value,
    ) -> Result<Value, BackendError> {
        let req = self
            .http
            .post(format!("{}?select=%2A", self.rest_url(collection)))
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![row.clone()]));
        let resp = self.authed(req, token).send().await?;
        let rows: Vec<Value> = Self::parse(Surface::Query, resp).await?;

        rows.into_iter().next().ok_or_else(|| {
            BackendError::Decode(format!(
                "insert into '{collection}' returned no row"
            ))
        })
    }

    async fn delete(
        &self,
        token: &AccessToken,
        query: &Query,
    ) -> Result<(), BackendError> {
        let req = self
            .http
            .delete(self.query_url(query))
            .header("Prefer", "return=minimal");
        let resp = self.authed(req, token).send().await?;
        Self::expect_success(Surface::Query, resp).await
    }
}

#[async_trait]
impl StorageApi for SupabaseClient {
    async fn upload(
        &self,
        token: &AccessToken,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let req = self
            .http
            .post(self.object_url(bucket, key))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        let resp = self.authed(req, token).send().await?;
        Self::expect_success(Surface::Storage, resp).await
    }

    fn public_url(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, BackendError> {
        if key.is_empty() {
            return Err(BackendError::Storage {
                status: 400,
                message: "Object key is empty".into(),
            });
        }
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            urlencoding::encode(key)
        ))
    }
}

/// Picks the human-readable message out of a backend error body.
fn error_message(status: u16, body: &str) -> String {
    const KEYS: [&str; 4] = ["error_description", "msg", "message", "error"];

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in KEYS {
            if let Some(msg) = map.get(key).and_then(Value::as_str) {
                if !msg.trim().is_empty() {
                    return msg.to_string();
                }
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {status}")
    } else {
        body.to_string()
    }
}

/// Total from a `Content-Range` header such as `0-24/57` or `*/0`.
fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
