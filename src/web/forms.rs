use serde::Deserialize;

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}
