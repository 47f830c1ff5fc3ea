use crate::common::ConfigError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STATIC_DIR: &str = "./static";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub bind_addr: String,
    pub cookie_secure: bool,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let supabase_url = get("SUPABASE_URL")
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        if !(supabase_url.starts_with("http://")
            || supabase_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                reason: "expected an http(s) URL".into(),
            });
        }

        let supabase_anon_key = get("SUPABASE_ANON_KEY")
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let cookie_secure = match get("COOKIE_SECURE") {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                name: "COOKIE_SECURE",
                reason: format!("expected true/false, got '{v}'"),
            })?,
        };

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            bind_addr: get("BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cookie_secure,
            static_dir: get("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
