//! Application configuration.
//!
//! Values come from `config.toml` (or the file named by `CONFIG_PATH`) when it
//! exists, then environment variables override individual keys.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub identity: IdentitySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthSettings::default(),
            identity: IdentitySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Session token settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime such as `7d`, `12h`, `30m` or a bare number of seconds.
    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in: String,
    /// Verified emails that are created with the `admin` role on first login.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { jwt_secret: String::new(), jwt_expires_in: default_jwt_expires_in(), admin_emails: Vec::new() }
    }
}

/// External identity verifier settings (Firebase / Google Identity Toolkit).
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self { api_key: None, endpoint: default_identity_endpoint() }
    }
}

fn default_environment() -> String { "development".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_jwt_expires_in() -> String { "7d".into() }
fn default_identity_endpoint() -> String {
    "https://identitytoolkit.googleapis.com/v1/accounts:lookup".into()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Parse a lifetime like `7d`, `12h`, `30m`, `45s` or `3600`.
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(anyhow!("duration is empty"));
    }
    let (digits, unit) = match s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, "s"),
    };
    let n: u64 = digits.parse().map_err(|_| anyhow!("invalid duration: {raw}"))?;
    let scale = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return Err(anyhow!("invalid duration unit in {raw}; expected s, m, h or d")),
    };
    let secs = n.checked_mul(scale).ok_or_else(|| anyhow!("duration too large: {raw}"))?;
    // token expiry is computed as i64 unix seconds
    if secs > i64::MAX as u64 / 2 {
        return Err(anyhow!("duration too large: {raw}"));
    }
    if secs == 0 {
        return Err(anyhow!("duration must be positive: {raw}"));
    }
    Ok(Duration::from_secs(secs))
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Token lifetime; only valid after `normalize_and_validate` succeeded.
    pub fn token_ttl(&self) -> Duration {
        parse_duration(&self.auth.jwt_expires_in).unwrap_or(Duration::from_secs(7 * 86_400))
    }

    /// Override keys from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|k| std::env::var(k).ok())
    }

    /// Override keys from `lookup`; blank values are ignored, unparsable numbers are errors.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = var("APP_ENV") { self.environment = v; }
        if let Some(v) = var("SERVER_HOST") { self.server.host = v; }
        if let Some(p) = var("PORT") {
            self.server.port = p.parse::<u16>().map_err(|_| anyhow!("PORT must be a number in 1..=65535, got {p:?}"))?;
        }
        if let Some(w) = var("TOKIO_WORKER_THREADS") {
            let w = w.parse::<usize>().map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be a positive number, got {w:?}"))?;
            self.server.worker_threads = Some(w);
        }
        if let Some(v) = var("DATABASE_URL") { self.database.url = v; }
        if let Some(v) = var("JWT_SECRET") { self.auth.jwt_secret = v; }
        if let Some(v) = var("JWT_EXPIRES_IN") { self.auth.jwt_expires_in = v; }
        if let Some(v) = var("ADMIN_EMAILS") {
            self.auth.admin_emails = v
                .split(',')
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(v) = var("FIREBASE_API_KEY") { self.identity.api_key = Some(v); }
        if let Some(v) = var("IDENTITY_ENDPOINT") { self.identity.endpoint = v; }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        parse_duration(&self.auth.jwt_expires_in)?;
        if self.is_production() && self.identity.api_key.is_none() {
            return Err(anyhow!("identity.api_key (FIREBASE_API_KEY) is required in production"));
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
