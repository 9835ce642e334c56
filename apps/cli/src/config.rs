use std::{fs, time::Duration};

use anyhow::Context;
use client_core::{source::DEFAULT_API_URL, ApiConfig};

const SETTINGS_FILE: &str = "forkify.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub results_per_page: usize,
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_key: String::new(),
            timeout_seconds: 10,
            results_per_page: 10,
            database_url: "sqlite://./data/bookmarks.db".into(),
        }
    }
}

impl Settings {
    pub fn api_config(&self) -> anyhow::Result<ApiConfig> {
        let config = ApiConfig::new(&self.api_url, self.api_key.clone())
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        Ok(config
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_results_per_page(self.results_per_page))
    }
}

/// Defaults, then `forkify.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings.database_url = normalize_database_url(&settings.database_url);

    settings
}

/// Accepts plain file paths and `sqlite:` shorthands as well as full urls.
fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return Settings::default().database_url;
    }
    if raw.starts_with("sqlite::memory:") || raw.contains("://") {
        return raw.to_string();
    }
    if let Some(path) = raw.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw.replace('\\', "/"))
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(table) = toml::from_str::<toml::Table>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "config: ignoring unreadable settings file");
        return;
    };

    let value = |name: &str| match table.get(name)? {
        toml::Value::String(v) => Some(v.clone()),
        toml::Value::Integer(v) => Some(v.to_string()),
        _ => None,
    };

    if let Some(v) = value("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = value("api_key") {
        settings.api_key = v;
    }
    if let Some(v) = value("timeout_seconds").and_then(|v| v.parse().ok()) {
        settings.timeout_seconds = v;
    }
    if let Some(v) = value("results_per_page").and_then(|v| v.parse().ok()) {
        settings.results_per_page = v;
    }
    if let Some(v) = value("database_url") {
        settings.database_url = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("FORKIFY_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("FORKIFY_API_KEY") {
        settings.api_key = v;
    }
    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = v;
    }

    if let Some(v) = var("APP__TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        settings.timeout_seconds = v;
    }
    if let Some(v) = var("APP__RESULTS_PER_PAGE").and_then(|v| v.parse().ok()) {
        settings.results_per_page = v;
    }

    if let Some(v) = var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = var("APP__DATABASE_URL") {
        settings.database_url = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
