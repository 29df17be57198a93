use std::{collections::HashMap, fs};

pub const CONFIG_FILE: &str = "dumpr.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub username: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/dumpr.db".into(),
            username: None,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file(&mut settings, &raw);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    // A malformed file is ignored as a whole.
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("database_url") {
        settings.database_url = v.clone();
    }
    if let Some(v) = file_cfg.get("user") {
        settings.username = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("log") {
        settings.log_filter = v.clone();
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = var("DUMPR__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = var("DUMPR__USER") {
        let v = v.trim();
        settings.username = (!v.is_empty()).then(|| v.to_string());
    }

    if let Some(v) = var("DUMPR__LOG") {
        settings.log_filter = v;
    }
}

/// Turns a bare file path into a `sqlite://` URL. Blank input falls back to the default.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
