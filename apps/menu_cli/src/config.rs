use std::{collections::HashMap, fs, path::Path};

use menu_core::IdStrategy;
use shared::domain::VIEWER_ROLE_FLAG;

pub const DEFAULT_CONFIG_FILE: &str = "menu.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub currency_symbol: String,
    pub id_strategy: IdStrategy,
    pub default_role: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            currency_symbol: "R".into(),
            id_strategy: IdStrategy::Uuid,
            default_role: VIEWER_ROLE_FLAG.into(),
        }
    }
}

/// Defaults, then `path` (or `menu.toml`) if readable, then environment.
///
/// Settings are loaded before logging is set up, so problems with the file
/// are returned for the caller to log once a subscriber exists.
pub fn load_settings(path: Option<&Path>) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(err) = apply_file_overrides(&mut settings, &raw) {
            warnings.push(format!("ignoring config file '{}': {err}", path.display()));
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    (settings, warnings)
}

/// Fails, leaving `settings` untouched, unless `raw` is a flat table of strings.
pub fn apply_file_overrides(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;

    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    if let Some(v) = file_cfg.get("currency_symbol") {
        settings.currency_symbol = v.clone();
    }
    if let Some(Ok(strategy)) = file_cfg.get("id_strategy").map(|v| v.parse::<IdStrategy>()) {
        settings.id_strategy = strategy;
    }
    if let Some(v) = file_cfg.get("default_role") {
        settings.default_role = v.clone();
    }
    Ok(())
}

/// `APP__*` names win over the shorter `MENU_*` names.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["MENU_LOG", "APP__LOG_FILTER"] {
        if let Some(v) = lookup(key) {
            settings.log_filter = v;
        }
    }
    for key in ["MENU_CURRENCY", "APP__CURRENCY_SYMBOL"] {
        if let Some(v) = lookup(key) {
            settings.currency_symbol = v;
        }
    }
    for key in ["MENU_ID_STRATEGY", "APP__ID_STRATEGY"] {
        if let Some(Ok(strategy)) = lookup(key).map(|v| v.parse::<IdStrategy>()) {
            settings.id_strategy = strategy;
        }
    }
    for key in ["MENU_DEFAULT_ROLE", "APP__DEFAULT_ROLE"] {
        if let Some(v) = lookup(key) {
            settings.default_role = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
