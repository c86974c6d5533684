use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
currency_symbol = "$"
id_strategy = "sequential"
"#,
    )
    .expect("valid config");
    assert_eq!(settings.currency_symbol, "$");
    assert_eq!(settings.id_strategy, IdStrategy::Sequential);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn unparseable_values_keep_previous_layer() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "id_strategy = \"timestamp\"").expect("valid toml");
    assert_eq!(settings.id_strategy, IdStrategy::Uuid);

    apply_file_overrides(&mut settings, "not toml at all [").expect_err("broken toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| match key {
        "MENU_LOG" => Some("debug".to_string()),
        "APP__LOG_FILTER" => Some("warn".to_string()),
        "MENU_DEFAULT_ROLE" => Some("christoffel".to_string()),
        _ => None,
    });
    assert_eq!(settings.log_filter, "warn");
    assert_eq!(settings.default_role, "christoffel");
    assert_eq!(settings.currency_symbol, "R");
}

#[test]
fn loads_settings_from_explicit_path() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("menu_cli_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("menu.toml");
    fs::write(&path, "currency_symbol = \"EUR\"\n").expect("write config");

    let (settings, warnings) = load_settings(Some(&path));
    assert_eq!(settings.currency_symbol, "EUR");
    assert!(warnings.is_empty());

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn broken_config_file_is_reported_not_applied() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("menu_cli_broken_config_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("menu.toml");
    fs::write(&path, "currency_symbol = [1, 2]\n").expect("write config");

    let (settings, warnings) = load_settings(Some(&path));
    assert_eq!(settings.currency_symbol, "R");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("menu.toml"), "{}", warnings[0]);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
