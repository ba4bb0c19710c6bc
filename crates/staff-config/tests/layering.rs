//! Integration tests for TOML and environment layering.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use staff_config::StaffConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://hr.example.com/api/"
timeout_secs = 30

[directory]
page_size = 25
debounce_ms = 250
sort_field = "name"
sort_descending = false

[dashboard]
max_concurrent_task_fetches = 4
"#,
        )?;

        let config: StaffConfig = Figment::from(Serialized::defaults(StaffConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url(), "https://hr.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.directory.page_size, 25);
        assert_eq!(config.directory.debounce_ms, 250);
        assert_eq!(config.directory.sort_field, "name");
        assert!(!config.directory.sort_descending);
        assert_eq!(config.dashboard.max_concurrent_task_fetches, 4);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://from-toml.example.com/api"
"#,
        )?;
        jail.set_env("STAFFDESK_API__BASE_URL", "https://from-env.example.com/api");

        let config: StaffConfig = Figment::from(Serialized::defaults(StaffConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("STAFFDESK_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url(), "https://from-env.example.com/api");
        Ok(())
    });
}

#[test]
fn load_reads_project_config_and_env() {
    Jail::expect_with(|jail| {
        jail.create_dir(".staffdesk")?;
        jail.create_file(
            ".staffdesk/config.toml",
            r#"
[directory]
page_size = 50
"#,
        )?;
        jail.set_env("STAFFDESK_DIRECTORY__DEBOUNCE_MS", "100");
        jail.set_env("STAFFDESK_SESSION__CREDENTIALS_PATH", "/tmp/staffdesk-test.json");

        let config = StaffConfig::load().expect("config loads");
        assert_eq!(config.directory.page_size, 50);
        assert_eq!(config.directory.debounce_ms, 100);
        assert_eq!(
            config.session.resolved_path().as_deref(),
            Some(std::path::Path::new("/tmp/staffdesk-test.json"))
        );
        Ok(())
    });
}

#[test]
fn load_rejects_zero_page_size() {
    Jail::expect_with(|jail| {
        jail.set_env("STAFFDESK_DIRECTORY__PAGE_SIZE", "0");
        assert!(StaffConfig::load().is_err());
        Ok(())
    });
}
