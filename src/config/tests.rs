use std::env;
use std::fs;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

use super::settings::Settings;
use super::{DeliveryMode, load_config};
use crate::store::DeliveryPolicy;

/// Run `f` with a fresh temporary directory as the working directory.
fn in_temp_dir<T>(f: impl FnOnce(&TempDir) -> T) -> T {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");
    let result = f(&tmp);
    env::set_current_dir(orig).expect("restore cwd");
    result
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.store.delivery, DeliveryMode::Rendezvous);
    assert_eq!(settings.store.send_timeout_ms, 1000);
    assert_eq!(settings.store.buffer_capacity, 64);
    assert!(settings.store.preload.is_empty());
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_delivery_policy_from_settings() {
    let mut settings = Settings::default();
    assert_eq!(settings.store.delivery_policy(), DeliveryPolicy::Rendezvous);

    settings.store.delivery = DeliveryMode::Timeout;
    settings.store.send_timeout_ms = 250;
    assert_eq!(
        settings.store.delivery_policy(),
        DeliveryPolicy::RendezvousTimeout(Duration::from_millis(250))
    );

    settings.store.delivery = DeliveryMode::Buffered;
    settings.store.buffer_capacity = 8;
    assert_eq!(
        settings.store.delivery_policy(),
        DeliveryPolicy::Buffered { capacity: 8 }
    );
}

#[test]
#[serial]
fn test_load_config_without_sources_uses_defaults() {
    let cfg = in_temp_dir(|_| load_config().expect("load_config failed"));
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    let cfg = in_temp_dir(|_| {
        fs::create_dir_all("config").expect("create config dir");
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [store]
            delivery = "buffered"
            buffer_capacity = 16

            [store.preload]
            test_topic = ["preloaded data 1", "preloaded data 2"]
        "#;
        fs::write("config/default.toml", toml).expect("write config file");
        load_config().expect("load_config failed")
    });

    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.store.delivery, DeliveryMode::Buffered);
    assert_eq!(cfg.store.buffer_capacity, 16);
    // untouched keys keep their defaults
    assert_eq!(cfg.store.send_timeout_ms, 1000);
    assert_eq!(cfg.log.level, "info");
    assert_eq!(
        cfg.store.preload.get("test_topic"),
        Some(&vec![
            "preloaded data 1".to_string(),
            "preloaded data 2".to_string()
        ])
    );
}

#[test]
#[serial]
fn test_load_config_from_environment() {
    let cfg = temp_env::with_vars(
        [
            ("TOPICLOG_SERVER__PORT", Some("9100")),
            ("TOPICLOG_STORE__DELIVERY", Some("timeout")),
            ("TOPICLOG_STORE__SEND_TIMEOUT_MS", Some("250")),
            ("TOPICLOG_LOG__LEVEL", Some("debug")),
        ],
        || in_temp_dir(|_| load_config().expect("load_config failed")),
    );

    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.store.delivery, DeliveryMode::Timeout);
    assert_eq!(cfg.store.send_timeout_ms, 250);
    assert_eq!(cfg.log.level, "debug");
}
