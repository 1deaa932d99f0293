//! `GnsConfig` load/override/validate exercised through the public API,
//! the way `cli::bootstrap::config` drives it.

use gns_domain::config::{CliOverrides, ConfigError, GnsConfig};

fn write_temp_toml(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("gns-config-test-{}.toml", fastrand::u64(..)));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn a_minimal_file_loads_with_every_section_defaulted() {
    let path = write_temp_toml("");

    let config = GnsConfig::load(&path, CliOverrides::default()).unwrap();

    assert_eq!(config.dht.replication_level, 10);
    assert_eq!(config.namecache.endpoint, "unix:///var/run/gns/namecache.sock");
    assert!(config.root_zones.zones.is_empty());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn cli_overrides_win_over_file_values() {
    let path = write_temp_toml(
        r#"
        [namecache]
        endpoint = "unix:///var/run/gns/namecache.sock"

        [dht]
        endpoint = "unix:///var/run/gns/dht.sock"
        "#,
    );

    let overrides = CliOverrides {
        namecache_endpoint: Some("unix:///tmp/namecache-override.sock".to_string()),
        dht_endpoint: None,
        log_level: Some("debug".to_string()),
    };
    let config = GnsConfig::load(&path, overrides).unwrap();

    assert_eq!(config.namecache.endpoint, "unix:///tmp/namecache-override.sock");
    assert_eq!(config.dht.endpoint, "unix:///var/run/gns/dht.sock");
    assert_eq!(config.logging.level, "debug");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn a_zero_replication_level_fails_validation() {
    let path = write_temp_toml(
        r#"
        [dht]
        replication_level = 0
        "#,
    );

    let result = GnsConfig::load(&path, CliOverrides::default());

    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn an_empty_root_zone_label_fails_validation() {
    let path = write_temp_toml(
        r#"
        [root_zones.zones]
        "" = "000G0037FH3QTBCK"
        "#,
    );

    let result = GnsConfig::load(&path, CliOverrides::default());

    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn a_missing_file_surfaces_an_io_error() {
    let path = std::env::temp_dir().join("gns-config-test-does-not-exist.toml");

    let result = GnsConfig::load(&path, CliOverrides::default());

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn configured_root_zones_are_reachable_by_label() {
    let path = write_temp_toml(
        r#"
        [root_zones.zones]
        gnu = "000G0037FH3QTBCK"
        "#,
    );

    let config = GnsConfig::load(&path, CliOverrides::default()).unwrap();

    assert_eq!(config.root_zones.lookup("gnu"), Some("000G0037FH3QTBCK"));
    assert_eq!(config.root_zones.lookup("missing"), None);

    std::fs::remove_file(&path).unwrap();
}
