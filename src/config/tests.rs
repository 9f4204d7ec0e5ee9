use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_masthead_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("MASTHEAD_PORT");
        env::remove_var("MASTHEAD_BIND_ADDR");
        env::remove_var("MASTHEAD_DB_PATH");
        env::remove_var("MASTHEAD_VECTORS_PATH");
        env::remove_var("MASTHEAD_TITLES_PATH");
        env::remove_var("MASTHEAD_RULES_PATH");
        env::remove_var("MASTHEAD_EMBED_URL");
        env::remove_var("MASTHEAD_EMBEDDING_DIM");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_masthead_env();
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.db_path, PathBuf::from("./data/titles.db"));
    assert_eq!(config.rules_path, PathBuf::from("./data/disallowed_rules.json"));
    assert_eq!(config.embed_url, DEFAULT_EMBED_URL);
    assert_eq!(config.embedding_dim, 384);
}

#[test]
#[serial]
fn test_from_env_uses_defaults_when_unset() {
    clear_masthead_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.embedding_dim, 384);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_masthead_env();
    with_env_vars(
        &[
            ("MASTHEAD_PORT", "9090"),
            ("MASTHEAD_BIND_ADDR", "0.0.0.0"),
            ("MASTHEAD_DB_PATH", "/tmp/titles.db"),
            ("MASTHEAD_EMBED_URL", "http://embedder:9000"),
            ("MASTHEAD_EMBEDDING_DIM", "768"),
        ],
        || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.port, 9090);
            assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
            assert_eq!(config.db_path, PathBuf::from("/tmp/titles.db"));
            assert_eq!(config.embed_url, "http://embedder:9000");
            assert_eq!(config.embedding_dim, 768);
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_rejected() {
    clear_masthead_env();
    with_env_vars(&[("MASTHEAD_PORT", "not-a-port")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::PortParseError { .. })
        ));
    });
    with_env_vars(&[("MASTHEAD_PORT", "0")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidPort { .. })
        ));
    });
}

#[test]
#[serial]
fn test_invalid_embedding_dim_rejected() {
    clear_masthead_env();
    with_env_vars(&[("MASTHEAD_EMBEDDING_DIM", "0")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidEmbeddingDim { .. })
        ));
    });
}

#[test]
#[serial]
fn test_socket_addr() {
    clear_masthead_env();
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_validate_rejects_directory_paths() {
    clear_masthead_env();
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: dir.path().to_path_buf(),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
#[serial]
fn test_snapshot_paths_carries_both_files() {
    clear_masthead_env();
    let config = Config::default();
    let paths = config.snapshot_paths();
    assert_eq!(paths.vectors, config.vectors_path);
    assert_eq!(paths.titles, config.titles_path);
}
