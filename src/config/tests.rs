use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

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

fn clear_sentinel_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SENTINEL_PORT");
        env::remove_var("SENTINEL_BIND_ADDR");
        env::remove_var("SENTINEL_QDRANT_URL");
        env::remove_var("SENTINEL_QDRANT_COLLECTION");
        env::remove_var("SENTINEL_LIMITER_URL");
        env::remove_var("SENTINEL_TOKEN_CAP");
        env::remove_var("SENTINEL_MODEL_PROJECT");
        env::remove_var("SENTINEL_MODEL_LOCATION");
        env::remove_var("SENTINEL_PRIMARY_MODEL");
        env::remove_var("SENTINEL_FALLBACK_MODEL");
        env::remove_var("SENTINEL_EMBEDDING_MODEL");
        env::remove_var("SENTINEL_EXTRACTOR_MODEL");
        env::remove_var("SENTINEL_EVALUATOR_MODEL");
        env::remove_var("SENTINEL_EMBEDDING_DIM");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(config.qdrant_url, DEFAULT_QDRANT_URL);
    assert_eq!(config.qdrant_collection, DEFAULT_QDRANT_COLLECTION);
    assert_eq!(config.per_user_token_cap, 10_000);
    assert_eq!(config.embedding_dim, DEFAULT_EMBEDDING_DIM);
}

#[test]
fn test_socket_addr() {
    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_sentinel_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.primary_model, "gemini-2.5-flash");
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_custom_bind_addr() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_BIND_ADDR", "127.0.0.1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_PORT", "0")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_PORT", "not_a_port")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_BIND_ADDR", "not.an.ip.address")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_custom_token_cap_and_models() {
    clear_sentinel_env();

    with_env_vars(
        &[
            ("SENTINEL_TOKEN_CAP", "50000"),
            ("SENTINEL_PRIMARY_MODEL", "gemini-custom-primary"),
            ("SENTINEL_FALLBACK_MODEL", "gemini-custom-fallback"),
            ("SENTINEL_QDRANT_URL", "http://qdrant.cluster:6334"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.per_user_token_cap, 50_000);
            assert_eq!(config.primary_model, "gemini-custom-primary");
            assert_eq!(config.fallback_model, "gemini-custom-fallback");
            assert_eq!(config.qdrant_url, "http://qdrant.cluster:6334");
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_token_cap_uses_default() {
    clear_sentinel_env();

    with_env_vars(&[("SENTINEL_TOKEN_CAP", "not_a_number")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.per_user_token_cap, 10_000);
    });
}

#[test]
fn test_validate_rejects_zero_embedding_dim() {
    let config = Config {
        embedding_dim: 0,
        ..Default::default()
    };

    let result = config.validate();
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ConfigError::InvalidEmbeddingDim { .. }));
}

#[test]
fn test_validate_rejects_empty_collection_name() {
    let config = Config {
        qdrant_collection: String::new(),
        ..Default::default()
    };

    let result = config.validate();
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ConfigError::MissingEnvVar { .. }));
}

#[test]
fn test_validate_success_with_defaults() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("invalid port"));
    assert!(err.to_string().contains("0"));
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::MissingEnvVar {
        name: "SENTINEL_QDRANT_COLLECTION",
    };
    assert!(err.to_string().contains("SENTINEL_QDRANT_COLLECTION"));
}
