#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_to_field;
    use crate::config::{AppConfig, Overrides};
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use standalone_preact::OutputFormat;
    use std::path::PathBuf;

    fn clear_env() {
        unsafe {
            for key in ["REGISTRY", "HOST", "PORT", "OUT_DIR", "FORMAT"] {
                std::env::remove_var(format!("STANDALONE_PREACT_{key}"));
            }
        }
    }

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("OUT_DIR"), "outDir");
        assert_eq!(env_key_to_field("PORT"), "port");
        assert_eq!(env_key_to_field("registry"), "registry");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::load(None, &Overrides::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:9697");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_is_an_error() {
        clear_env();
        let err = AppConfig::load(Some(&PathBuf::from("/nonexistent/sp.json")), &Overrides::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_layers_override_in_order() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standalone-preact.json");
        std::fs::write(
            &path,
            r#"{ "port": 8000, "outDir": "from-file", "format": "global", "host": "0.0.0.0" }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("STANDALONE_PREACT_OUT_DIR", "from-env");
            std::env::set_var("STANDALONE_PREACT_PORT", "8100");
        }

        let overrides = Overrides {
            port: Some(8200),
            ..Default::default()
        };
        let config = AppConfig::load(Some(&path), &overrides).unwrap();
        clear_env();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.format, OutputFormat::Iife);
        assert_eq!(config.out_dir, PathBuf::from("from-env"));
        assert_eq!(config.port, 8200);
        assert_eq!(config.registry, PathBuf::from("registry.json"));
    }

    #[test]
    #[serial]
    fn test_unknown_keys_are_rejected() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "entry": "src/index.ts" }"#).unwrap();

        let err = AppConfig::load(Some(&path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_empty_host_is_rejected() {
        clear_env();
        let overrides = Overrides {
            host: Some(" ".to_string()),
            ..Default::default()
        };
        let err = AppConfig::load(None, &overrides).unwrap_err();
        assert!(err.to_string().contains("Invalid value for 'host'"));
    }
}
