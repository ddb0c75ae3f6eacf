use crate::config::{AppConfig, Overrides};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::Path;

/// Config file picked up from the working directory.
pub const CONFIG_FILE: &str = "standalone-preact.json";

/// Prefix of the environment layer, e.g. `STANDALONE_PREACT_OUT_DIR`.
pub const ENV_PREFIX: &str = "STANDALONE_PREACT_";

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// An explicit `config_path` must exist; the implicit
    /// `standalone-preact.json` is optional.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                value: String::new(),
                hint: "Use an address such as 127.0.0.1 or 0.0.0.0".to_string(),
            }
            .into());
        }

        if self.registry.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "registry".to_string(),
                value: String::new(),
                hint: "Point it at a snapshot written by `standalone-preact snapshot`".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// `OUT_DIR` -> `outDir`
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}
