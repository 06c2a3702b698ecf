use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub wizard: WizardConfig,
    pub list: ListConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WizardConfig {
    pub success_close_delay_ms: u32,
    /// Length of the probation period used to derive end dates.
    pub probation_months: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub search_debounce_ms: u32,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"

[wizard]
success_close_delay_ms = 1200
probation_months = 6

[list]
search_debounce_ms = 500
default_page_size = 10
page_size_options = [10, 25, 50, 100]

[uploads]
max_file_size_bytes = 10485760
allowed_extensions = ["pdf", "doc", "docx", "jpg", "jpeg", "png"]
"#;

/// Partial override document; every section and key is optional.
#[derive(Debug, Deserialize, Default)]
struct ConfigOverride {
    api: Option<ApiOverride>,
    wizard: Option<WizardOverride>,
    list: Option<ListOverride>,
    uploads: Option<UploadOverride>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiOverride {
    port: Option<u16>,
    prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WizardOverride {
    success_close_delay_ms: Option<u32>,
    probation_months: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct ListOverride {
    search_debounce_ms: Option<u32>,
    default_page_size: Option<usize>,
    page_size_options: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize, Default)]
struct UploadOverride {
    max_file_size_bytes: Option<u64>,
    allowed_extensions: Option<Vec<String>>,
}

/// Load the embedded defaults, then apply an optional TOML override.
pub fn load_config(override_toml: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;

    if let Some(raw) = override_toml.filter(|s| !s.trim().is_empty()) {
        let o: ConfigOverride = toml::from_str(raw)?;
        if let Some(api) = o.api {
            if let Some(port) = api.port {
                config.api.port = port;
            }
            if let Some(prefix) = api.prefix {
                config.api.prefix = prefix;
            }
        }
        if let Some(w) = o.wizard {
            if let Some(delay) = w.success_close_delay_ms {
                config.wizard.success_close_delay_ms = delay;
            }
            if let Some(months) = w.probation_months {
                config.wizard.probation_months = months;
            }
        }
        if let Some(l) = o.list {
            if let Some(ms) = l.search_debounce_ms {
                config.list.search_debounce_ms = ms;
            }
            if let Some(size) = l.default_page_size {
                config.list.default_page_size = size;
            }
            if let Some(options) = l.page_size_options {
                config.list.page_size_options = options;
            }
        }
        if let Some(u) = o.uploads {
            if let Some(max) = u.max_file_size_bytes {
                config.uploads.max_file_size_bytes = max;
            }
            if let Some(ext) = u.allowed_extensions {
                config.uploads.allowed_extensions =
                    ext.into_iter().map(|e| e.to_lowercase()).collect();
            }
        }
    }

    config.validate()?;
    Ok(config)
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1000..=1500).contains(&self.wizard.success_close_delay_ms) {
            return Err(ConfigError::Invalid {
                key: "wizard.success_close_delay_ms",
                reason: "must be between 1000 and 1500".into(),
            });
        }
        if self.wizard.probation_months == 0 {
            return Err(ConfigError::Invalid {
                key: "wizard.probation_months",
                reason: "must be positive".into(),
            });
        }
        if self.list.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "list.default_page_size",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded document is covered by `test_default_config_loads`.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| AppConfig {
            api: ApiConfig {
                port: 3000,
                prefix: "/api".into(),
            },
            wizard: WizardConfig {
                success_close_delay_ms: 1200,
                probation_months: 6,
            },
            list: ListConfig {
                search_debounce_ms: 500,
                default_page_size: 10,
                page_size_options: vec![10, 25, 50, 100],
            },
            uploads: UploadConfig {
                max_file_size_bytes: 10 * 1024 * 1024,
                allowed_extensions: ["pdf", "doc", "docx", "jpg", "jpeg", "png"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.wizard.probation_months, 6);
        assert_eq!(config.list.search_debounce_ms, 500);
        assert_eq!(config.uploads.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = load_config(Some("[wizard]\nprobation_months = 3\n")).unwrap();
        assert_eq!(config.wizard.probation_months, 3);
        assert_eq!(config.wizard.success_close_delay_ms, 1200);
        assert_eq!(config.api.prefix, "/api");
    }

    #[test]
    fn test_out_of_range_delay_rejected() {
        let err = load_config(Some("[wizard]\nsuccess_close_delay_ms = 5000\n")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "wizard.success_close_delay_ms", .. }));
    }

    #[test]
    fn test_malformed_override_is_error() {
        assert!(matches!(load_config(Some("[wizard")), Err(ConfigError::Parse(_))));
    }
}
