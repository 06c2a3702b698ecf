//! Runtime configuration for the browser bundle.
//!
//! Defaults are embedded in `contracts`; a TOML document stored under
//! [`CONFIG_STORAGE_KEY`] in `localStorage` overrides individual keys.

use contracts::shared::config::{load_config, AppConfig};
use once_cell::sync::OnceCell;

pub const CONFIG_STORAGE_KEY: &str = "hr_registration_config";

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Configuration for this page load. Read once, on first use.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| resolve_config(read_override().as_deref()))
}

/// Apply an override, falling back to the defaults when it does not parse.
pub fn resolve_config(override_toml: Option<&str>) -> AppConfig {
    match load_config(override_toml) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring configuration override: {}", e);
            AppConfig::default()
        }
    }
}

fn read_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(CONFIG_STORAGE_KEY).ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_override_applies() {
        let config = resolve_config(Some("[list]\nsearch_debounce_ms = 300\n"));
        assert_eq!(config.list.search_debounce_ms, 300);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_broken_override_falls_back() {
        let config = resolve_config(Some("[wizard\nnot toml"));
        assert_eq!(config, AppConfig::default());

        let out_of_range = resolve_config(Some("[wizard]\nsuccess_close_delay_ms = 5000\n"));
        assert_eq!(out_of_range.wizard.success_close_delay_ms, 1200);
    }
}
