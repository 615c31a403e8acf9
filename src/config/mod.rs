mod settings;

pub use settings::{ApiSettings, Config, ImportSettings, Thresholds};

use crate::error::{PressdeskError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.pressdesk/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "pressdesk") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.pressdesk/
    let home = dirs_home().ok_or_else(|| {
        PressdeskError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".pressdesk"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(PressdeskError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PressdeskError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "https://backend.example.com/api"
# token = "..."                # bearer token, or prefer:
token_env = "PRESSDESK_TOKEN"  # read the token from this env var

[import]
chunk_size = 50   # production entries per upload request

# Risk thresholds. Every dashboard and detector reads these values; there is
# no other place a threshold lives.
[thresholds]
at_risk_profit_pct = 20.0         # profit % below this => job at risk
low_margin_profit_pct = 10.0      # profit % below this => low margin
concentration_high_pct = 20.0     # revenue share >= this => high concentration
concentration_moderate_pct = 10.0 # revenue share >= this => moderate
clustering_share = 0.3            # fraction of jobs due in one period => cluster
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_with_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.import.chunk_size, 50);
        assert_eq!(config.thresholds.at_risk_profit_pct, 20.0);
        assert_eq!(config.thresholds.clustering_share, 0.3);
        assert_eq!(config.api.token_env.as_deref(), Some("PRESSDESK_TOKEN"));
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.import.chunk_size, 50);
        assert_eq!(config.thresholds.concentration_high_pct, 20.0);
        assert_eq!(config.thresholds.concentration_moderate_pct, 10.0);
    }

    #[test]
    fn resolve_token_prefers_explicit_value() {
        let api = ApiSettings {
            base_url: "https://x".into(),
            token: Some("abc".into()),
            token_env: Some("SOME_UNSET_VAR_12345".into()),
        };
        assert_eq!(api.resolve_token().as_deref(), Some("abc"));
    }

    #[test]
    fn resolve_token_empty_when_nothing_set() {
        let api = ApiSettings::default();
        assert!(api.resolve_token().is_none());
    }
}
