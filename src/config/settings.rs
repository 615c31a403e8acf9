use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub import: ImportSettings,
    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiSettings {
    #[serde(default)]
    pub base_url: String,
    /// Bearer token, stored directly in config.toml.
    #[serde(default)]
    pub token: Option<String>,
    /// Name of an environment variable holding the token (preferred).
    #[serde(default)]
    pub token_env: Option<String>,
}

impl ApiSettings {
    /// Resolve the bearer token: explicit value wins, then the named env var.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(t) = &self.token {
            if !t.is_empty() {
                return Some(t.clone());
            }
        }
        self.token_env
            .as_ref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImportSettings {
    /// Entries per create-entries request.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    50
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

/// All risk thresholds in one place. The dashboards and detectors read these
/// rather than carrying their own magic numbers.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct Thresholds {
    /// Jobs with profit % below this are "at risk".
    #[serde(default = "default_at_risk")]
    pub at_risk_profit_pct: f64,
    /// Jobs with profit % below this are "low margin".
    #[serde(default = "default_low_margin")]
    pub low_margin_profit_pct: f64,
    /// A client/process share of revenue at or above this is high concentration.
    #[serde(default = "default_concentration_high")]
    pub concentration_high_pct: f64,
    /// A share at or above this (but below high) is moderate concentration.
    #[serde(default = "default_concentration_moderate")]
    pub concentration_moderate_pct: f64,
    /// A period holding more than this fraction of all jobs is a delivery cluster.
    #[serde(default = "default_clustering_share")]
    pub clustering_share: f64,
}

fn default_at_risk() -> f64 {
    20.0
}

fn default_low_margin() -> f64 {
    10.0
}

fn default_concentration_high() -> f64 {
    20.0
}

fn default_concentration_moderate() -> f64 {
    10.0
}

fn default_clustering_share() -> f64 {
    0.3
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            at_risk_profit_pct: default_at_risk(),
            low_margin_profit_pct: default_low_margin(),
            concentration_high_pct: default_concentration_high(),
            concentration_moderate_pct: default_concentration_moderate(),
            clustering_share: default_clustering_share(),
        }
    }
}
