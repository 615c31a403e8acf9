//! REST backend client: JSON over HTTPS with a bearer token.
//!
//! The backend owns all writes; this console only reads snapshots and
//! submits production entries produced by the import pipeline. Analytics
//! commands can bypass the network entirely with a local JSON snapshot.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::{PressdeskError, Result};
use crate::import::{EntrySink, NewProductionEntry, ProductionEntry};
use crate::job::{Client, Job};
use crate::config::ApiSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let token = settings
            .resolve_token()
            .ok_or(PressdeskError::MissingApiToken)?;

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let body = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .call()
            .map_err(|e| PressdeskError::ApiRequest {
                url: url.clone(),
                reason: e.to_string(),
            })?
            .body_mut()
            .read_to_string()
            .map_err(|e| PressdeskError::ApiResponse {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| PressdeskError::ApiResponse {
            url,
            reason: e.to_string(),
        })
    }

    pub fn fetch_jobs(&self) -> Result<Vec<Job>> {
        self.get_json("jobs")
    }

    pub fn fetch_clients(&self) -> Result<Vec<Client>> {
        self.get_json("clients")
    }

    /// Already-persisted production entries, used for duplicate detection
    /// during import.
    pub fn fetch_production_entries(&self) -> Result<Vec<ProductionEntry>> {
        self.get_json("production_entries")
    }

    /// Submit one chunk of production entries.
    pub fn create_production_entries(&self, batch: &[NewProductionEntry]) -> Result<()> {
        let url = self.url("production_entries/batch");
        debug!("POST {url} ({} entries)", batch.len());
        let body = serde_json::to_string(&serde_json::json!({ "entries": batch }))
            .map_err(|e| PressdeskError::ApiRequest {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        self.agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| PressdeskError::ApiRequest {
                url,
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl EntrySink for ApiClient {
    fn submit(&mut self, batch: &[NewProductionEntry]) -> Result<()> {
        self.create_production_entries(batch)
    }
}

/// Read a job snapshot from a local JSON export (an array of job records in
/// the backend's wire shape).
pub fn load_jobs_snapshot(path: &Path) -> Result<Vec<Job>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PressdeskError::SnapshotRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let jobs: Vec<Job> =
        serde_json::from_str(&content).map_err(|e| PressdeskError::SnapshotRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!("loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}
