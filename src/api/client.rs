use super::types::{classify_lock_response, UnlockRequest};
use super::{DatasetApi, LockState, UnlockOutcome};
use crate::config::{Config, Dataset};
use crate::error::{Result, UnlockError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client for the TrueNAS v2.0 REST API.
///
/// Holds one pooled `reqwest::Client` for the life of the process. The bearer
/// credential and passphrases are resolved on every request.
pub struct TrueNasClient {
    config: Arc<Config>,
    base_url: String,
    client: Client,
}

impl TrueNasClient {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let timeouts = config.timeouts;
        let client = Client::builder()
            .connect_timeout(timeouts.connect())
            .read_timeout(timeouts.read())
            .timeout(timeouts.request_budget())
            .danger_accept_invalid_certs(config.skip_cert_verify)
            .build()?;

        if config.skip_cert_verify {
            warn!("TLS certificate verification is disabled for {}", config.host);
        }

        Ok(Self {
            base_url: config.api_base_url(),
            config,
            client,
        })
    }

    async fn query_lock_state(&self, dataset: &Dataset) -> Result<LockState> {
        let api_key = self.config.api_key()?;
        let url = format!("{}/pool/dataset", self.base_url);
        debug!("GET {url} id={}", dataset.path());

        let resp = self
            .client
            .get(&url)
            .query(&[("id", dataset.path())])
            .bearer_auth(api_key.expose())
            .send()
            .await?;
        let resp = ensure_success(resp)?;

        let body: serde_json::Value = resp.json().await.map_err(|e| UnlockError::ApiResponse {
            status: 200,
            message: format!("unparseable body: {e}"),
        })?;
        Ok(classify_lock_response(&body))
    }

    async fn send_unlock(&self, dataset: &Dataset) -> Result<()> {
        let api_key = self.config.api_key()?;
        let passphrase = dataset.passphrase(self.config.secrets)?;
        let url = format!("{}/pool/dataset/unlock", self.base_url);
        debug!("POST {url} id={}", dataset.path());

        let body = UnlockRequest::single(dataset.path(), passphrase.expose());
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await?;
        ensure_success(resp)?;
        Ok(())
    }
}

/// The appliance answers 200 on success; any other status, 2xx included, is an error.
fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::OK {
        return Ok(resp);
    }
    Err(UnlockError::ApiResponse {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("API error").to_string(),
    })
}

#[async_trait]
impl DatasetApi for TrueNasClient {
    async fn check_locked(&self, dataset: &Dataset) -> Result<LockState> {
        match self.query_lock_state(dataset).await {
            Ok(state) => Ok(state),
            Err(err @ UnlockError::SecretUnreadable { .. }) => Err(err),
            Err(err) => {
                warn!("Lock state of {} unavailable: {err}", dataset.path());
                Ok(LockState::Unknown(err.to_string()))
            }
        }
    }

    async fn unlock(&self, dataset: &Dataset) -> Result<UnlockOutcome> {
        match self.send_unlock(dataset).await {
            Ok(()) => Ok(UnlockOutcome::Unlocked),
            Err(err @ UnlockError::SecretUnreadable { .. }) => Err(err),
            Err(err) => {
                warn!("Unlock request for {} failed: {err}", dataset.path());
                Ok(UnlockOutcome::Failed(err.to_string()))
            }
        }
    }
}
