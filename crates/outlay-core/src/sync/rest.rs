//! HTTP implementations of the remote boundary
//!
//! Talks to a document store over a small REST surface:
//!
//! - `PUT  {base}/collections/{collection}/documents/{key}` - full replace
//! - `GET  {base}/collections/{collection}/documents?field=..&value=..`
//!
//! Every transport or non-2xx failure is reported uniformly; the coordinator
//! does not distinguish transient from permanent errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{NetworkMonitor, RemoteStore};
use crate::config::SyncConfig;
use crate::error::{Error, Result};

/// REST client for the remote document store
#[derive(Clone)]
pub struct RestRemoteStore {
    http_client: Client,
    base_url: String,
}

impl RestRemoteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config; None when no remote is configured
    pub fn from_config(config: &SyncConfig) -> Option<Self> {
        config.base_url.as_deref().map(Self::new)
    }

    fn document_url(&self, collection: &str, key: &str) -> String {
        format!(
            "{}/collections/{}/documents/{}",
            self.base_url, collection, key
        )
    }
}

#[async_trait]
impl RemoteStore for RestRemoteStore {
    async fn put_document(&self, collection: &str, key: &str, document: Value) -> Result<()> {
        let url = self.document_url(collection, key);
        let response = self.http_client.put(&url).json(&document).send().await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "put {} returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn fetch_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/collections/{}/documents", self.base_url, collection);
        let response = self
            .http_client
            .get(&url)
            .query(&[("field", field), ("value", value)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "query {} returned {}",
                url,
                response.status()
            )));
        }

        let documents = response.json::<Vec<Value>>().await?;
        Ok(documents)
    }
}

/// Connectivity check that probes the remote base URL
///
/// A HEAD request with a short timeout; any response at all counts as
/// reachable. The answer is point-in-time only.
pub struct ProbeMonitor {
    http_client: Client,
    base_url: String,
}

impl ProbeMonitor {
    const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl NetworkMonitor for ProbeMonitor {
    async fn is_network_available(&self) -> bool {
        self.http_client
            .head(&self.base_url)
            .timeout(Self::PROBE_TIMEOUT)
            .send()
            .await
            .is_ok()
    }
}
