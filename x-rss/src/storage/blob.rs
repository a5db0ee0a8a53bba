//! Azure Blob Storage sink over the Blob REST API.
//!
//! Authenticates with a shared access signature taken from the connection
//! string. Shared-key (account key) signing is not implemented.

use crate::config::FetchConfig;
use crate::traits::FeedSink;
use crate::types::{Result, XRssError};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const API_VERSION: &str = "2021-08-06";
const CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Characters that must be percent-encoded in a blob name
const BLOB_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Service endpoint and SAS token extracted from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEndpoint {
    pub endpoint: String,
    pub sas: String,
}

impl BlobEndpoint {
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let parts: HashMap<&str, &str> = connection_string
            .split(';')
            .filter_map(|part| part.trim().split_once('='))
            .collect();

        let endpoint = match (parts.get("BlobEndpoint"), parts.get("AccountName")) {
            (Some(endpoint), _) => endpoint.trim_end_matches('/').to_string(),
            (None, Some(account)) => {
                let protocol = parts.get("DefaultEndpointsProtocol").copied().unwrap_or("https");
                let suffix = parts.get("EndpointSuffix").copied().unwrap_or("core.windows.net");
                format!("{}://{}.blob.{}", protocol, account, suffix)
            }
            (None, None) => {
                return Err(XRssError::Config(
                    "Connection string needs BlobEndpoint or AccountName".to_string(),
                ))
            }
        };

        let sas = match parts.get("SharedAccessSignature") {
            Some(sas) => sas.trim_start_matches('?').to_string(),
            None if parts.contains_key("AccountKey") => {
                return Err(XRssError::Config(
                    "Account key connection strings are not supported, provide a SharedAccessSignature".to_string(),
                ))
            }
            None => {
                return Err(XRssError::Config(
                    "Connection string has no SharedAccessSignature".to_string(),
                ))
            }
        };

        Ok(Self { endpoint, sas })
    }
}

pub struct BlobSink {
    client: Client,
    container_url: String,
    blob_url: String,
    sas: String,
}

impl BlobSink {
    pub fn new(config: &FetchConfig, connection_string: &str, container: &str, blob_name: &str) -> Result<Self> {
        let endpoint = BlobEndpoint::from_connection_string(connection_string)?;
        Self::with_endpoint(config, endpoint, container, blob_name)
    }

    pub fn with_endpoint(config: &FetchConfig, endpoint: BlobEndpoint, container: &str, blob_name: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let container_url = format!("{}/{}", endpoint.endpoint, container);
        let blob_url = format!("{}/{}", container_url, utf8_percent_encode(blob_name, BLOB_NAME_SET));
        // Fail on a bad endpoint now rather than at upload time.
        Url::parse(&blob_url)?;

        Ok(Self {
            client,
            container_url,
            blob_url,
            sas: endpoint.sas,
        })
    }

    fn signed(&self, url: &str, extra_query: Option<&str>) -> Result<Url> {
        let query = match extra_query {
            Some(extra) if self.sas.is_empty() => extra.to_string(),
            Some(extra) => format!("{}&{}", extra, self.sas),
            None => self.sas.clone(),
        };
        Ok(Url::parse(&format!("{}?{}", url, query))?)
    }

    async fn create_container_if_missing(&self) -> Result<()> {
        let url = self.signed(&self.container_url, Some("restype=container"))?;
        let response = self
            .client
            .put(url)
            .header("x-ms-version", API_VERSION)
            .header("Content-Length", "0")
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                info!("Created blob container {}", self.container_url);
                Ok(())
            }
            StatusCode::CONFLICT => {
                debug!("Blob container {} already exists", self.container_url);
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(XRssError::Storage { status: status.as_u16(), body })
            }
        }
    }
}

#[async_trait]
impl FeedSink for BlobSink {
    fn target(&self) -> String {
        self.blob_url.clone()
    }

    async fn save(&self, content: &str) -> Result<()> {
        self.create_container_if_missing().await?;

        debug!("Uploading {} bytes to {}", content.len(), self.blob_url);
        let response = self
            .client
            .put(self.signed(&self.blob_url, None)?)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header("Content-Type", CONTENT_TYPE)
            .body(content.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(XRssError::Storage { status: status.as_u16(), body });
        }

        info!("Uploaded RSS feed to {}", self.blob_url);
        Ok(())
    }
}
