// file: src/gateway/client.rs
// description: document store, load and search operations against the backend
// reference: https://docs.rs/reqwest

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::gateway::transport::{Exchange, Transport};
use crate::models::{Document, LoadedDocument, Query};
use crate::utils::GatewayMetrics;
use reqwest::{StatusCode, Url};
use tracing::{debug, error, info, warn};

/// Metric label for document create and lookup calls.
pub const DOCUMENTS_LABEL: &str = "/v1/documents";
/// Metric label for search calls.
pub const SEARCH_LABEL: &str = "/v1/search";

#[derive(Debug, Clone)]
pub struct DocumentGateway {
    base_url: Url,
    transport: Transport,
}

impl DocumentGateway {
    pub fn new(config: &GatewayConfig, metrics: GatewayMetrics) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let transport = Transport::new(metrics)?;

        info!("Document gateway configured for {}", base_url);

        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        self.transport.metrics()
    }

    /// POSTs `document` to `/v1/documents`. Only a 200 reply counts as stored.
    pub async fn store_document(&self, document: &Document) -> Result<()> {
        debug!("storeDocument {:?}", document);

        let body = serde_json::to_vec(document).map_err(GatewayError::Serialization)?;
        let url = self.endpoint(&["v1", "documents"])?;

        let exchange = self.transport.post_json(url, body, DOCUMENTS_LABEL).await?;

        if exchange.status != StatusCode::OK {
            warn!(
                "POST {} call status!=200. status={} body={}",
                DOCUMENTS_LABEL,
                exchange.status,
                exchange.body_text()
            );
            return Err(GatewayError::Status {
                operation: "store document",
                status: exchange.status,
            });
        }

        debug!("Document created successfully. data={}", exchange.body_text());
        Ok(())
    }

    /// GETs `/v1/documents/{id}`.
    ///
    /// Statuses below 500 are not errors: the parsed body comes back with the
    /// status so callers can tell a 404 apart from a hit.
    pub async fn load_document(&self, id: &str) -> Result<LoadedDocument> {
        debug!("loadDocument {}", id);

        let url = self.endpoint(&["v1", "documents", id])?;
        let exchange = self.transport.get(url, DOCUMENTS_LABEL).await?;

        if exchange.status.is_server_error() {
            error!(
                "Error getting document. id={} status={}",
                id, exchange.status
            );
            return Err(GatewayError::Status {
                operation: "load document",
                status: exchange.status,
            });
        }

        let document = decode(&exchange)?;
        Ok(LoadedDocument::new(document, exchange.status))
    }

    /// POSTs `query` to `/v1/search` and returns the backend's JSON reply.
    pub async fn search_documents(&self, query: &Query) -> Result<Document> {
        debug!("searchDocument {:?}", query);

        let body = serde_json::to_vec(query).map_err(GatewayError::Serialization)?;
        let url = self.endpoint(&["v1", "search"])?;

        let exchange = self.transport.post_json(url, body, SEARCH_LABEL).await?;

        if exchange.status != StatusCode::OK {
            warn!("Couldn't search documents. status={}", exchange.status);
            return Err(GatewayError::Status {
                operation: "search documents",
                status: exchange.status,
            });
        }

        decode(&exchange)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::Config(format!("base_url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn decode(exchange: &Exchange) -> Result<Document> {
    serde_json::from_slice(&exchange.body).map_err(|e| {
        error!("Error parsing json. status={} err={}", exchange.status, e);
        GatewayError::Decode {
            status: exchange.status,
            source: e,
        }
    })
}
