// file: src/gateway/transport.rs
// description: single timed HTTP exchange with one metric observation per call
// reference: https://docs.rs/reqwest

use crate::error::{GatewayError, Result};
use crate::utils::{GatewayMetrics, InvocationTimer};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, error};

/// Upper bound for one request, including reading the body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and fully read body of a backend response.
#[derive(Debug)]
pub struct Exchange {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Exchange {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    metrics: GatewayMetrics,
}

impl Transport {
    pub fn new(metrics: GatewayMetrics) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GatewayError::ClientBuild)?;

        Ok(Self { client, metrics })
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub async fn post_json(&self, url: Url, body: Vec<u8>, label: &str) -> Result<Exchange> {
        self.execute(Method::POST, url, Some(body), label).await
    }

    pub async fn get(&self, url: Url, label: &str) -> Result<Exchange> {
        self.execute(Method::GET, url, None, label).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        label: &str,
    ) -> Result<Exchange> {
        let timer = InvocationTimer::start(method.clone(), label);
        let url_text = url.to_string();

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        debug!("{} request url={}", method, url_text);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("HTTP request invocation failed. err={}", e);
                timer.finish_with_error(&self.metrics);
                return Err(GatewayError::Transport {
                    method,
                    url: url_text,
                    source: e,
                });
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                error!("Reading response body failed. status={} err={}", status, e);
                timer.finish(&self.metrics, status);
                return Err(GatewayError::Transport {
                    method,
                    url: url_text,
                    source: e,
                });
            }
        };

        let exchange = Exchange { status, body };
        debug!("Response body: {}", exchange.body_text());

        if !status.is_success() {
            debug!("{} status code not ok. status_code={}", label, status);
        }
        timer.finish(&self.metrics, status);

        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_ten_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
    }

    #[test]
    fn test_body_text_is_lossy() {
        let exchange = Exchange {
            status: StatusCode::OK,
            body: vec![b'o', b'k', 0xff],
        };
        assert!(exchange.body_text().starts_with("ok"));
    }
}
