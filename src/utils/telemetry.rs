// file: src/utils/telemetry.rs
// description: invocation latency histogram and request timing
// reference: https://docs.rs/prometheus

use crate::error::{GatewayError, Result};
use lazy_static::lazy_static;
use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use reqwest::{Method, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

pub const METRIC_NAMESPACE: &str = "document_gateway";
pub const METRIC_NAME: &str = "invocation_seconds";
pub const LABEL_NAMES: [&str; 3] = ["method", "url", "status"];

/// Status label used when no response was received.
pub const ERROR_STATUS_LABEL: &str = "error";

const INVOCATION_BUCKETS: [f64; 3] = [0.1, 1.0, 10.0];

lazy_static! {
    static ref GLOBAL_METRICS: std::result::Result<GatewayMetrics, String> =
        GatewayMetrics::register(prometheus::default_registry()).map_err(|e| e.to_string());
}

/// Histogram of backend invocations keyed by (method, endpoint label, status).
#[derive(Clone)]
pub struct GatewayMetrics {
    invocations: HistogramVec,
}

impl GatewayMetrics {
    /// Creates the histogram and registers it into `registry`.
    ///
    /// Registering twice into the same registry fails.
    pub fn register(registry: &Registry) -> Result<Self> {
        let opts = HistogramOpts::new(METRIC_NAME, "Document backend invocations")
            .namespace(METRIC_NAMESPACE)
            .buckets(INVOCATION_BUCKETS.to_vec());

        let invocations = HistogramVec::new(opts, &LABEL_NAMES)?;
        registry.register(Box::new(invocations.clone()))?;

        Ok(Self { invocations })
    }

    /// Process-wide handle registered in the default registry on first use.
    /// Later calls return the same handle.
    pub fn global() -> Result<&'static GatewayMetrics> {
        GLOBAL_METRICS
            .as_ref()
            .map_err(|e| GatewayError::Metrics(prometheus::Error::Msg(e.clone())))
    }

    pub fn observe(&self, method: &Method, label: &str, status: &str, elapsed: Duration) {
        self.invocations
            .with_label_values(&[method.as_str(), label, status])
            .observe(elapsed.as_secs_f64());
    }

    /// Number of observations recorded for one label tuple.
    pub fn observation_count(&self, method: &Method, label: &str, status: &str) -> u64 {
        self.invocations
            .with_label_values(&[method.as_str(), label, status])
            .get_sample_count()
    }
}

impl fmt::Debug for GatewayMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayMetrics")
            .field("name", &format!("{}_{}", METRIC_NAMESPACE, METRIC_NAME))
            .finish()
    }
}

/// Encodes every metric family of `registry` in the text exposition format.
pub fn render(registry: &Registry) -> Result<String> {
    let families = registry.gather();
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| GatewayError::Metrics(prometheus::Error::Msg(e.to_string())))
}

/// Times one backend invocation and records it exactly once.
pub struct InvocationTimer {
    method: Method,
    label: String,
    start: Instant,
}

impl InvocationTimer {
    pub fn start(method: Method, label: &str) -> Self {
        Self {
            method,
            label: label.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self, metrics: &GatewayMetrics, status: StatusCode) -> Duration {
        self.record(metrics, status.as_str())
    }

    pub fn finish_with_error(self, metrics: &GatewayMetrics) -> Duration {
        self.record(metrics, ERROR_STATUS_LABEL)
    }

    fn record(self, metrics: &GatewayMetrics, status: &str) -> Duration {
        let elapsed = self.elapsed();
        metrics.observe(&self.method, &self.label, status, elapsed);
        debug!(
            "{} {} status={} in {:.3}s",
            self.method,
            self.label,
            status,
            elapsed.as_secs_f64()
        );
        elapsed
    }
}
