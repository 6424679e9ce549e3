//! Prometheus metrics for the HTTP surface.
//!
//! Metrics live in a registry owned by this struct rather than the process
//! global one, so every `AppState` (and every test) gets its own.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use showcase::domain::Source;

/// HTTP request latency buckets (seconds)
const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,

    /// HTTP request counter - labels: method, endpoint, status
    http_requests_total: IntCounterVec,

    /// HTTP request duration histogram - labels: method, endpoint
    http_request_duration_seconds: HistogramVec,

    /// Data responses by origin - labels: source
    cache_lookups_total: IntCounterVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .buckets(HTTP_LATENCY_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;
        let cache_lookups_total = IntCounterVec::new(
            Opts::new("cache_lookups_total", "Data responses by origin"),
            &["source"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(cache_lookups_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            cache_lookups_total,
        })
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, endpoint: &str, status: u16, duration_secs: f64) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, endpoint, status.as_str()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration_secs);
    }

    pub fn record_data_source(&self, source: Source) {
        self.cache_lookups_total
            .with_label_values(&[source.as_str()])
            .inc();
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetrics")
            .field("registry", &"<prometheus::Registry>")
            .finish()
    }
}
