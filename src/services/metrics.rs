use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::errors::Result;

pub struct MetricsService {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    credit_adjustments: IntCounter,
    plan_assignments: IntCounter,
    accounts_bootstrapped: IntCounter,
    chat_messages: IntCounter,
    proxied_downloads: IntCounter,
    style_fallbacks: IntCounter,
}

impl MetricsService {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests handled"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_requests.clone()))?;

        let http_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency"),
            &["method", "path"],
        )?;
        registry.register(Box::new(http_duration.clone()))?;

        let credit_adjustments = IntCounter::new(
            "credit_adjustments_total",
            "Admin image-credit adjustments applied",
        )?;
        registry.register(Box::new(credit_adjustments.clone()))?;

        let plan_assignments =
            IntCounter::new("plan_assignments_total", "Admin plan assignments applied")?;
        registry.register(Box::new(plan_assignments.clone()))?;

        let accounts_bootstrapped = IntCounter::new(
            "user_bootstrap_calls_total",
            "Bootstrap calls handled (creation happens at most once per uid)",
        )?;
        registry.register(Box::new(accounts_bootstrapped.clone()))?;

        let chat_messages =
            IntCounter::new("chat_messages_total", "Chat messages relayed to the store")?;
        registry.register(Box::new(chat_messages.clone()))?;

        let proxied_downloads = IntCounter::new(
            "proxied_downloads_total",
            "Files streamed through the download proxy",
        )?;
        registry.register(Box::new(proxied_downloads.clone()))?;

        let style_fallbacks = IntCounter::new(
            "style_fallbacks_total",
            "Style catalog requests served from the built-in fallback",
        )?;
        registry.register(Box::new(style_fallbacks.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            credit_adjustments,
            plan_assignments,
            accounts_bootstrapped,
            chat_messages,
            proxied_downloads,
            style_fallbacks,
        })
    }

    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        self.http_requests
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        self.http_duration
            .with_label_values(&[method, path])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_credit_adjustment(&self) {
        self.credit_adjustments.inc();
    }

    pub fn record_plan_assignment(&self) {
        self.plan_assignments.inc();
    }

    pub fn record_account_bootstrapped(&self) {
        self.accounts_bootstrapped.inc();
    }

    pub fn record_chat_message(&self) {
        self.chat_messages.inc();
    }

    pub fn record_proxied_download(&self) {
        self.proxied_downloads.inc();
    }

    pub fn record_style_fallback(&self) {
        self.style_fallbacks.inc();
    }

    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| crate::errors::AppError::Internal(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_registered_counters() {
        let metrics = MetricsService::new().unwrap();
        metrics.record_credit_adjustment();
        metrics.record_style_fallback();
        metrics.record_request("GET", "/api/v1/storyboard/styles", 200, Duration::from_millis(3));

        let text = metrics.render().unwrap();
        assert!(text.contains("credit_adjustments_total 1"));
        assert!(text.contains("style_fallbacks_total 1"));
        assert!(text.contains("http_requests_total"));
    }
}
