use std::sync::Arc;

use crate::models::style::{fallback_styles, PresetStyle};
use crate::services::metrics::MetricsService;
use crate::store::StyleStore;

/// Serves the active preset catalog. When the backing collection is empty or
/// unreachable the entire built-in list is substituted, so callers never see
/// an empty catalog; the substitution is logged and counted for operators.
#[derive(Clone)]
pub struct StyleDirectory {
    store: Arc<dyn StyleStore>,
    metrics: Arc<MetricsService>,
}

impl StyleDirectory {
    pub fn new(store: Arc<dyn StyleStore>, metrics: Arc<MetricsService>) -> Self {
        Self { store, metrics }
    }

    pub async fn list(&self) -> Vec<PresetStyle> {
        match self.store.list_active().await {
            Ok(styles) if !styles.is_empty() => styles,
            Ok(_) => {
                tracing::warn!("style collection is empty, serving built-in catalog");
                self.metrics.record_style_fallback();
                fallback_styles()
            }
            Err(e) => {
                tracing::warn!("style collection unavailable ({}), serving built-in catalog", e);
                self.metrics.record_style_fallback();
                fallback_styles()
            }
        }
    }
}
