use std::sync::Arc;

use crate::{
    config::Config,
    errors::Result,
    services::{
        chat::ChatRelay, entitlements::EntitlementLedger, metrics::MetricsService,
        styles::StyleDirectory,
    },
    store::Stores,
};

pub mod admin;
pub mod chat;
pub mod docs;
pub mod download;
pub mod health;
pub mod metrics;
pub mod styles;
pub mod user;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub ledger: EntitlementLedger,
    pub styles: StyleDirectory,
    pub chat: ChatRelay,
    pub http: reqwest::Client,
    pub metrics: Arc<MetricsService>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Result<Self> {
        let metrics = Arc::new(MetricsService::new()?);

        Ok(Self {
            ledger: EntitlementLedger::new(stores.accounts.clone()),
            styles: StyleDirectory::new(stores.styles.clone(), metrics.clone()),
            chat: ChatRelay::new(stores.chat.clone()),
            http: reqwest::Client::new(),
            config,
            stores,
            metrics,
        })
    }
}
