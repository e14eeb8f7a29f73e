use std::sync::Arc;

use crate::config::Config;
use crate::db::{SentimentStore, SupabaseClient};
use crate::events::EventBus;
use crate::webhook::{ReviewForwarder, WorkflowClient};

/// Shared by every worker; built once at start-up and handed to handlers and
/// server functions through `web::Data`.
pub struct AppState {
    /// `None` when no workflow URL is configured.
    pub forwarder: Option<Arc<dyn ReviewForwarder>>,
    pub store: Arc<dyn SentimentStore>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(
        forwarder: Option<Arc<dyn ReviewForwarder>>,
        store: Arc<dyn SentimentStore>,
        events: EventBus,
    ) -> Self {
        Self {
            forwarder,
            store,
            events,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let forwarder = config
            .workflow_webhook_url
            .as_deref()
            .map(|url| Arc::new(WorkflowClient::new(url)) as Arc<dyn ReviewForwarder>);
        let store = Arc::new(SupabaseClient::new(
            &config.supabase_url,
            config.supabase_anon_key.clone(),
        ));

        Self::new(forwarder, store, EventBus::new(config.event_bus_capacity))
    }
}
