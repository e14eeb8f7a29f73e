use std::sync::Arc;
use std::time::Duration;

use actix_web::web::Bytes;
use futures::StreamExt;
use log::{debug, info};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::db::{self, SentimentStore};
use crate::models::change::{CONNECTED_CHANNEL, REFRESH_CHANNEL};
use crate::models::{Table, TableChange};

/// Named notification fanned out to every connected dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl DashboardEvent {
    pub fn table_changed(change: &TableChange) -> Self {
        Self {
            name: change.table.name(),
            payload: serde_json::to_value(change).ok(),
        }
    }

    pub fn refresh_requested() -> Self {
        Self {
            name: REFRESH_CHANNEL,
            payload: None,
        }
    }

    pub fn connected() -> Self {
        Self {
            name: CONNECTED_CHANNEL,
            payload: None,
        }
    }

    /// Server-Sent Events wire frame.
    pub fn to_sse_frame(&self) -> Bytes {
        let data = self
            .payload
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| "null".to_string());
        Bytes::from(format!("event: {}\ndata: {}\n\n", self.name, data))
    }
}

/// Broadcast bus; publishing never waits on slow listeners.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn has_listeners(&self) -> bool {
        self.sender.receiver_count() > 0
    }

    /// Returns how many listeners received the event.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

/// Pipes each table's change stream onto the bus, one task per table.
pub fn spawn_change_relay(
    store: Arc<dyn SentimentStore>,
    bus: EventBus,
    interval: Duration,
) -> Vec<JoinHandle<()>> {
    Table::ALL
        .into_iter()
        .map(|table| {
            let watcher = bus.clone();
            // No connected dashboard, no polling.
            let mut changes =
                db::subscribe_while(store.clone(), table, interval, move || watcher.has_listeners());
            let bus = bus.clone();
            tokio::spawn(async move {
                info!("[EVENTS] Watching {} every {:?}", table.name(), interval);
                while let Some(change) = changes.next().await {
                    let listeners = bus.publish(DashboardEvent::table_changed(&change));
                    debug!(
                        "[EVENTS] {:?} {} #{} sent to {} listeners",
                        change.kind,
                        table.name(),
                        change.id,
                        listeners
                    );
                }
            })
        })
        .collect()
}
