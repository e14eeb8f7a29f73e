//! Browser side of the change notifications: one `EventSource` on the
//! server's event stream, one subscription per channel.
use futures::future::{AbortHandle, Abortable};
use futures::stream::{select_all, StreamExt};
use gloo_net::eventsource::futures::EventSource;
use leptos::logging::{log, warn};
use leptos::on_cleanup;
use wasm_bindgen_futures::spawn_local;

use crate::models::change::{
    CONNECTED_CHANNEL, REFRESH_CHANNEL, REVIEWS_CHANNEL, SENTIMENT_CHANNEL,
};

pub const EVENTS_PATH: &str = "/api/events";

/// Calls `on_change` with the channel name for every notification until the
/// owning component is cleaned up. The browser reconnects dropped streams.
pub fn subscribe_to_changes<F>(on_change: F)
where
    F: Fn(&str) + 'static,
{
    let mut source = match EventSource::new(EVENTS_PATH) {
        Ok(source) => source,
        Err(err) => {
            warn!("[LIVE] Could not open {}: {:?}", EVENTS_PATH, err);
            return;
        }
    };

    let mut channels = Vec::new();
    for channel in [REVIEWS_CHANNEL, SENTIMENT_CHANNEL, REFRESH_CHANNEL, CONNECTED_CHANNEL] {
        match source.subscribe(channel) {
            Ok(subscription) => channels.push(subscription),
            Err(err) => warn!("[LIVE] Could not subscribe to {}: {:?}", channel, err),
        }
    }

    let (abort_handle, registration) = AbortHandle::new_pair();
    let listen = async move {
        let mut notifications = select_all(channels);
        let mut connected = false;
        while let Some(notification) = notifications.next().await {
            match notification {
                // The first connection coincides with the mount fetch; a later
                // one means the stream dropped and changes may have been missed.
                Ok((channel, _message)) if channel == CONNECTED_CHANNEL => {
                    if connected {
                        log!("[LIVE] Event stream reconnected");
                        on_change(&channel);
                    }
                    connected = true;
                }
                // Each notification schedules a fresh fetch.
                Ok((channel, _message)) => on_change(&channel),
                Err(err) => warn!("[LIVE] Event stream error: {:?}", err),
            }
        }
    };
    spawn_local(async move {
        let _ = Abortable::new(listen, registration).await;
    });

    on_cleanup(move || {
        abort_handle.abort();
        source.close();
        log!("[LIVE] Change subscriptions released");
    });
}
