use async_trait::async_trait;

use crate::events::{AdminEvent, Listener};

/// Emits events as `tracing` events. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AdminEvent) {
        tracing::info!(
            target: "backoffice::events",
            event_name = event.name(),
            ?event,
            "admin event"
        );
    }
}
