use async_trait::async_trait;

use super::AdminEvent;

/// Receives every dispatched event; match on the variant to filter.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AdminEvent);
}
