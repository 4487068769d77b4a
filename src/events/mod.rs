//! Domain events fired by back office actions.
//!
//! Events are dispatched to listeners registered once at startup. Without
//! registered listeners they are dropped.
//!
//! ```rust,ignore
//! use backoffice::register_event_listeners;
//! use backoffice::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Custom listeners implement [`Listener`]:
//!
//! ```rust,ignore
//! use backoffice::events::{AdminEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct AuditTrail;
//!
//! #[async_trait]
//! impl Listener for AuditTrail {
//!     async fn handle(&self, event: &AdminEvent) {
//!         if let AdminEvent::RoleUpdated { role_id, .. } = event {
//!             // persist the change
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AdminEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
