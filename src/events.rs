use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLoadRequest {
    pub access_token: String,
}

/// Application-wide signals between the auth session and the menu loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum PortalEvent {
    MenuLoadRequested(MenuLoadRequest),
    LoggedOut,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PortalEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: PortalEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!("Failed to publish event (maybe no subscribers): {}", e);
        }
    }

    pub fn request_menu_load(&self, access_token: impl Into<String>) {
        self.publish(PortalEvent::MenuLoadRequested(MenuLoadRequest {
            access_token: access_token.into(),
        }));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::config::config().events.bus_capacity)
    }
}
