use std::sync::Arc;
use tokio::sync::watch;

use super::store::{StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::events::{EventBus, PortalEvent};

/// What the route guard needs to know about authentication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub access_token: Option<String>,
    pub is_loading: bool,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Login/logout hooks around the token store.
///
/// A completed login stores the tokens and then asks the menu loader to
/// fetch the menu for the new token.
#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    events: EventBus,
    state: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn TokenStore>, events: EventBus) -> Self {
        let initial = AuthSnapshot {
            access_token: store.access_token(),
            is_loading: false,
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            store,
            events,
            state: Arc::new(tx),
        }
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    pub fn begin_login(&self) {
        self.state.send_modify(|state| state.is_loading = true);
    }

    pub fn fail_login(&self) {
        self.state.send_modify(|state| state.is_loading = false);
    }

    pub fn login_with_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), StoreError> {
        let stored = self.store_tokens(access_token, refresh_token);
        if let Err(e) = stored {
            self.fail_login();
            return Err(e);
        }

        self.state.send_modify(|state| {
            state.access_token = Some(access_token.to_string());
            state.is_loading = false;
        });
        tracing::info!("Login complete, requesting menu load");
        self.events.request_menu_load(access_token);
        Ok(())
    }

    fn store_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, access_token)?;
        match refresh_token {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh),
            None => Ok(()),
        }
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        self.state.send_modify(|state| {
            state.access_token = None;
            state.is_loading = false;
        });
        self.events.publish(PortalEvent::LoggedOut);
        Ok(())
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }
}
