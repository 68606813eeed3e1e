use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::defaults::default_menu;
use super::normalize::try_normalize_menu;
use super::paths::{extract_menu_paths, is_route_accessible, RouteAccess};
use super::types::{MenuLoadPhase, MenuLoadState, MenuNode};
use crate::auth::TokenStore;
use crate::error::ClientError;
use crate::events::{EventBus, PortalEvent};

/// Source of the raw menu payload for an access token
#[async_trait]
pub trait MenuFetcher: Send + Sync {
    async fn fetch_menu(&self, access_token: &str) -> Result<Value, ClientError>;
}

/// Shared handle over the session's menu state and its load lifecycle.
///
/// Clones share state. Every load takes a new generation number; a load
/// whose generation has been superseded (by a newer load or a reset) is
/// discarded on arrival.
#[derive(Clone)]
pub struct MenuContext {
    inner: Arc<MenuContextInner>,
}

struct MenuContextInner {
    state: watch::Sender<MenuLoadState>,
    fetcher: Arc<dyn MenuFetcher>,
    tokens: Arc<dyn TokenStore>,
    generation: AtomicU64,
    default_tree: Vec<MenuNode>,
}

impl MenuContext {
    pub fn new(fetcher: Arc<dyn MenuFetcher>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_default_tree(fetcher, tokens, default_menu())
    }

    pub fn with_default_tree(
        fetcher: Arc<dyn MenuFetcher>,
        tokens: Arc<dyn TokenStore>,
        default_tree: Vec<MenuNode>,
    ) -> Self {
        let (state, _rx) = watch::channel(MenuLoadState::uninitialized(default_tree.clone()));
        Self {
            inner: Arc::new(MenuContextInner {
                state,
                fetcher,
                tokens,
                generation: AtomicU64::new(0),
                default_tree,
            }),
        }
    }

    /// Start-up transition: load for a persisted token, otherwise settle on the default tree
    pub async fn bootstrap(&self) {
        match self.inner.tokens.access_token() {
            Some(token) => {
                info!("User is already authenticated, loading menu on startup");
                self.load_menu_with_token(&token).await;
            }
            None => {
                debug!("No access token on startup, using static menu");
                self.settle_on_default(None, MenuLoadPhase::Ready);
            }
        }
    }

    pub async fn load_menu_with_token(&self, access_token: &str) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
            state.phase = MenuLoadPhase::Loading;
        });
        info!("Loading menu (load #{})", generation);

        let result = self.inner.fetcher.fetch_menu(access_token).await;

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding menu load #{}, superseded by a newer request", generation);
            return;
        }

        match result {
            Ok(payload) => match try_normalize_menu(&payload) {
                Some(tree) if !tree.is_empty() => {
                    info!("Dynamic menu loaded successfully with {} items", tree.len());
                    self.inner.state.send_modify(|state| {
                        state.replace_tree(tree);
                        state.is_loading = false;
                        state.error = None;
                        state.phase = MenuLoadPhase::Ready;
                    });
                }
                _ => {
                    warn!("Menu payload is empty or invalid, using static menu");
                    self.settle_on_default(None, MenuLoadPhase::Ready);
                }
            },
            Err(e) => {
                error!("Menu loading error: {}", e);
                self.settle_on_default(Some(e.to_string()), MenuLoadPhase::Failed);
            }
        }
    }

    /// Re-run the fetch with the stored access token; no-op without one
    pub async fn load_menu(&self) {
        match self.inner.tokens.access_token() {
            Some(token) => self.load_menu_with_token(&token).await,
            None => debug!("No access token available, menu load skipped"),
        }
    }

    pub async fn reload_menu(&self) {
        self.load_menu().await
    }

    /// Force the default tree, superseding any in-flight load
    pub fn reset_to_static_menu(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.settle_on_default(None, MenuLoadPhase::Ready);
    }

    fn settle_on_default(&self, error: Option<String>, phase: MenuLoadPhase) {
        let tree = self.inner.default_tree.clone();
        self.inner.state.send_modify(|state| {
            state.replace_tree(tree);
            state.is_loading = false;
            state.error = error;
            state.phase = phase;
        });
    }

    /// Drive loads from bus events: one task per menu-load request, reset on logout
    pub fn listen(&self, events: &EventBus) -> JoinHandle<()> {
        let mut rx = events.subscribe();
        let context = self.clone();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(PortalEvent::MenuLoadRequested(request)) => {
                        if request.access_token.is_empty() {
                            warn!("No access token provided for menu loading");
                            continue;
                        }
                        let context = context.clone();
                        tokio::spawn(async move {
                            context.load_menu_with_token(&request.access_token).await;
                        });
                    }
                    Ok(PortalEvent::LoggedOut) => context.reset_to_static_menu(),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Menu listener lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    pub fn menu_items(&self) -> Vec<MenuNode> {
        self.inner.state.borrow().tree.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn snapshot(&self) -> MenuLoadState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MenuLoadState> {
        self.inner.state.subscribe()
    }

    /// Wait until no load is in flight and the state has left `Uninitialized`
    pub async fn settled(&self) -> MenuLoadState {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|state| {
                !state.is_loading
                    && matches!(state.phase, MenuLoadPhase::Ready | MenuLoadPhase::Failed)
            })
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    pub fn get_allowed_paths(&self) -> Vec<String> {
        extract_menu_paths(&self.inner.state.borrow().tree)
    }

    pub fn is_path_allowed(&self, path: &str) -> bool {
        is_route_accessible(path, &self.get_allowed_paths())
    }

    pub fn route_access(&self, path: &str) -> RouteAccess {
        RouteAccess::new(path, &self.inner.state.borrow().tree)
    }
}
