//! Per-navigation route gate backed by the menu's allowed paths.

use tracing::{debug, info, warn};

use crate::auth::{AuthSession, AuthSnapshot};
use crate::config::MenuConfig;
use crate::menu::{extract_menu_paths, is_route_accessible, MenuContext, MenuLoadState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth or menu still loading
    Loading,
    Render,
    Redirect { to: String },
}

#[derive(Debug, Clone)]
pub struct GuardOptions {
    pub not_found_path: String,
    /// How many allowed paths to include in decision logs
    pub log_sample_size: usize,
}

impl GuardOptions {
    pub fn from_config(menu: &MenuConfig) -> Self {
        Self {
            not_found_path: menu.not_found_path.clone(),
            log_sample_size: menu.log_sample_size,
        }
    }
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self::from_config(&crate::config::config().menu)
    }
}

/// Decide what to do with a navigation to `path`.
///
/// Unauthenticated users are let through; redirecting them to login is
/// handled elsewhere. An authenticated session with an empty menu fails open.
pub fn evaluate(path: &str, auth: &AuthSnapshot, menu: &MenuLoadState, options: &GuardOptions) -> GuardDecision {
    if auth.is_loading || menu.is_loading {
        return GuardDecision::Loading;
    }

    if !auth.is_authenticated() {
        return GuardDecision::Render;
    }

    if menu.tree.is_empty() {
        warn!("Menu is empty for an authenticated user, allowing {}", path);
        return GuardDecision::Render;
    }

    let allowed = extract_menu_paths(&menu.tree);
    let sample: Vec<&str> = allowed
        .iter()
        .take(options.log_sample_size)
        .map(String::as_str)
        .collect();

    if is_route_accessible(path, &allowed) {
        info!("Route {} allowed ({} paths, first: {:?})", path, allowed.len(), sample);
        GuardDecision::Render
    } else {
        info!(
            "Route {} not in menu, redirecting to {} ({} paths, first: {:?})",
            path,
            options.not_found_path,
            allowed.len(),
            sample
        );
        GuardDecision::Redirect {
            to: options.not_found_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GuardKey {
    path: String,
    menu_revision: u64,
    auth_loading: bool,
    menu_loading: bool,
    authenticated: bool,
}

impl GuardKey {
    fn new(path: &str, auth: &AuthSnapshot, menu: &MenuLoadState) -> Self {
        Self {
            path: path.to_string(),
            menu_revision: menu.revision,
            auth_loading: auth.is_loading,
            menu_loading: menu.is_loading,
            authenticated: auth.is_authenticated(),
        }
    }
}

/// Caches the last decision; re-evaluates only when one of its inputs changed
#[derive(Debug)]
pub struct RouteGuard {
    options: GuardOptions,
    last: Option<(GuardKey, GuardDecision)>,
    evaluations: u64,
}

impl RouteGuard {
    pub fn new(options: GuardOptions) -> Self {
        Self {
            options,
            last: None,
            evaluations: 0,
        }
    }

    pub fn check(&mut self, path: &str, auth: &AuthSnapshot, menu: &MenuLoadState) -> GuardDecision {
        let key = GuardKey::new(path, auth, menu);
        if let Some((last_key, decision)) = &self.last {
            if *last_key == key {
                debug!("Reusing guard decision for {}", path);
                return decision.clone();
            }
        }

        let decision = evaluate(path, auth, menu, &self.options);
        self.evaluations += 1;
        self.last = Some((key, decision.clone()));
        decision
    }

    pub fn check_session(&mut self, path: &str, auth: &AuthSession, menu: &MenuContext) -> GuardDecision {
        self.check(path, &auth.snapshot(), &menu.snapshot())
    }

    /// Number of real evaluations performed so far
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{default_menu, MenuLoadPhase, MenuNode};

    fn options() -> GuardOptions {
        GuardOptions {
            not_found_path: "/error/404".to_string(),
            log_sample_size: 10,
        }
    }

    fn authed() -> AuthSnapshot {
        AuthSnapshot {
            access_token: Some("tok".to_string()),
            is_loading: false,
        }
    }

    fn ready(tree: Vec<MenuNode>) -> MenuLoadState {
        let mut state = MenuLoadState::uninitialized(Vec::new());
        state.replace_tree(tree);
        state.phase = MenuLoadPhase::Ready;
        state
    }

    #[test]
    fn loading_wins_over_everything() {
        let mut menu = ready(default_menu());
        menu.is_loading = true;
        assert_eq!(evaluate("/anything", &authed(), &menu, &options()), GuardDecision::Loading);

        let auth = AuthSnapshot {
            is_loading: true,
            ..authed()
        };
        assert_eq!(evaluate("/x", &auth, &ready(default_menu()), &options()), GuardDecision::Loading);
    }

    #[test]
    fn unauthenticated_renders() {
        let decision = evaluate("/secret", &AuthSnapshot::default(), &ready(default_menu()), &options());
        assert_eq!(decision, GuardDecision::Render);
    }

    #[test]
    fn empty_menu_fails_open() {
        assert_eq!(evaluate("/secret", &authed(), &ready(Vec::new()), &options()), GuardDecision::Render);
    }

    #[test]
    fn redirects_unknown_routes() {
        let menu = ready(vec![MenuNode::link("Dashboard", "/dashboard")]);
        assert_eq!(evaluate("/dashboard/stats", &authed(), &menu, &options()), GuardDecision::Render);
        assert_eq!(
            evaluate("/dashboards", &authed(), &menu, &options()),
            GuardDecision::Redirect {
                to: "/error/404".to_string()
            }
        );
    }

    #[test]
    fn decisions_are_cached_until_inputs_change() {
        let mut guard = RouteGuard::new(options());
        let menu = ready(vec![MenuNode::link("Dashboard", "/dashboard")]);

        guard.check("/dashboard", &authed(), &menu);
        guard.check("/dashboard", &authed(), &menu);
        assert_eq!(guard.evaluations(), 1);

        guard.check("/other", &authed(), &menu);
        assert_eq!(guard.evaluations(), 2);

        let mut replaced = menu.clone();
        replaced.replace_tree(vec![MenuNode::link("Other", "/other")]);
        assert_eq!(guard.check("/other", &authed(), &replaced), GuardDecision::Render);
        assert_eq!(guard.evaluations(), 3);
    }
}
