mod common;

use std::sync::Arc;

use admin_portal_rust::auth::{AuthSession, FileTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY};
use admin_portal_rust::events::EventBus;
use admin_portal_rust::guard::{GuardDecision, GuardOptions, RouteGuard};
use admin_portal_rust::menu::{default_menu, MenuContext, MenuLoadPhase};
use anyhow::Result;

fn guard_options() -> GuardOptions {
    GuardOptions {
        not_found_path: "/error/404".to_string(),
        log_sample_size: 10,
    }
}

#[tokio::test]
async fn login_triggers_menu_load_and_guards_routes() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::new());
    let bus = EventBus::new(16);

    let client = common::client(&backend.base_url, store.clone());
    let menu = MenuContext::new(Arc::new(client), store.clone());
    let listener = menu.listen(&bus);
    let session = AuthSession::new(store.clone(), bus.clone());

    let mut guard = RouteGuard::new(guard_options());
    assert_eq!(
        guard.check_session("/dashboard", &session, &menu),
        GuardDecision::Render,
        "unauthenticated navigation is left to the login redirect"
    );

    session.login_with_tokens(common::GOOD_TOKEN, None)?;
    let state = menu.settled().await;

    assert_eq!(state.phase, MenuLoadPhase::Ready);
    assert_eq!(state.error, None);
    assert_eq!(menu.get_allowed_paths(), vec!["/dashboard"]);
    assert!(menu.is_path_allowed("/dashboard"));
    assert!(!menu.is_path_allowed("/billing"));
    assert_eq!(guard.check_session("/dashboard", &session, &menu), GuardDecision::Render);
    assert_eq!(
        guard.check_session("/admin", &session, &menu),
        GuardDecision::Redirect {
            to: "/error/404".to_string()
        }
    );

    listener.abort();
    Ok(())
}

#[tokio::test]
async fn failed_fetch_falls_back_to_static_menu() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::with_access_token(common::BROKEN_TOKEN));
    let menu = MenuContext::new(Arc::new(common::client(&backend.base_url, store.clone())), store);

    menu.bootstrap().await;
    let state = menu.snapshot();

    assert_eq!(state.phase, MenuLoadPhase::Failed);
    assert_eq!(state.tree, default_menu());
    assert!(!state.is_loading);
    let error = state.error.unwrap_or_default();
    assert!(error.contains("menu table unavailable"), "unexpected error: {}", error);

    // Navigation stays usable on the static tree
    assert!(menu.is_path_allowed("/dashboard"));
    assert!(menu.is_path_allowed("/account/home/user-profile"));
    Ok(())
}

#[tokio::test]
async fn persisted_token_loads_menu_on_bootstrap() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let dir = tempfile::tempdir()?;
    let store = Arc::new(FileTokenStore::new(dir.path().join("tokens.json")));
    store.set(ACCESS_TOKEN_KEY, common::GOOD_TOKEN)?;

    let menu = MenuContext::new(Arc::new(common::client(&backend.base_url, store.clone())), store);
    menu.bootstrap().await;

    assert_eq!(menu.menu_items().len(), 1);
    assert_eq!(menu.menu_items()[0].title, "Dashboard");
    Ok(())
}

#[tokio::test]
async fn logout_restores_static_menu() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::new());
    let bus = EventBus::new(16);
    let menu = MenuContext::new(Arc::new(common::client(&backend.base_url, store.clone())), store.clone());
    let listener = menu.listen(&bus);
    let session = AuthSession::new(store.clone(), bus);

    session.login_with_tokens(common::GOOD_TOKEN, Some("refresh"))?;
    menu.settled().await;
    assert_eq!(menu.get_allowed_paths(), vec!["/dashboard"]);

    session.logout()?;
    let mut rx = menu.subscribe();
    rx.wait_for(|state| state.tree == default_menu()).await?;
    assert!(store.access_token().is_none());

    listener.abort();
    Ok(())
}
