mod common;

use std::sync::Arc;
use std::time::Duration;

use admin_portal_rust::auth::MemoryTokenStore;
use admin_portal_rust::config::AppConfig;
use admin_portal_rust::filter::FilterSet;
use admin_portal_rust::grid::{
    Company, DataGrid, DialogMode, EntityId, EntityService, FetchOutcome, MutationDialog, NotificationLevel,
    User,
};
use admin_portal_rust::{ClientError, ErrorCode};
use anyhow::Result;
use serde_json::Map;

fn company(name: &str) -> Company {
    Company {
        id: None,
        name: name.to_string(),
        domain: "example.com".to_string(),
        status: "active".to_string(),
        email: String::new(),
        is_default: false,
        extra: Map::new(),
    }
}

#[tokio::test]
async fn rejected_save_keeps_dialog_open() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::with_access_token(common::GOOD_TOKEN));
    let service = EntityService::<Company>::new(common::client(&backend.base_url, store));
    let mut dialog = MutationDialog::new(service);

    dialog.open_create();
    let err = dialog.submit(company("")).await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::ValidationError.code());
    assert!(matches!(
        err,
        ClientError::Api {
            status: 422,
            code: ErrorCode::ValidationError,
            ..
        }
    ));
    assert!(dialog.is_open());
    assert!(!dialog.is_submitting());
    assert_eq!(dialog.notifications().len(), 1);
    assert_eq!(dialog.notifications()[0].level, NotificationLevel::Error);
    assert_eq!(dialog.notifications()[0].message, "Company name is required");
    Ok(())
}

#[tokio::test]
async fn accepted_save_closes_dialog_with_backend_record() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::with_access_token(common::GOOD_TOKEN));
    let service = EntityService::<Company>::new(common::client(&backend.base_url, store));
    let mut dialog = MutationDialog::new(service);

    dialog.open_create();
    let saved = dialog.submit(company("Acme")).await?;

    assert_eq!(saved.id, Some(EntityId::Text("c-99".to_string())));
    assert_eq!(*dialog.mode(), DialogMode::Closed);
    let notes = dialog.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Company created successfully");
    assert!(dialog.notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_refreshes_attached_grid() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = Arc::new(MemoryTokenStore::with_access_token(common::GOOD_TOKEN));
    let service = EntityService::<User>::new(common::client(&backend.base_url, store));

    let mut settings = AppConfig::default().grid;
    settings.default_page_size = 10;
    let grid = DataGrid::new(Arc::new(service.clone()), FilterSet::new(), &settings);
    grid.refresh().await;
    let rows = grid.rows();
    let target = rows[0].clone();

    let mut dialog = MutationDialog::new(service).with_grid(grid.clone());
    dialog.open_edit(target.clone());
    let target_id = target.id.clone().unwrap_or(EntityId::Number(1));
    dialog.delete(&target_id).await?;

    assert!(!dialog.is_open());
    assert_eq!(dialog.notifications()[0].message, "User deleted successfully");

    let deleted = backend.recorded.deleted.lock().map(|d| d.clone()).unwrap_or_default();
    assert_eq!(deleted, vec![target_id.to_string()]);

    // Initial load plus the refresh after the delete
    let bodies = backend.recorded.paginate_bodies.lock().map(|b| b.len()).unwrap_or_default();
    assert_eq!(bodies, 2);
    assert!(grid.snapshot().applied_seq >= 2);
    Ok(())
}

#[tokio::test]
async fn delete_reloads_grid_past_pending_identical_fetch() -> Result<()> {
    let backend = common::spawn_backend_with(Some(Duration::from_millis(300))).await?;
    let store = Arc::new(MemoryTokenStore::with_access_token(common::GOOD_TOKEN));
    let service = EntityService::<User>::new(common::client(&backend.base_url, store));

    let mut settings = AppConfig::default().grid;
    settings.default_page_size = 10;
    let grid = DataGrid::new(Arc::new(service.clone()), FilterSet::new(), &settings);

    // Issued before the delete and still pending when it lands
    let pending = tokio::spawn({
        let grid = grid.clone();
        async move { grid.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut dialog = MutationDialog::new(service).with_grid(grid.clone());
    dialog.delete(&EntityId::Number(3)).await?;

    assert_eq!(pending.await?, FetchOutcome::Stale);
    let bodies = backend.recorded.paginate_bodies.lock().map(|b| b.len()).unwrap_or_default();
    assert_eq!(bodies, 2);
    assert!(!grid.is_loading());
    assert_eq!(grid.snapshot().applied_seq, 2);
    Ok(())
}
