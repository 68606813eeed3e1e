use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::entities::{Entity, EntityId};
use super::grid::DataGrid;
use super::service::EntityService;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn from_error(error: &ClientError) -> Self {
        let message = match error {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self::new(NotificationLevel::Error, message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogMode<E> {
    Closed,
    Create,
    Edit(E),
}

/// Create/edit/delete flow for one entity.
///
/// A failed save keeps the dialog open with an error notification and is
/// never retried. A successful one closes it and refreshes the attached grid.
pub struct MutationDialog<E: Entity> {
    service: EntityService<E>,
    grid: Option<DataGrid<E>>,
    mode: DialogMode<E>,
    submitting: bool,
    notifications: Vec<Notification>,
}

impl<E: Entity> MutationDialog<E> {
    pub fn new(service: EntityService<E>) -> Self {
        Self {
            service,
            grid: None,
            mode: DialogMode::Closed,
            submitting: false,
            notifications: Vec::new(),
        }
    }

    pub fn with_grid(mut self, grid: DataGrid<E>) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn open_create(&mut self) {
        self.mode = DialogMode::Create;
    }

    pub fn open_edit(&mut self, entity: E) {
        self.mode = DialogMode::Edit(entity);
    }

    pub fn close(&mut self) {
        self.mode = DialogMode::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, DialogMode::Closed)
    }

    pub fn mode(&self) -> &DialogMode<E> {
        &self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub async fn submit(&mut self, draft: E) -> Result<E, ClientError> {
        self.submitting = true;
        let result = self.service.save(&draft).await;
        self.submitting = false;

        match result {
            Ok(saved) => {
                let verb = if draft.id().is_some() { "updated" } else { "created" };
                self.notify_success(format!("{} {} successfully", capitalize(E::KIND.singular()), verb))
                    .await;
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!("Saving {} failed: {}", E::KIND.singular(), e);
                self.notifications.push(Notification::from_error(&e));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &EntityId) -> Result<(), ClientError> {
        self.submitting = true;
        let result = self.service.delete(id).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.notify_success(format!("{} deleted successfully", capitalize(E::KIND.singular())))
                    .await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Deleting {} {} failed: {}", E::KIND.singular(), id, e);
                self.notifications.push(Notification::from_error(&e));
                Err(e)
            }
        }
    }

    async fn notify_success(&mut self, message: String) {
        self.notifications.push(Notification::new(NotificationLevel::Success, message));
        self.close();
        if let Some(grid) = &self.grid {
            let outcome = grid.reload().await;
            tracing::debug!("Grid reload after {} change: {:?}", E::KIND.singular(), outcome);
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn api_errors_surface_backend_message() {
        let err = ClientError::api(409, ErrorCode::Conflict, "Email already taken");
        let note = Notification::from_error(&err);
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Email already taken");
    }

    #[test]
    fn capitalizes_entity_names() {
        assert_eq!(capitalize("company"), "Company");
        assert_eq!(capitalize(""), "");
    }
}
