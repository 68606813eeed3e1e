pub mod dialog;
pub mod entities;
#[allow(clippy::module_inception)]
pub mod grid;
pub mod request;
pub mod service;
pub mod tracker;

pub use dialog::{DialogMode, MutationDialog, Notification, NotificationLevel};
pub use entities::{Company, Entity, EntityId, EntityKind, MenuRecord, Role, User};
pub use grid::{DataGrid, FetchOutcome, GridState, PageFetcher};
pub use request::{PaginatedRequest, PaginatedResponse, PaginationState};
pub use service::EntityService;
pub use tracker::{RequestTicket, RequestTracker};
