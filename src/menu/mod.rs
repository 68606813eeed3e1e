pub mod context;
pub mod defaults;
pub mod icons;
pub mod normalize;
pub mod paths;
pub mod types;

pub use context::{MenuContext, MenuFetcher};
pub use defaults::default_menu;
pub use icons::MenuIcon;
pub use normalize::{normalize_menu, try_normalize_menu};
pub use paths::{extract_menu_paths, is_route_accessible, route_permissions, RouteAccess, RoutePermission};
pub use types::{MenuLoadPhase, MenuLoadState, MenuNode};
