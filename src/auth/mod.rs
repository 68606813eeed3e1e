pub mod session;
pub mod store;

pub use session::{AuthSession, AuthSnapshot};
pub use store::{
    FileTokenStore, MemoryTokenStore, StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};
