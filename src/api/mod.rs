pub mod client;
pub mod envelope;
pub mod url;

pub use client::ApiClient;
pub use envelope::unwrap_envelope;
pub use url::{build_api_url, join_url_parts, normalize_path};
