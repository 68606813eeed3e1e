pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod grid;
pub mod guard;
pub mod menu;

pub use error::{ClientError, ErrorCode};
