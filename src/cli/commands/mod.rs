pub mod auth;
pub mod grid;
pub mod menu;
