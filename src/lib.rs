// ABOUTME: Library root for vitrin - storefront image and catalog client logic.
// ABOUTME: The CLI binary is in main.rs.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod notify;
pub mod resolve;
pub mod types;
