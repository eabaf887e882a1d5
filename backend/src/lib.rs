//! Todo Lists Backend Library
//!
//! A REST API for todo lists and their items, stored in MongoDB.
//! The server binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod dal;
pub mod error;
/// Application state shared by request handlers
pub mod state;
