//! Storage layer
//!
//! Uses SQLite (embedded) for users and courses. Items live in memory, see
//! `services::ItemService`.

pub mod db;

pub use db::Database;
