//! Shelf Core Library
//!
//! Domain logic for Shelf: the in-memory resource collection, the error
//! taxonomy, and the storage ports implemented by the server.

// Re-export pure types from shelf-types
pub use shelf_types::*;

pub mod collection;
pub mod error;
pub mod ports;
mod records;

pub use collection::{Record, RecordId, ResourceCollection};
pub use error::{Result, ShelfError};
