//! Shelf Types - Pure record and request shapes
//!
//! This crate contains only plain data types with no runtime dependencies,
//! shared by the core collection logic and the HTTP server.

pub mod course;
pub mod item;
pub mod user;

pub use course::*;
pub use item::*;
pub use user::*;
