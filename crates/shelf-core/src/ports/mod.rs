//! Ports (traits) for external collaborators

pub mod storage;

pub use storage::{CourseStore, UserStore};
