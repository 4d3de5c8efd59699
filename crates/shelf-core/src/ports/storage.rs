//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use shelf_types::{Course, CourseCreate, User, UserCreate};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &UserCreate) -> Result<User>;
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Users ordered by id, skipping `skip` and returning at most `limit`
    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>>;
}

/// Course store
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn create_course(&self, course: &CourseCreate) -> Result<Course>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_by_user(&self, user_id: i64) -> Result<Vec<Course>>;
}
