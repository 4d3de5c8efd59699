//! Course types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Course creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    pub description: Option<String>,
    pub user_id: i64,
}
