//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shelf_core::ports::{CourseStore, UserStore};
use shelf_core::{Course, CourseCreate, ShelfError, User, UserCreate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = std::path::Path::new(database_path).parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;

        // Every connection to :memory: is its own database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: &UserCreate) -> shelf_core::Result<User> {
        let email = user.email.trim();
        if !email.contains('@') {
            return Err(ShelfError::Validation(format!("Invalid email: {}", email)));
        }
        if self.get_user_by_email(email).await?.is_some() {
            return Err(ShelfError::EmailTaken(email.to_string()));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, is_active, created_at, updated_at)
            VALUES (?1, 1, ?2, ?2)
            "#,
        )
        .bind(email)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ShelfError::EmailTaken(email.to_string())
            }
            e => ShelfError::database(e),
        })?;

        let id = result.last_insert_rowid();
        self.get_user(id)
            .await?
            .ok_or_else(|| ShelfError::not_found("User", id))
    }

    async fn get_user(&self, id: i64) -> shelf_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, is_active, created_at, updated_at FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        Ok(row.map(Into::into))
    }

    async fn get_user_by_email(&self, email: &str) -> shelf_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, is_active, created_at, updated_at FROM users WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        Ok(row.map(Into::into))
    }

    async fn list_users(&self, skip: i64, limit: i64) -> shelf_core::Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, is_active, created_at, updated_at FROM users
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit.max(0))
        .bind(skip.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CourseStore for Database {
    async fn create_course(&self, course: &CourseCreate) -> shelf_core::Result<Course> {
        let title = course.title.trim();
        if title.is_empty() {
            return Err(ShelfError::Validation("Course title is required".to_string()));
        }
        if self.get_user(course.user_id).await?.is_none() {
            return Err(ShelfError::not_found("User", course.user_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO courses (title, description, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(title)
        .bind(&course.description)
        .bind(course.user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        let id = result.last_insert_rowid();
        self.get_course(id)
            .await?
            .ok_or_else(|| ShelfError::not_found("Course", id))
    }

    async fn get_course(&self, id: i64) -> shelf_core::Result<Option<Course>> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, user_id, created_at FROM courses WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        Ok(row.map(Into::into))
    }

    async fn list_courses_by_user(&self, user_id: i64) -> shelf_core::Result<Vec<Course>> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, user_id, created_at FROM courses
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ShelfError::database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    description: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course {
            id: r.id,
            title: r.title,
            description: r.description,
            user_id: r.user_id,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn signup(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = Database::in_memory().await.unwrap();

        let user = assert_ok!(db.create_user(&signup("ada@example.com")).await);
        assert_eq!(user.id, 1);
        assert!(user.is_active);

        let by_id = assert_ok!(db.get_user(user.id).await);
        assert_eq!(by_id, Some(user.clone()));
        let by_email = assert_ok!(db.get_user_by_email("ada@example.com").await);
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
        assert_eq!(assert_ok!(db.get_user(99).await), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::in_memory().await.unwrap();
        assert_ok!(db.create_user(&signup("ada@example.com")).await);

        let err = db.create_user(&signup("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, ShelfError::EmailTaken(_)));

        let err = db.create_user(&signup("not-an-email")).await.unwrap_err();
        assert!(matches!(err, ShelfError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_users_skip_limit() {
        let db = Database::in_memory().await.unwrap();
        for i in 0..5 {
            assert_ok!(db.create_user(&signup(&format!("user{}@example.com", i))).await);
        }

        let page = assert_ok!(db.list_users(1, 2).await);
        let ids: Vec<i64> = page.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert_eq!(assert_ok!(db.list_users(0, 100).await).len(), 5);
        assert!(assert_ok!(db.list_users(10, 100).await).is_empty());
    }

    #[tokio::test]
    async fn test_courses_by_user() {
        let db = Database::in_memory().await.unwrap();
        let ada = assert_ok!(db.create_user(&signup("ada@example.com")).await);
        let bob = assert_ok!(db.create_user(&signup("bob@example.com")).await);

        let course = assert_ok!(
            db.create_course(&CourseCreate {
                title: "Analytical Engines".to_string(),
                description: None,
                user_id: ada.id,
            })
            .await
        );
        assert_eq!(course.user_id, ada.id);
        assert_eq!(assert_ok!(db.get_course(course.id).await), Some(course.clone()));

        assert_eq!(assert_ok!(db.list_courses_by_user(ada.id).await), vec![course]);
        assert!(assert_ok!(db.list_courses_by_user(bob.id).await).is_empty());

        let err = db
            .create_course(&CourseCreate {
                title: "Orphan".to_string(),
                description: None,
                user_id: 42,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::NotFound { kind: "User", id: 42 }));
    }
}
