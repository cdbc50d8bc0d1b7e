//! Submission repository
//!
//! - insert: single INSERT ... RETURNING id
//! - list: every row, newest first
//! - delete: image lookup, file removal, row removal on one pooled connection

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::NewSubmission;
use crate::uploads::UploadDir;

/// Submission record from database
#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a delete; a missing id is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Submission repository
pub struct SubmissionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a submission and return its id.
    ///
    /// `created_at` is assigned by the database.
    pub async fn insert(&self, submission: &NewSubmission, image: &str) -> Result<i32, DbError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO submissions (name, email, message, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(submission.name())
        .bind(submission.email())
        .bind(submission.message())
        .bind(image)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// List all submissions, newest first. Empty table yields an empty vec.
    pub async fn list(&self) -> Result<Vec<Submission>, DbError> {
        let rows = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, name, email, message, image, created_at
            FROM submissions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete a submission and its image file.
    ///
    /// The file is removed first and best-effort: a failed removal is logged
    /// and the row is deleted anyway. Both statements run on the same
    /// connection, which goes back to the pool when this returns.
    ///
    /// Ids outside the `SERIAL` range cannot exist and report `NotFound`
    /// without touching the database.
    pub async fn delete(&self, id: i64, uploads: &UploadDir) -> Result<DeleteOutcome, DbError> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let mut conn = self.pool.acquire().await?;

        let image: Option<Option<String>> =
            sqlx::query_scalar("SELECT image FROM submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        if let Some(Some(path)) = &image {
            uploads.remove(path).await;
        }

        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;
    use crate::models::SubmissionForm;
    use tempfile::TempDir;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p formdrop-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");
        ensure_schema(&pool).await.expect("schema failed");
        pool
    }

    fn new_submission(name: &str) -> NewSubmission {
        NewSubmission::from_form(SubmissionForm {
            name: Some(name.into()),
            email: Some("repo@test.local".into()),
            message: Some("from repo tests".into()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn out_of_range_id_is_not_found_without_database() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/nothing")
            .unwrap();
        let tmp = TempDir::new().unwrap();
        let uploads = UploadDir::new(tmp.path());
        let repo = SubmissionRepo::new(&pool);

        for id in [3_000_000_000, i64::MAX, i64::MIN] {
            assert_eq!(repo.delete(id, &uploads).await.unwrap(), DeleteOutcome::NotFound);
        }
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_list_newest_first() {
        let pool = test_pool().await;
        let repo = SubmissionRepo::new(&pool);

        let first = repo.insert(&new_submission("first"), "uploads/a.png").await.unwrap();
        let second = repo.insert(&new_submission("second"), "uploads/b.png").await.unwrap();
        assert!(second > first);

        let rows = repo.list().await.unwrap();
        let pos_first = rows.iter().position(|r| r.id == first).unwrap();
        let pos_second = rows.iter().position(|r| r.id == second).unwrap();
        assert!(pos_second < pos_first);
        assert_eq!(rows[pos_second].image.as_deref(), Some("uploads/b.png"));

        let tmp = TempDir::new().unwrap();
        let uploads = UploadDir::new(tmp.path());
        repo.delete(first.into(), &uploads).await.unwrap();
        repo.delete(second.into(), &uploads).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_removes_row_and_file() {
        let pool = test_pool().await;
        let repo = SubmissionRepo::new(&pool);
        let tmp = TempDir::new().unwrap();
        let uploads = UploadDir::new(tmp.path());

        let stored = uploads.create("pic.jpg").await.unwrap().finish().await.unwrap();
        let id = repo.insert(&new_submission("doomed"), &stored.stored_path).await.unwrap();

        assert_eq!(repo.delete(id.into(), &uploads).await.unwrap(), DeleteOutcome::Deleted);
        assert!(!stored.disk_path.exists());
        assert!(repo.list().await.unwrap().iter().all(|r| r.id != id));

        assert_eq!(repo.delete(id.into(), &uploads).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_survives_missing_file() {
        let pool = test_pool().await;
        let repo = SubmissionRepo::new(&pool);
        let tmp = TempDir::new().unwrap();
        let uploads = UploadDir::new(tmp.path());

        let id = repo
            .insert(&new_submission("orphan"), "uploads/never-written.png")
            .await
            .unwrap();

        assert_eq!(repo.delete(id.into(), &uploads).await.unwrap(), DeleteOutcome::Deleted);
    }
}
