//! Item requests repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::ItemRequest,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ItemRequest> {
        sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM requests WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn create(
        &self,
        requester_id: i64,
        description: &str,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, requester_id, created)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(requester_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// Requests made by one user, in ID order
    pub async fn find_all_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            "SELECT * FROM requests WHERE requester_id = $1 ORDER BY id",
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Requests made by anyone except `user_id`, ordered by ID
    ///
    /// Skips `from` rows and returns at most `size`. The caller is expected to
    /// have checked that `user_id` exists; an unknown id matches every row.
    pub async fn find_all_from_other_users(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT r.id, r.description, r.requester_id, r.created
            FROM requests AS r
            LEFT JOIN users u ON u.id = r.requester_id
            WHERE r.requester_id <> $1
            ORDER BY r.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}
