//! Comments repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::comment::{Comment, CommentDetails},
};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment with id {} not found", id)))
    }

    /// Store a comment and return it with the author's name
    pub async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: NaiveDateTime,
    ) -> AppResult<CommentDetails> {
        let comment = sqlx::query_as::<_, CommentDetails>(
            r#"
            WITH c AS (
                INSERT INTO comments (text, item_id, author_id, created)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT c.id, c.text, c.item_id, u.name AS author_name, c.created
            FROM c
            JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    /// Comments on any of the given items, oldest first
    pub async fn find_by_item_ids(&self, item_ids: &[i64]) -> AppResult<Vec<CommentDetails>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let comments = sqlx::query_as::<_, CommentDetails>(
            r#"
            SELECT c.id, c.text, c.item_id, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.item_id = ANY($1)
            ORDER BY c.created, c.id
            "#,
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
