//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, ItemInput},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

/// Escape LIKE wildcards in user-supplied search text
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create an item owned by `owner_id`
    pub async fn create(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        available: bool,
        request_id: Option<i64>,
    ) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(available)
        .bind(owner_id)
        .bind(request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Update the provided fields of an item
    pub async fn update(&self, id: i64, input: &ItemInput) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                available = COALESCE($4, available)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Items of one owner, ordered by ID
    pub async fn find_by_owner(&self, owner_id: i64, from: i64, size: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Available items whose name or description contains `text`
    pub async fn search(&self, text: &str, from: i64, size: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE available
              AND (name ILIKE $1 OR description ILIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(text))
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items listed in answer to any of the given requests
    pub async fn find_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE request_id = ANY($1) ORDER BY id",
        )
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
