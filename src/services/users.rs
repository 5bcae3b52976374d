//! User management service

use crate::{
    error::AppResult,
    models::user::{User, UserInput},
    repository::Repository,
    validation::{ValidateInput, ValidationMode},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Create a new user
    pub async fn create_user(&self, input: UserInput) -> AppResult<User> {
        input.validate_for(ValidationMode::Create)?;

        let name = input.name.as_deref().map(str::trim).unwrap_or_default();
        let email = input.email.as_deref().map(str::trim).unwrap_or_default();

        let user = self.repository.users.create(name, email).await?;
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Update name and/or email of an existing user
    pub async fn update_user(&self, id: i64, input: UserInput) -> AppResult<User> {
        input.validate_for(ValidationMode::Update)?;

        let user = self.repository.users.update(id, &input.trimmed()).await?;
        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }
}
