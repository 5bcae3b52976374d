//! Item request service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::Item,
        local_now,
        request::{ItemRequest, ItemRequestDetails, ItemRequestInput},
        PageQuery,
    },
    repository::Repository,
    validation::{ValidateInput, ValidationMode},
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a request for an item nobody has listed yet
    pub async fn create_request(
        &self,
        requester_id: i64,
        input: ItemRequestInput,
    ) -> AppResult<ItemRequestDetails> {
        input.validate_for(ValidationMode::Create)?;
        self.repository.users.get_by_id(requester_id).await?;

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| AppError::validation("description", "The description must not be empty."))?;

        let request = self
            .repository
            .requests
            .create(requester_id, description, local_now())
            .await?;
        tracing::info!(request_id = request.id, requester_id, "Created item request");

        Ok(ItemRequestDetails::new(request, Vec::new()))
    }

    /// The user's own requests, newest first
    pub async fn list_own(&self, requester_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(requester_id).await?;

        let mut requests = self.repository.requests.find_all_by_requester(requester_id).await?;
        requests.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));

        self.with_items(requests).await
    }

    /// Requests of everybody else, in ID order, one page at a time
    pub async fn list_others(&self, user_id: i64, page: PageQuery) -> AppResult<Vec<ItemRequestDetails>> {
        // An unknown id would match every request, so reject it up front
        if !self.repository.users.exists(user_id).await? {
            return Err(AppError::NotFound(format!("User with id {} not found", user_id)));
        }

        let requests = self
            .repository
            .requests
            .find_all_from_other_users(user_id, page.from, page.size)
            .await?;

        self.with_items(requests).await
    }

    pub async fn get_request(&self, user_id: i64, request_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;

        let mut details = self.with_items(vec![request]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request_id)))
    }

    async fn with_items(&self, requests: Vec<ItemRequest>) -> AppResult<Vec<ItemRequestDetails>> {
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.repository.items.find_by_request_ids(&ids).await?;
        Ok(attach_items(requests, items))
    }
}

/// Pair each request with the items listed in answer to it, keeping request order
fn attach_items(requests: Vec<ItemRequest>, items: Vec<Item>) -> Vec<ItemRequestDetails> {
    let mut by_request: HashMap<i64, Vec<Item>> = HashMap::new();
    for item in items {
        if let Some(request_id) = item.request_id {
            by_request.entry(request_id).or_default().push(item);
        }
    }

    requests
        .into_iter()
        .map(|request| {
            let items = by_request.remove(&request.id).unwrap_or_default();
            ItemRequestDetails::new(request, items)
        })
        .collect()
}
