//! Item sharing service: listing, search and comments

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingShort},
        comment::{CommentDetails, CommentInput},
        item::{Item, ItemDetails, ItemInput},
        local_now, PageQuery,
    },
    repository::Repository,
    validation::{ValidateInput, ValidationMode},
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a new item for `owner_id`
    pub async fn create_item(&self, owner_id: i64, input: ItemInput) -> AppResult<Item> {
        input.validate_for(ValidationMode::Create)?;
        self.repository.users.get_by_id(owner_id).await?;

        if let Some(request_id) = input.request_id {
            if !self.repository.requests.exists(request_id).await? {
                return Err(AppError::NotFound(format!("Request with id {} not found", request_id)));
            }
        }

        let item = self
            .repository
            .items
            .create(
                owner_id,
                input.name.as_deref().map(str::trim).unwrap_or_default(),
                input.description.as_deref().map(str::trim).unwrap_or_default(),
                input.available.unwrap_or_default(),
                input.request_id,
            )
            .await?;
        tracing::info!(item_id = item.id, owner_id, "Created item");
        Ok(item)
    }

    /// Update an item; only its owner may do so
    pub async fn update_item(&self, owner_id: i64, item_id: i64, input: ItemInput) -> AppResult<Item> {
        input.validate_for(ValidationMode::Update)?;
        self.repository.users.get_by_id(owner_id).await?;

        let item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != owner_id {
            return Err(AppError::Forbidden(format!(
                "User {} is not the owner of item {}",
                owner_id, item_id
            )));
        }

        let updated = self.repository.items.update(item_id, &input.trimmed()).await?;
        tracing::info!(item_id, owner_id, "Updated item");
        Ok(updated)
    }

    /// Item with comments; bookings are only shown to the owner
    pub async fn get_item(&self, user_id: i64, item_id: i64) -> AppResult<ItemDetails> {
        self.repository.users.get_by_id(user_id).await?;
        let item = self.repository.items.get_by_id(item_id).await?;
        let with_bookings = item.owner_id == user_id;

        let mut details = self.with_details(vec![item], with_bookings).await?;
        details
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", item_id)))
    }

    /// The owner's items with bookings and comments
    pub async fn list_owner_items(&self, owner_id: i64, page: PageQuery) -> AppResult<Vec<ItemDetails>> {
        self.repository.users.get_by_id(owner_id).await?;
        let items = self
            .repository
            .items
            .find_by_owner(owner_id, page.from, page.size)
            .await?;
        self.with_details(items, true).await
    }

    /// Available items matching `text`; blank text finds nothing
    pub async fn search(&self, text: &str, page: PageQuery) -> AppResult<Vec<Item>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.items.search(text, page.from, page.size).await
    }

    /// Comment on an item the author has finished a booking of
    pub async fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        input: CommentInput,
    ) -> AppResult<CommentDetails> {
        input.validate_for(ValidationMode::Create)?;
        self.repository.users.get_by_id(author_id).await?;
        self.repository.items.get_by_id(item_id).await?;

        let now = local_now();
        if !self
            .repository
            .bookings
            .has_finished_booking(author_id, item_id, now)
            .await?
        {
            return Err(AppError::validation(
                "author",
                format!("User {} has no completed booking of item {}", author_id, item_id),
            ));
        }

        let text = input.text.as_deref().map(str::trim).unwrap_or_default();
        let comment = self
            .repository
            .comments
            .create(item_id, author_id, text, now)
            .await?;
        tracing::info!(comment_id = comment.id, item_id, author_id, "Added comment");
        Ok(comment)
    }

    async fn with_details(&self, items: Vec<Item>, with_bookings: bool) -> AppResult<Vec<ItemDetails>> {
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();

        let mut comments: HashMap<i64, Vec<CommentDetails>> = HashMap::new();
        for comment in self.repository.comments.find_by_item_ids(&ids).await? {
            comments.entry(comment.item_id).or_default().push(comment);
        }

        let mut bookings: HashMap<i64, Vec<Booking>> = HashMap::new();
        if with_bookings {
            for booking in self.repository.bookings.find_approved_by_item_ids(&ids).await? {
                bookings.entry(booking.item_id).or_default().push(booking);
            }
        }

        let now = local_now();
        Ok(items
            .into_iter()
            .map(|item| {
                let item_bookings = bookings.remove(&item.id).unwrap_or_default();
                let item_comments = comments.remove(&item.id).unwrap_or_default();
                let (last, next) = last_and_next(&item_bookings, now);

                let mut details = ItemDetails::new(item);
                details.last_booking = last;
                details.next_booking = next;
                details.comments = item_comments;
                details
            })
            .collect())
    }
}

/// Latest booking already started and earliest booking still to come
pub fn last_and_next(
    bookings: &[Booking],
    now: NaiveDateTime,
) -> (Option<BookingShort>, Option<BookingShort>) {
    let last = bookings
        .iter()
        .filter(|b| b.start <= now)
        .max_by_key(|b| b.start)
        .map(BookingShort::from);
    let next = bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .map(BookingShort::from);
    (last, next)
}
