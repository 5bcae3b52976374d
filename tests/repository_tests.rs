//! Database tests
//!
//! These need a Postgres instance reachable through `DATABASE_URL`.
//! Run with: cargo test -- --ignored

use chrono::Duration;
use sqlx::PgPool;

use shareit::{
    models::{
        booking::{BookingInput, BookingState, BookingStatus},
        comment::CommentInput,
        item::ItemInput,
        local_now,
        request::ItemRequestInput,
        user::UserInput,
        PageQuery,
    },
    repository::Repository,
    services::Services,
    AppError,
};

fn user_input(name: &str, email: &str) -> UserInput {
    UserInput {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
    }
}

fn item_input(name: &str, description: &str) -> ItemInput {
    ItemInput {
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        available: Some(true),
        request_id: None,
    }
}

fn page(from: i64, size: i64) -> PageQuery {
    PageQuery { from, size }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_requests_from_other_users(pool: PgPool) {
    let repository = Repository::new(pool);
    let now = local_now();

    let ruru = repository.users.create("RuRu", "RuRu@yandex.ru").await.unwrap();
    let comcom = repository.users.create("ComCom", "ComCom@mail.ru").await.unwrap();

    let r1 = repository.requests.create(ruru.id, "Need a drill", now).await.unwrap();
    let r2 = repository.requests.create(ruru.id, "Need a ladder", now).await.unwrap();
    let r3 = repository.requests.create(comcom.id, "Need a tent", now).await.unwrap();

    let ids = |requests: Vec<shareit::models::ItemRequest>| -> Vec<i64> {
        requests.into_iter().map(|r| r.id).collect()
    };

    let requests = &repository.requests;
    assert_eq!(
        ids(requests.find_all_from_other_users(comcom.id, 0, 20).await.unwrap()),
        vec![r1.id, r2.id]
    );
    assert_eq!(
        ids(requests.find_all_from_other_users(ruru.id, 0, 20).await.unwrap()),
        vec![r3.id]
    );
    assert_eq!(
        ids(requests.find_all_from_other_users(comcom.id, 1, 2).await.unwrap()),
        vec![r2.id]
    );
    assert!(requests.find_all_from_other_users(ruru.id, 1, 2).await.unwrap().is_empty());
    assert!(requests.find_all_from_other_users(comcom.id, 0, 0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let services = Services::new(Repository::new(pool));

    services.users.create_user(user_input("RuRu", "RuRu@yandex.ru")).await.unwrap();
    let err = services
        .users
        .create_user(user_input("Other", "RuRu@yandex.ru"))
        .await
        .unwrap_err();

    match err {
        AppError::Conflict(message) => assert_eq!(message, "The email is already registered."),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_partial_user_update_keeps_other_fields(pool: PgPool) {
    let services = Services::new(Repository::new(pool));

    let user = services.users.create_user(user_input("RuRu", "RuRu@yandex.ru")).await.unwrap();
    let updated = services
        .users
        .update_user(
            user.id,
            UserInput {
                name: Some("RuRu Updated".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "RuRu Updated");
    assert_eq!(updated.email, "RuRu@yandex.ru");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_search_matches_available_items_case_insensitively(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();

    let drill = services
        .items
        .create_item(owner.id, item_input("Drill", "Cordless DRILL with battery"))
        .await
        .unwrap();
    let hidden = services
        .items
        .create_item(owner.id, item_input("Old drill", "Broken"))
        .await
        .unwrap();
    services
        .items
        .update_item(
            owner.id,
            hidden.id,
            ItemInput {
                available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let found = services.items.search("dRiLl", page(0, 10)).await.unwrap();
    assert_eq!(found.iter().map(|i| i.id).collect::<Vec<_>>(), vec![drill.id]);

    assert!(services.items.search("   ", page(0, 10)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_only_owner_may_update_item(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let other = services.users.create_user(user_input("Other", "other@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let err = services
        .items
        .update_item(other.id, item.id, item_input("Mine", "Mine"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_booking_lifecycle(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let booker = services.users.create_user(user_input("Booker", "booker@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let now = local_now();
    let input = BookingInput {
        item_id: Some(item.id),
        start: Some(now + Duration::days(1)),
        end: Some(now + Duration::days(2)),
    };

    // Owners cannot book their own items
    let err = services.bookings.create_booking(owner.id, input.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let booking = services.bookings.create_booking(booker.id, input).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Waiting);
    assert_eq!(booking.booker.id, booker.id);
    assert_eq!(booking.item.id, item.id);

    // Only the owner decides
    let err = services.bookings.decide(booker.id, booking.id, true).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let approved = services.bookings.decide(owner.id, booking.id, true).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    // A decided booking cannot change again
    let err = services.bookings.decide(owner.id, booking.id, false).await.unwrap_err();
    assert!(matches!(err, AppError::Unsupported(_)));

    let future = services
        .bookings
        .list_for_owner(owner.id, BookingState::Future, page(0, 10))
        .await
        .unwrap();
    assert_eq!(future.len(), 1);

    let past = services
        .bookings
        .list_for_booker(booker.id, BookingState::Past, page(0, 10))
        .await
        .unwrap();
    assert!(past.is_empty());

    let details = services.items.get_item(owner.id, item.id).await.unwrap();
    assert!(details.last_booking.is_none());
    assert_eq!(details.next_booking.map(|b| b.id), Some(booking.id));

    let seen_by_booker = services.items.get_item(booker.id, item.id).await.unwrap();
    assert!(seen_by_booker.next_booking.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_booking_end_before_start_is_rejected(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let booker = services.users.create_user(user_input("Booker", "booker@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let now = local_now();
    let err = services
        .bookings
        .create_booking(
            booker.id,
            BookingInput {
                item_id: Some(item.id),
                start: Some(now + Duration::days(2)),
                end: Some(now + Duration::days(1)),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_comment_requires_finished_booking(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let booker = services.users.create_user(user_input("Booker", "booker@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let comment = CommentInput {
        text: Some("Great drill".to_string()),
    };
    let err = services
        .items
        .add_comment(booker.id, item.id, comment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_requests_list_answers(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let requester = services.users.create_user(user_input("RuRu", "RuRu@yandex.ru")).await.unwrap();
    let owner = services.users.create_user(user_input("ComCom", "ComCom@mail.ru")).await.unwrap();

    let request = services
        .requests
        .create_request(
            requester.id,
            ItemRequestInput {
                description: Some("Need a drill".to_string()),
            },
        )
        .await
        .unwrap();

    let mut answer = item_input("Drill", "Drill");
    answer.request_id = Some(request.id);
    let item = services.items.create_item(owner.id, answer).await.unwrap();

    let own = services.requests.list_own(requester.id).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![item.id]);

    let others = services.requests.list_others(owner.id, page(0, 10)).await.unwrap();
    assert_eq!(others.iter().map(|r| r.id).collect::<Vec<_>>(), vec![request.id]);

    let err = services.requests.list_others(9999, page(0, 10)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_entities_read_back_as_stored(pool: PgPool) {
    let repository = Repository::new(pool);
    let now = local_now();

    let owner = repository.users.create("Owner", "owner@mail.ru").await.unwrap();
    let booker = repository.users.create("Booker", "booker@mail.ru").await.unwrap();
    assert!(owner.id > 0);
    assert_eq!(repository.users.get_by_id(owner.id).await.unwrap(), owner);

    let request = repository.requests.create(booker.id, "Need a drill", now).await.unwrap();
    assert_eq!(repository.requests.get_by_id(request.id).await.unwrap(), request);

    let item = repository
        .items
        .create(owner.id, "Drill", "Cordless drill", true, Some(request.id))
        .await
        .unwrap();
    assert_eq!(item.request_id, Some(request.id));
    assert_eq!(repository.items.get_by_id(item.id).await.unwrap(), item);

    let booking = repository
        .bookings
        .create(
            item.id,
            booker.id,
            now + Duration::hours(1),
            now + Duration::hours(2),
            BookingStatus::Waiting,
        )
        .await
        .unwrap();
    assert_eq!(repository.bookings.get_by_id(booking.id).await.unwrap(), booking);

    let comment = repository
        .comments
        .create(item.id, booker.id, "Works fine", now)
        .await
        .unwrap();
    assert_eq!(comment.author_name, "Booker");
    let stored = repository.comments.get_by_id(comment.id).await.unwrap();
    assert_eq!(
        (stored.text.as_str(), stored.item_id, stored.author_id, stored.created),
        ("Works fine", item.id, booker.id, now)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_requests_from_other_users_are_stable(pool: PgPool) {
    let repository = Repository::new(pool);
    let now = local_now();

    let ruru = repository.users.create("RuRu", "RuRu@yandex.ru").await.unwrap();
    let comcom = repository.users.create("ComCom", "ComCom@mail.ru").await.unwrap();
    for description in ["Need a drill", "Need a ladder", "Need a saw"] {
        repository.requests.create(ruru.id, description, now).await.unwrap();
    }

    let first = repository.requests.find_all_from_other_users(comcom.id, 0, 20).await.unwrap();
    let second = repository.requests.find_all_from_other_users(comcom.id, 0, 20).await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_comment_after_finished_booking(pool: PgPool) {
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let booker = services.users.create_user(user_input("Booker", "booker@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let now = local_now();
    let booking = repository
        .bookings
        .create(
            item.id,
            booker.id,
            now - Duration::days(2),
            now - Duration::days(1),
            BookingStatus::Approved,
        )
        .await
        .unwrap();

    let comment = services
        .items
        .add_comment(
            booker.id,
            item.id,
            CommentInput {
                text: Some("  Great drill ".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(comment.text, "Great drill");
    assert_eq!(comment.author_name, "Booker");

    let details = services.items.get_item(owner.id, item.id).await.unwrap();
    assert_eq!(details.comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![comment.id]);
    assert_eq!(details.last_booking.map(|b| b.id), Some(booking.id));

    let seen_by_booker = services.items.get_item(booker.id, item.id).await.unwrap();
    assert_eq!(seen_by_booker.comments.len(), 1);
    assert!(seen_by_booker.last_booking.is_none());

    let owned = services.items.list_owner_items(owner.id, page(0, 10)).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].comments[0].text, "Great drill");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_updates_are_trimmed_and_never_blank(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let owner = services.users.create_user(user_input("Owner", "owner@mail.ru")).await.unwrap();
    let item = services.items.create_item(owner.id, item_input("Drill", "Drill")).await.unwrap();

    let err = services
        .items
        .update_item(
            owner.id,
            item.id,
            ItemInput {
                name: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(services.items.get_item(owner.id, item.id).await.unwrap().name, "Drill");

    let updated = services
        .items
        .update_item(
            owner.id,
            item.id,
            ItemInput {
                name: Some("  Hammer drill ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Hammer drill");

    let renamed = services
        .users
        .update_user(
            owner.id,
            UserInput {
                name: Some(" Owner Renamed ".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Owner Renamed");
}
