mod common;

use std::num::NonZeroU32;

use axum::http::StatusCode;
use seatbook_server::services::booking::{
    attempt_booking, BookingError, BookingOutcome, RejectionReason,
};
use seatbook_server::services::ledger;
use seatbook_server::utils::error::AppError;

use common::{
    assert_conserved, create_event, create_user, file_pool, memory_pool, remaining_seats,
    ticket_count,
};

fn seats(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

#[tokio::test]
async fn test_book_full_capacity_then_one_more() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 200).await;

    let first = attempt_booking(&pool, user, event, seats(200)).await.unwrap();
    assert!(first.is_committed());
    assert_eq!(remaining_seats(&pool, event).await, 0);

    let second = attempt_booking(&pool, user, event, seats(1)).await.unwrap();
    assert_eq!(
        second,
        BookingOutcome::Rejected(RejectionReason::InsufficientSeats)
    );
    assert_conserved(&pool, event, 200).await;
}

#[tokio::test]
async fn test_unknown_event_is_rejected() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;

    let outcome = attempt_booking(&pool, user, 9999, seats(1)).await.unwrap();
    assert_eq!(
        outcome,
        BookingOutcome::Rejected(RejectionReason::EventNotFound)
    );
    assert_eq!(ticket_count(&pool).await, 0);
}

#[tokio::test]
async fn test_committed_ticket_matches_request() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 10).await;

    let BookingOutcome::Committed(ticket_id) =
        attempt_booking(&pool, user, event, seats(3)).await.unwrap()
    else {
        panic!("booking should commit");
    };

    let ticket = ledger::find_ticket(&pool, ticket_id).await.unwrap().unwrap();
    assert_eq!(ticket.user_id, user);
    assert_eq!(ticket.event_id, event);
    assert_eq!(ticket.seats, 3);
    assert_eq!(remaining_seats(&pool, event).await, 7);
}

#[tokio::test]
async fn test_exact_remaining_succeeds_one_more_fails() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 50).await;

    attempt_booking(&pool, user, event, seats(20)).await.unwrap();

    let over = attempt_booking(&pool, user, event, seats(31)).await.unwrap();
    assert_eq!(
        over,
        BookingOutcome::Rejected(RejectionReason::InsufficientSeats)
    );
    assert_eq!(remaining_seats(&pool, event).await, 30);

    let exact = attempt_booking(&pool, user, event, seats(30)).await.unwrap();
    assert!(exact.is_committed());
    assert_eq!(remaining_seats(&pool, event).await, 0);
}

#[tokio::test]
async fn test_rejection_is_a_repeatable_no_op() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 5).await;

    for _ in 0..3 {
        let outcome = attempt_booking(&pool, user, event, seats(6)).await.unwrap();
        assert_eq!(
            outcome,
            BookingOutcome::Rejected(RejectionReason::InsufficientSeats)
        );
        assert_eq!(remaining_seats(&pool, event).await, 5);
        assert_eq!(ticket_count(&pool).await, 0);
    }
}

#[tokio::test]
async fn test_conservation_over_mixed_sequence() {
    let pool = memory_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let event = create_event(&pool, 100).await;

    let requests = [(alice, 40), (bob, 70), (bob, 35), (alice, 25), (alice, 1), (bob, 1)];
    let mut committed = 0;
    for (user, n) in requests {
        if attempt_booking(&pool, user, event, seats(n))
            .await
            .unwrap()
            .is_committed()
        {
            committed += 1;
        }
        assert_conserved(&pool, event, 100).await;
    }

    // 40 + 35 + 25 fill the event, everything else bounces
    assert_eq!(committed, 3);
    assert_eq!(remaining_seats(&pool, event).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_concurrent_bookings_cannot_oversell() {
    let (pool, _dir) = file_pool(4).await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let event = create_event(&pool, 200).await;

    let first = tokio::spawn({
        let pool = pool.clone();
        async move { attempt_booking(&pool, alice, event, seats(150)).await }
    });
    let second = tokio::spawn({
        let pool = pool.clone();
        async move { attempt_booking(&pool, bob, event, seats(150)).await }
    });

    let outcomes = [
        first.await.unwrap().unwrap(),
        second.await.unwrap().unwrap(),
    ];

    let committed = outcomes.iter().filter(|o| o.is_committed()).count();
    assert_eq!(committed, 1);
    assert!(outcomes
        .contains(&BookingOutcome::Rejected(RejectionReason::InsufficientSeats)));
    assert_eq!(remaining_seats(&pool, event).await, 50);
    assert_eq!(ticket_count(&pool).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conservation_under_concurrent_load() {
    let (pool, _dir) = file_pool(8).await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 200).await;

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { attempt_booking(&pool, user, event, seats(30)).await })
        })
        .collect();

    let mut committed = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_committed() {
            committed += 1;
        }
    }

    assert_eq!(committed, 6);
    assert_eq!(remaining_seats(&pool, event).await, 20);
    assert_conserved(&pool, event, 200).await;
}

#[tokio::test]
async fn test_failed_ticket_insert_undoes_the_decrement() {
    let pool = memory_pool().await;
    let event = create_event(&pool, 10).await;

    // no such user: the seat decrement succeeds, the ticket insert trips the
    // foreign key
    let result = attempt_booking(&pool, 4242, event, seats(4)).await;
    let Err(err) = result else {
        panic!("booking for an unknown user should fail");
    };
    assert!(matches!(err, BookingError::StorageUnavailable(_)));

    assert_eq!(remaining_seats(&pool, event).await, 10);
    assert_eq!(ticket_count(&pool).await, 0);
    assert_conserved(&pool, event, 10).await;

    // retrying a constraint failure cannot help, so it is not a 503
    let app_err = AppError::from(err);
    assert_eq!(app_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app_err.code(), "DATABASE_ERROR");
}

#[tokio::test]
async fn test_closed_pool_reports_storage_unavailable() {
    let pool = memory_pool().await;
    let user = create_user(&pool, "alice").await;
    let event = create_event(&pool, 10).await;
    pool.close().await;

    let err = attempt_booking(&pool, user, event, seats(1))
        .await
        .expect_err("a closed pool cannot book");
    assert!(matches!(
        err,
        BookingError::StorageUnavailable(sqlx::Error::PoolClosed)
    ));

    let app_err = AppError::from(err);
    assert_eq!(app_err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(app_err.code(), "STORAGE_UNAVAILABLE");
}
