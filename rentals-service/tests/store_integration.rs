//! Store-backed tests
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run them
//! with `cargo test -- --ignored`. Each test gets a fresh database seeded
//! from `tests/fixtures`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rentals_service::prelude::*;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt; // for oneshot

async fn get(pool: &PgPool, uri: &str) -> (StatusCode, Value) {
    let app = router(AppState::new(Config::default(), pool.clone()));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, serde_json::from_slice(&body).expect("Failed to parse JSON body"))
}

async fn list(pool: &PgPool, uri: &str) -> Vec<RentalResponse> {
    let (status, body) = get(pool, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri} returned {body}");
    serde_json::from_value(body).unwrap()
}

fn ids(rentals: &[RentalResponse]) -> Vec<i32> {
    rentals.iter().map(|r| r.id).collect()
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_price_range_is_inclusive(pool: PgPool) {
    let rentals = list(&pool, "/rentals?price_min=5000&price_max=9000").await;

    assert!(!rentals.is_empty());
    for rental in &rentals {
        assert!((5000..=9000).contains(&rental.price.day), "{rental:?}");
    }
    let mut found = ids(&rentals);
    found.sort_unstable();
    assert_eq!(found, vec![5, 6, 7]);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_limit_caps_result_count(pool: PgPool) {
    let rentals = list(&pool, "/rentals?limit=5").await;
    assert_eq!(rentals.len(), 5);

    let rentals = list(&pool, "/rentals?limit=0").await;
    assert!(rentals.is_empty());
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_ids_restrict_results(pool: PgPool) {
    let rentals = list(&pool, "/rentals?ids=1,2,3").await;

    let mut found = ids(&rentals);
    found.sort_unstable();
    assert_eq!(found, vec![1, 2, 3]);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_sort_by_price_is_non_decreasing(pool: PgPool) {
    let rentals = list(&pool, "/rentals?sort=price").await;

    assert_eq!(rentals.len(), 8);
    assert!(rentals.windows(2).all(|w| w[0].price.day <= w[1].price.day));
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_paging_after_sorting(pool: PgPool) {
    let all = list(&pool, "/rentals?sort=price").await;
    let page = list(&pool, "/rentals?sort=price&limit=3&offset=2").await;

    assert_eq!(ids(&page), ids(&all[2..5]));
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_tied_sort_pages_join_up_to_full_list(pool: PgPool) {
    // Rentals 1 to 4 all sleep four; NULL sorts last
    let all = list(&pool, "/rentals?sort=sleeps").await;
    assert_eq!(ids(&all), vec![5, 6, 1, 2, 3, 4, 8, 7]);

    let mut paged = Vec::new();
    for offset in (0..all.len()).step_by(2) {
        let page = list(&pool, &format!("/rentals?sort=sleeps&limit=2&offset={offset}")).await;
        assert_eq!(ids(&page), ids(&all[offset..offset + 2]), "offset {offset}");
        paged.extend(page);
    }
    assert_eq!(paged, all);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_combined_criteria(pool: PgPool) {
    let rentals = list(
        &pool,
        "/rentals?sort=price&price_min=5000&price_max=15000&limit=6",
    )
    .await;

    assert!(rentals.len() <= 6);
    assert!(rentals
        .iter()
        .all(|r| (5000..=15000).contains(&r.price.day)));
    assert!(rentals.windows(2).all(|w| w[0].price.day <= w[1].price.day));
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_near_uses_bounding_box(pool: PgPool) {
    let rentals = list(&pool, "/rentals?near=33.64,-117.93").await;

    let mut found = ids(&rentals);
    found.sort_unstable();
    // Sydney is outside the box and a rental without coordinates never matches
    assert_eq!(found, vec![1, 2, 3, 4, 5, 8]);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_get_and_list_by_id_agree(pool: PgPool) {
    let (status, single) = get(&pool, "/rentals/2").await;
    assert_eq!(status, StatusCode::OK);
    let single: RentalResponse = serde_json::from_value(single).unwrap();

    let listed = list(&pool, "/rentals?ids=2").await;

    assert_eq!(listed, vec![single.clone()]);
    assert_eq!(single.user.first_name, "John");
    assert_eq!(single.make, "Volkswagen");
    assert_eq!(single.length, 15.0);
    assert_eq!(single.location.city, "Portland");
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_rental_is_not_found(pool: PgPool) {
    let (status, body) = get(&pool, "/rentals/9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_null_columns_render_as_defaults(pool: PgPool) {
    let (status, body) = get(&pool, "/rentals/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "");
    assert_eq!(body["sleeps"], 0);
    assert_eq!(body["location"]["lat"], 0.0);
    assert_eq!(body["price"]["day"], 7000);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_readiness_with_reachable_store(pool: PgPool) {
    let (status, body) = get(&pool, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[sqlx::test(migrations = false, fixtures("schema", "rentals"))]
#[ignore = "requires DATABASE_URL"]
async fn test_repository_returns_none_for_missing_id(pool: PgPool) {
    let repository = RentalRepository::new(pool);

    assert!(repository.find_by_id(9999).await.unwrap().is_none());
    let rental = repository.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(rental.user.last_name, "Smith");
    assert_eq!(rental.price_per_day, 16900);
}
