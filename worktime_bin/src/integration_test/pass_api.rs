use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rest_types::{PassPageTO, PassTO};
use time::macros::format_description;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::integration_test::TestSetup;

fn today_date_time(time: &str) -> String {
    let today = OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap();
    format!("{today}T{time}")
}

#[tokio::test]
async fn test_get_pass_own_records() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_user("asmith", "Alice Smith", false, None).await;
    test_setup.seed_pass(1001, "jdoe", "IN", "2024-03-01T08:00:00").await;
    test_setup.seed_pass(1001, "jdoe", "OUT", "2024-03-01T16:30:00").await;
    test_setup.seed_pass(1002, "asmith", "IN", "2024-03-01T09:00:00").await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass?role=jdoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let page: PassPageTO = serde_json::from_slice(&body).unwrap();

    assert_eq!(2, page.total);
    assert_eq!(0, page.page);
    assert_eq!(50, page.page_size);
    assert_eq!(2, page.items.len());
    assert!(page.items.iter().all(|pass| pass.username.as_ref() == "jdoe"));
    // Newest first.
    assert!(page.items[0].date_time > page.items[1].date_time);
}

#[tokio::test]
async fn test_get_pass_other_user_requires_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_user("asmith", "Alice Smith", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass?role=jdoe&username=asmith")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}

#[tokio::test]
async fn test_get_pass_usercode_filter_requires_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass?role=jdoe&usercode=1002")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}

#[tokio::test]
async fn test_get_pass_by_usercode() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("boss", "Bruce Wayne", true, None).await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_user("asmith", "Alice Smith", false, None).await;
    test_setup.seed_pass(1001, "jdoe", "IN", "2024-03-01T08:00:00").await;
    test_setup.seed_pass(1002, "asmith", "IN", "2024-03-01T09:00:00").await;
    test_setup.seed_pass(1002, "asmith", "OUT", "2024-03-01T17:00:00").await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass?role=boss&usercode=1002")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let page: PassPageTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(2, page.total);
    assert!(page.items.iter().all(|pass| pass.usercode == 1002));
}

#[tokio::test]
async fn test_get_pass_all_users_as_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("boss", "Bruce Wayne", true, None).await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_pass(1001, "jdoe", "IN", "2024-03-01T08:00:00").await;
    test_setup.seed_pass(1003, "boss", "IN", "2024-03-01T07:00:00").await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass?role=boss")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let page: PassPageTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(2, page.total);
    assert_eq!(2, page.items.len());
}

#[tokio::test]
async fn test_get_pass_onsite() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("boss", "Bruce Wayne", true, None).await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_user("asmith", "Alice Smith", false, None).await;
    // jdoe is inside, asmith already left, old records do not count.
    test_setup.seed_pass(1001, "jdoe", "IN", &today_date_time("08:00:00")).await;
    test_setup.seed_pass(1002, "asmith", "IN", &today_date_time("07:30:00")).await;
    test_setup.seed_pass(1002, "asmith", "OUT", &today_date_time("12:00:00")).await;
    test_setup.seed_pass(1003, "boss", "IN", "2024-03-01T08:00:00").await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass/onsite?role=boss")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let onsite: Vec<PassTO> = serde_json::from_slice(&body).unwrap();
    assert_eq!(1, onsite.len());
    assert_eq!("jdoe", onsite[0].username.as_ref());
}

#[tokio::test]
async fn test_get_pass_onsite_requires_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/pass/onsite?role=jdoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}
