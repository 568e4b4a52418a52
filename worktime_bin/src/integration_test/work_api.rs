use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rest_types::{WorkDayTypeTO, WorkMonthTO, WorkTO, WorkTypeTO};
use time::macros::format_description;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::integration_test::TestSetup;

fn today_string() -> String {
    OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap()
}

#[tokio::test]
async fn test_get_work_month_aggregates() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    // Friday with a full swipe day including a lunch break.
    test_setup.seed_pass(1001, "jdoe", "IN", "2024-03-01T08:00:00").await;
    test_setup.seed_pass(1001, "jdoe", "OUT", "2024-03-01T12:00:00").await;
    test_setup.seed_pass(1001, "jdoe", "IN", "2024-03-01T12:30:00").await;
    test_setup.seed_pass(1001, "jdoe", "OUT", "2024-03-01T16:30:00").await;
    test_setup.seed_work("jdoe", "2024-03-04", Some(8.0), "VACATION").await;
    test_setup.seed_holiday("2024-03-08", "Test holiday").await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=jdoe&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let month: WorkMonthTO = serde_json::from_slice(&body).unwrap();

    assert_eq!(2024, month.year);
    assert_eq!(3, month.month);
    assert_eq!(31, month.work_days.len());
    // 21 weekdays in March 2024 minus the seeded holiday.
    assert_eq!(20, month.sum_work_days);
    assert_eq!(1, month.sum_holidays);
    assert_eq!(1, month.sum_on_site_days);
    assert_eq!(0, month.elapsed_work_days);

    let first = &month.work_days[0];
    assert_eq!(WorkDayTypeTO::Workday, first.day_type);
    assert_eq!(Some(8.0), first.worked_hours);
    assert!(first.work_start.is_some());
    assert!(first.lunch_start.is_some());
    assert!(first.lunch_end.is_some());
    assert!(first.work_end.is_some());

    assert_eq!(WorkDayTypeTO::Weekend, month.work_days[1].day_type);
    assert_eq!(WorkDayTypeTO::NationalHoliday, month.work_days[7].day_type);
    assert_eq!(
        Some("Test holiday"),
        month.work_days[7].holiday.as_deref()
    );

    let vacation_day = &month.work_days[3];
    let work = vacation_day.work.as_ref().expect("Expected a work record");
    assert_eq!(WorkTypeTO::Vacation, work.work_type);
    assert_eq!(Some(8.0), work.hours);

    assert_eq!(3, month.sums.len());
    let vacation_sum = month
        .sums
        .iter()
        .find(|sum| sum.work_type == WorkTypeTO::Vacation)
        .unwrap();
    assert_eq!(8.0, vacation_sum.hours);
}

#[tokio::test]
async fn test_get_work_defaults_to_current_month() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=jdoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let month: WorkMonthTO = serde_json::from_slice(&body).unwrap();

    let today = OffsetDateTime::now_utc().date();
    assert_eq!(today.year(), month.year);
    assert_eq!(today.month() as u8, month.month);
}

#[tokio::test]
async fn test_get_work_requires_identity() {
    let test_setup = TestSetup::new().await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}

#[tokio::test]
async fn test_get_work_other_user_requires_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    test_setup.seed_user("asmith", "Alice Smith", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=jdoe&username=asmith&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}

#[tokio::test]
async fn test_get_work_other_user_as_admin() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("boss", "Bruce Wayne", true, None).await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=boss&username=jdoe&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
}

#[tokio::test]
async fn test_get_work_unknown_user() {
    let test_setup = TestSetup::new().await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=ghost&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn test_update_work_roundtrip() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;
    let today = today_string();

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/work/update?role=jdoe")
                .header("Content-Type", "application/json")
                .body(Body::from(format!(
                    r#"{{"date":"{today}","hours":4.0,"workType":"VACATION"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let stored: WorkTO = serde_json::from_slice(&body).unwrap();
    assert_eq!("jdoe", stored.username.as_ref());
    assert_eq!(Some(4.0), stored.hours);
    assert_eq!(WorkTypeTO::Vacation, stored.work_type);
    assert!(!stored.id.is_nil());

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work?role=jdoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let month: WorkMonthTO = serde_json::from_slice(&body).unwrap();
    let day = month
        .work_days
        .iter()
        .find(|day| day.work.as_ref().is_some_and(|work| work.id == stored.id))
        .expect("Expected the stored record in the month view");
    assert_eq!(Some(4.0), day.work.as_ref().unwrap().hours);
}

#[tokio::test]
async fn test_update_work_requires_id_or_date() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/work/update?role=jdoe")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"hours":4.0,"workType":"VACATION"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn test_update_work_closed_month() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/work/update?role=jdoe")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"date":"2024-03-04","hours":4.0,"workType":"VACATION"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());
}

#[tokio::test]
async fn test_export_work_spreadsheet() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/work/export?role=jdoe&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let disposition = response
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("2024.03-jdoe.xlsx"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(b"PK", &body[0..2]);
}

#[tokio::test]
async fn test_get_work_html() {
    let test_setup = TestSetup::new().await;
    test_setup.seed_user("jdoe", "John Doe", false, None).await;

    let response = test_setup
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/work/html?role=jdoe&year=2024&month=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        "text/html; charset=utf-8",
        response
            .headers()
            .get("Content-Type")
            .unwrap()
            .to_str()
            .unwrap()
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("John Doe"));
    assert!(html.contains("2024.03"));
}
