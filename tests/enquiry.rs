use std::sync::Arc;

use axum::http::StatusCode;
use gurudev_enquiry::{Command, Query, Status};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_submitted_enquiry_is_stored_and_published() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("gurudev.db").to_str().unwrap());

    let pool = gurudev::db::create_write_pool(&url).await?;
    gurudev::db::run_migrations(&pool).await?;

    let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
    let command = Command::new(pool.clone()).with_subscriber(sender);
    let app = helpers::setup_test_app(Arc::new(command)).await?;

    let response = helpers::send(&app, helpers::post_contact(&helpers::scenario_a(), true)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = receiver.try_recv()?;
    assert_eq!(event.name, "Asha Rao");
    assert_eq!(event.state, "Karnataka");

    let query = Query(pool.clone());
    let row = query.find(&event.id).await?.expect("enquiry stored");
    assert_eq!(row.email, "asha.rao@gmail.com");
    assert_eq!(row.pincode, "560001");
    assert!(!row.is_forwarded());
    assert_eq!(query.count_by_status(Status::Received).await?, 1);

    let invalid = gurudev_enquiry::ContactFormValues {
        phone: "12".to_owned(),
        ..helpers::scenario_a()
    };
    let response = helpers::send(&app, helpers::post_contact(&invalid, true)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(query.count_by_status(Status::Received).await?, 1);
    assert!(receiver.try_recv().is_err());

    Ok(())
}

#[tokio::test]
async fn test_unavailable_database_shows_failure_toast() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("gurudev.db").to_str().unwrap());

    let pool = gurudev::db::create_write_pool(&url).await?;
    gurudev::db::run_migrations(&pool).await?;
    pool.close().await;

    let app = helpers::setup_test_app(Arc::new(Command::new(pool))).await?;

    let response = helpers::send(&app, helpers::post_contact(&helpers::scenario_a(), true)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_string(response).await;
    assert!(body.contains("Failed to submit enquiry"));
    assert!(body.contains(r#"value="Asha Rao""#));

    Ok(())
}
