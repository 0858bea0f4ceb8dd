use std::time::Duration;

use gurudev_enquiry::{
    Command, ContactForm, ContactFormValues, Field, InFlight, Query, SubmitOutcome,
};
use temp_dir::TempDir;

mod helpers;

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_valid_form_is_stored_and_cleared() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let command = Command::new(pool.clone());
    let mut form = ContactForm::new(ContactFormValues {
        message: String::new(),
        ..helpers::values("Asha Rao")
    });

    let SubmitOutcome::Submitted(id) = form.submit(&command, &InFlight::default(), TIMEOUT).await
    else {
        panic!("expected the enquiry to be submitted");
    };

    assert_eq!(form.values, ContactFormValues::default());

    let row = Query(pool).find(id).await?.unwrap();
    assert_eq!(row.name, "Asha Rao");
    assert_eq!(row.message, "");

    Ok(())
}

#[tokio::test]
async fn test_invalid_form_is_not_stored() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let command = Command::new(pool.clone());
    let mut form = ContactForm::new(ContactFormValues {
        pincode: "12345".to_owned(),
        ..helpers::values("Asha Rao")
    });

    let outcome = form.submit(&command, &InFlight::default(), TIMEOUT).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(form.errors.contains(Field::Pincode));
    assert_eq!(form.values.pincode, "12345");
    assert!(Query(pool).recent(10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_store_failure_keeps_values() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let command = Command::new(pool.clone());
    pool.close().await;

    let values = helpers::values("Asha Rao");
    let mut form = ContactForm::new(values.clone());

    let outcome = form.submit(&command, &InFlight::default(), TIMEOUT).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.values, values);

    Ok(())
}
