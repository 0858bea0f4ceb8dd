use std::{path::PathBuf, str::FromStr};

use gurudev_enquiry::{ContactFormValues, EnquiryInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    gurudev_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[allow(dead_code)]
pub fn values(name: impl Into<String>) -> ContactFormValues {
    let name = name.into();

    ContactFormValues {
        email: format!("{}@gmail.com", name.replace(' ', ".").to_lowercase()),
        name,
        phone: "9876543210".to_owned(),
        state: "Karnataka".to_owned(),
        pincode: "560001".to_owned(),
        message: "Please call me back".to_owned(),
    }
}

#[allow(dead_code)]
pub fn input(name: impl Into<String>) -> EnquiryInput {
    values(name).validate_input().unwrap()
}
