use anyhow::Result;
use gurudev_enquiry::{Query, Status};

/// Prints the most recent enquiries, newest first.
pub async fn list(config: crate::config::Config, limit: u64) -> Result<()> {
    let pool = crate::db::create_read_pool(&config.database.url, 1).await?;
    let query = Query(pool.clone());

    let rows = query.recent(limit).await?;
    let received = query.count_by_status(Status::Received).await?;
    let forwarded = query.count_by_status(Status::Forwarded).await?;

    println!(
        "{:<26}  {:<16}  {:<28}  {:<9}  NAME",
        "ID", "CREATED", "STATE", "STATUS"
    );

    for row in rows {
        println!(
            "{:<26}  {:<16}  {:<28}  {:<9}  {}",
            row.id,
            row.created_at(),
            row.state,
            row.status.0,
            row.name
        );
    }

    println!("\n{received} received, {forwarded} forwarded");

    pool.close().await;

    Ok(())
}
