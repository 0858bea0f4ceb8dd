mod enquiry_create_status_idx;
mod enquiry_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "gurudev",
    "m0001",
    vec_box![],
    vec_box![
        enquiry_create_table::Operation,
        enquiry_create_status_idx::Operation
    ]
);
