mod enquiry;
mod migrate;
mod server;

pub use enquiry::list;
pub use migrate::{migrate, reset};
pub use server::serve;
