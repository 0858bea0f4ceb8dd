pub mod enquiry;
mod service;
pub(crate) mod template;

pub use enquiry::subscribe_enquiry;
pub use service::*;
