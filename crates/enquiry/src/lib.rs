mod command;
mod field;
mod form;
mod input;
mod query;
mod region;
mod submit;
mod types;

pub use command::*;
pub use field::*;
pub use form::*;
pub use input::*;
pub use query::*;
pub use region::*;
pub use submit::*;
pub use types::*;
