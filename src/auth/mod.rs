pub mod bearer;
pub mod handlers;

pub use bearer::{extract_bearer_token, BearerError};
