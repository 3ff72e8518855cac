pub mod auth;
pub mod error;
pub mod legacy;
pub mod tweets;

pub use error::{ApiError, ApiResult};
