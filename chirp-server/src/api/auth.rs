use crate::api::{ApiError, ApiResult};

/// GET /login - Always rejected; there is no login flow
pub async fn login() -> ApiResult<()> {
    Err(ApiError::Unauthorized("Login is not available".to_string()))
}
