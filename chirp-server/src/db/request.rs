use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use rusqlite::Connection;
use std::ops::Deref;

use super::connection::DbConnection;
use crate::api::ApiError;
use crate::state::AppState;

/// One pooled connection, acquired when a handler asks for it and returned
/// to the pool when the request finishes.
pub struct DbConn(pub DbConnection);

impl Deref for DbConn {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // r2d2 blocks while the pool is exhausted
        let db = state.db.clone();
        let acquired = tokio::task::spawn_blocking(move || db.connection())
            .await
            .map_err(|e| ApiError::InternalError(format!("Connection task failed: {}", e)))?;

        match acquired {
            Ok(conn) => Ok(DbConn(conn)),
            Err(e) => {
                tracing::error!("Problem connecting to database: {:#}", e);
                Err(ApiError::ServiceUnavailable(
                    "Database connection unavailable".to_string(),
                ))
            }
        }
    }
}
