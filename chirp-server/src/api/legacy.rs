use axum::{
    extract::{rejection::FormRejection, Query},
    response::{Html, Redirect},
    Form,
};
use std::collections::HashMap;

use crate::{
    api::{ApiError, ApiResult},
    db::{repositories::LegacyRepository, DbConn},
    render,
};
use chirp_types::AddNameForm;

/// GET / - List names from the legacy table
pub async fn index(
    conn: DbConn,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Html<String>> {
    tracing::debug!(?params, "Index requested");

    let names = LegacyRepository::new(&conn).list_names()?;
    Ok(Html(render::index_page(&names)?))
}

/// POST /add - Insert a name into the legacy table
pub async fn add(
    conn: DbConn,
    form: Result<Form<AddNameForm>, FormRejection>,
) -> ApiResult<Redirect> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let id = LegacyRepository::new(&conn).add_name(&form.name)?;
    tracing::info!("Added legacy name {} as row {}", form.name, id);

    Ok(Redirect::to("/"))
}
