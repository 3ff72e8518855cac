use axum::{
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::ApiResult,
    db::{
        repositories::{FollowRepository, TweetRepository, UserRepository},
        DbConn,
    },
    render,
};
use chirp_types::{CreateTweetQuery, DisplayQuery};

/// Author of the tweet posted by GET /another
pub const DEMO_HANDLE: &str = "vladverba";
const DEMO_TEXT: &str = "vlad's test text";
const DEMO_MEDIA: &str = "vlad's test media";

/// GET /another - Post the hardcoded demo tweet
pub async fn another(conn: DbConn) -> ApiResult<Html<String>> {
    let tweet = TweetRepository::new(&conn).create(DEMO_HANDLE, Some(DEMO_TEXT), Some(DEMO_MEDIA))?;
    tracing::info!(tid = tweet.tid, cid = tweet.cid, "Created demo tweet");

    Ok(Html(render::another_page(DEMO_HANDLE)?))
}

/// GET /create?handle=&text=&media= - Tweet as `handle` if that user exists
///
/// Always redirects home; an unknown or missing handle creates nothing.
pub async fn create(
    conn: DbConn,
    Query(query): Query<CreateTweetQuery>,
) -> ApiResult<Redirect> {
    let home = Redirect::to("/");
    let Some(handle) = query.handle.as_deref() else {
        return Ok(home);
    };

    if !UserRepository::new(&conn).handle_exists(handle)? {
        tracing::debug!("Skipping tweet for unknown handle {}", handle);
        return Ok(home);
    }

    let tweet = TweetRepository::new(&conn).create(
        handle,
        query.text.as_deref(),
        query.media.as_deref(),
    )?;
    tracing::info!(tid = tweet.tid, cid = tweet.cid, "Created tweet for {}", handle);

    Ok(home)
}

/// GET /display?handle= - Tweets of everyone `handle` follows
///
/// Redirects home when the handle is missing or unknown.
pub async fn display(conn: DbConn, Query(query): Query<DisplayQuery>) -> ApiResult<Response> {
    let Some(handle) = query.handle else {
        return Ok(Redirect::to("/").into_response());
    };

    if !UserRepository::new(&conn).handle_exists(&handle)? {
        tracing::debug!("No timeline for unknown handle {}", handle);
        return Ok(Redirect::to("/").into_response());
    }

    let following = FollowRepository::new(&conn).get_users_someone_follows(&handle)?;
    let tweets = TweetRepository::new(&conn).get_tweets_from_users(&following)?;
    tracing::debug!(
        "Timeline for {}: {} tweets from {} followed users",
        handle,
        tweets.len(),
        following.len()
    );

    Ok(Html(render::tweets_page(&handle, &tweets)?).into_response())
}
