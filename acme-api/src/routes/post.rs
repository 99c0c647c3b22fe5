//! `post` procedures
//!
//! | procedure     | kind     | access        |
//! |---------------|----------|---------------|
//! | `post.all`    | query    | public        |
//! | `post.byId`   | query    | public        |
//! | `post.create` | mutation | authenticated |
//! | `post.delete` | mutation | authenticated |
//!
//! Queries answer `GET ?input=`; `post.byId` also takes a `POST` body.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

use acme_db::client::{DeleteOutcome, InsertOutcome};
use acme_db::schema::{CreatePostSchema, DeleteInput, Post, PostIdInput};

use crate::auth::Authenticated;
use crate::error::ApiError;
use crate::rpc::{RpcInput, RpcOutput};
use crate::server::AppState;

/// Fixed page size for `post.all`
pub const PAGE_SIZE: u32 = 10;

/// post.all - newest posts first
async fn all(State(state): State<Arc<AppState>>) -> Result<RpcOutput<Vec<Post>>, ApiError> {
    let posts = state.posts.find_many(PAGE_SIZE).await?;
    Ok(RpcOutput(posts))
}

/// post.byId - a missing post is `null`, not an error
async fn by_id(
    State(state): State<Arc<AppState>>,
    RpcInput(input): RpcInput<PostIdInput>,
) -> Result<RpcOutput<Option<Post>>, ApiError> {
    let id = input.parse()?;
    let post = state.posts.find_first(id).await?;
    Ok(RpcOutput(post))
}

/// post.create
async fn create(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    RpcInput(input): RpcInput<CreatePostSchema>,
) -> Result<RpcOutput<InsertOutcome>, ApiError> {
    let post = input.validate()?;
    let outcome = state.posts.insert(post).await?;

    tracing::info!(id = %outcome.id, by = auth.subject(), "post created");
    Ok(RpcOutput(outcome))
}

/// post.delete - deleting a missing post affects zero rows
async fn delete(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    RpcInput(input): RpcInput<DeleteInput>,
) -> Result<RpcOutput<DeleteOutcome>, ApiError> {
    let id = input.parse()?;
    let outcome = state.posts.delete(id).await?;

    tracing::info!(%id, rows = outcome.row_count, by = auth.subject(), "post deleted");
    Ok(RpcOutput(outcome))
}

/// Post procedures
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trpc/post.all", get(all))
        .route("/trpc/post.byId", get(by_id).post(by_id))
        .route("/trpc/post.create", post(create))
        .route("/trpc/post.delete", post(delete))
}
