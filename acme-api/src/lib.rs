//! acme-api: post procedures over HTTP
//!
//! Four procedures on the `post` router, tRPC wire style:
//! - `GET  /trpc/post.all`                      (public)
//! - `GET  /trpc/post.byId?input={"id":"..."}`  (public)
//! - `POST /trpc/post.create`                   (authenticated)
//! - `POST /trpc/post.delete`                   (authenticated)
//!
//! Successful calls answer `{"result":{"data":...}}`, failures
//! `{"error":{...}}` with a matching HTTP status.

pub mod auth;
pub mod error;
pub mod routes;
pub mod rpc;
pub mod server;

pub use auth::{Authenticated, Authenticator, Principal, StaticTokenAuthenticator};
pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
