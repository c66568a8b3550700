//! In-memory users and posts REST service.
//!
//! # Overview
//! Two resources, users and posts, each kept in a [`RecordStore`] owned by
//! a [`ResourceService`] and served over HTTP/JSON by an axum [`Router`].
//! Nothing is persisted: each store is seeded once from a JSON file at
//! startup and lives for the life of the process.
//!
//! # Design
//! - Each service sits behind its own `RwLock` in [`AppState`]. Writers on
//!   one resource never block readers of the other.
//! - Request bodies are typed shapes with a closed field set; unknown
//!   fields are a 400 before any service code runs.
//! - Posts reference users by id only. Deleting a user does not touch its
//!   posts, and posts may be created for ids that no user has.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use model::{Address, Company, Geo, NewPost, NewPostForUser, NewUser, Post, PostPatch, User, UserPatch};
pub use service::{PostsService, Removed, ResourceService, UsersService};
pub use store::RecordStore;

#[derive(Clone, Default)]
pub struct AppState {
    pub users: Arc<RwLock<UsersService>>,
    pub posts: Arc<RwLock<PostsService>>,
}

impl AppState {
    pub fn new(users: UsersService, posts: PostsService) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    /// Seed both services from the files named in `config`. Missing or
    /// malformed files leave that resource empty.
    pub fn load(config: &ServerConfig) -> Self {
        Self::new(
            UsersService::load(&config.users_seed),
            PostsService::load(&config.posts_seed),
        )
    }
}

pub fn app(state: AppState) -> Router {
    with_middleware(routes::router()).with_state(state)
}

/// Wrap `router` in the panic, CORS and trace layers every route runs under.
pub fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("Internal server error".to_string()).into_response()
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
