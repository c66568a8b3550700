//! HTTP handlers for `/users` and `/posts`.
//!
//! Handlers only coerce and validate: ids come in through [`RecordId`]
//! (integer parse, 400 on failure) and bodies through [`ValidJson`]
//! (declared shape plus presence checks, 400 on failure). Everything else
//! is delegated to the services.

use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::model::{NewPost, NewPostForUser, NewUser, Post, PostPatch, User, UserPatch, Validate};
use crate::service::Removed;
use crate::AppState;

/// An integer id taken from the single path parameter.
pub struct RecordId(pub u64);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// A JSON body that deserialized into `T` and passed `T::validate`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/user/{user_id}",
            get(list_posts_by_user).post(create_post_for_user),
        )
        .method_not_allowed_fallback(no_route)
        .fallback(no_route)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::NoRoute {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

// --- users ---

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.users.read().await.list().to_vec();
    Json(users)
}

async fn get_user(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<User>, ApiError> {
    let user = state.users.read().await.get(id)?.clone();
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.write().await.create(input)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.write().await.update(id, patch)?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Removed>, ApiError> {
    let removed = state.users.write().await.delete(id)?;
    Ok(Json(removed))
}

// --- posts ---

async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    let posts = state.posts.read().await.list().to_vec();
    Json(posts)
}

async fn get_post(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.read().await.get(id)?.clone();
    Ok(Json(post))
}

async fn create_post(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.posts.write().await.create(input)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(patch): ValidJson<PostPatch>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.write().await.update(id, patch)?;
    Ok(Json(post))
}

async fn delete_post(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Removed>, ApiError> {
    let removed = state.posts.write().await.delete(id)?;
    Ok(Json(removed))
}

async fn list_posts_by_user(
    State(state): State<AppState>,
    RecordId(user_id): RecordId,
) -> Json<Vec<Post>> {
    let posts = state.posts.read().await.find_by_user(user_id);
    Json(posts)
}

async fn create_post_for_user(
    State(state): State<AppState>,
    RecordId(user_id): RecordId,
    ValidJson(input): ValidJson<NewPostForUser>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.posts.write().await.create_for_user(user_id, input)?;
    Ok((StatusCode::CREATED, Json(post)))
}
