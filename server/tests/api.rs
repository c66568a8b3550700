use axum::http::{self, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use crud_server::{app, with_middleware, AppState, Post, PostsService, ServerConfig, User, UsersService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Every call builds a fresh router over the same shared state, so
/// mutations persist between requests within one test.
async fn send(state: &AppState, request: Request<String>) -> axum::response::Response {
    app(state.clone()).oneshot(request).await.unwrap()
}

fn seeded_state() -> AppState {
    let users: Vec<User> = serde_json::from_value(json!([
        {"id": 1, "name": "Leanne Graham", "username": "Bret"},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette"}
    ]))
    .unwrap();
    let posts: Vec<Post> =
        serde_json::from_value(json!([{"id": 1, "title": "A", "userId": 1, "body": "b"}])).unwrap();
    AppState::new(UsersService::seeded(users), PostsService::seeded(posts))
}

// --- health ---

#[tokio::test]
async fn health_returns_ok() {
    let state = AppState::default();
    let resp = send(&state, empty_request("GET", "/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"status": "ok"}));
}

// --- posts ---

#[tokio::test]
async fn create_post_prepends_and_allocates_next_id() {
    let state = seeded_state();

    let resp = send(
        &state,
        json_request("POST", "/posts", r#"{"userId":2,"title":"B","body":"c"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created, json!({"id": 2, "userId": 2, "title": "B", "body": "c"}));

    let resp = send(&state, empty_request("GET", "/posts")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn create_post_unknown_field_returns_400() {
    let state = seeded_state();
    let resp = send(
        &state,
        json_request("POST", "/posts", r#"{"userId":1,"title":"T","tags":["x"]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.posts.read().await.len(), 1);
}

#[tokio::test]
async fn create_post_blank_title_returns_400() {
    let state = seeded_state();
    let resp = send(
        &state,
        json_request("POST", "/posts", r#"{"userId":1,"title":"  "}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "title should not be empty");
}

#[tokio::test]
async fn create_post_missing_title_returns_400() {
    let state = seeded_state();
    let resp = send(&state, json_request("POST", "/posts", r#"{"userId":1}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_post_non_numeric_id_returns_400() {
    let state = seeded_state();
    let resp = send(&state, empty_request("GET", "/posts/abc")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Validation failed (numeric string is expected)");
}

#[tokio::test]
async fn get_post_not_found_names_resource() {
    let state = seeded_state();
    let resp = send(&state, empty_request("GET", "/posts/42")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"statusCode": 404, "message": "Post 42 not found", "error": "Not Found"})
    );
}

#[tokio::test]
async fn update_post_title_only_keeps_other_fields() {
    let state = seeded_state();
    let resp = send(&state, json_request("PUT", "/posts/1", r#"{"title":"X"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Post = body_json(resp).await;
    assert_eq!(updated.title, "X");
    assert_eq!(updated.body, "b");
    assert_eq!(updated.user_id, 1);
}

#[tokio::test]
async fn update_post_rejects_id_in_body() {
    let state = seeded_state();
    let resp = send(&state, json_request("PUT", "/posts/1", r#"{"id":5}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_post_for_user_uses_path_user_id() {
    let state = seeded_state();
    let resp = send(
        &state,
        json_request("POST", "/posts/user/7", r#"{"title":"Mine","userId":1}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = body_json(resp).await;
    assert_eq!(created.user_id, 7);
    assert_eq!(created.body, "");

    let resp = send(&state, empty_request("GET", "/posts/user/7")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts, vec![created]);
}

#[tokio::test]
async fn list_posts_by_user_without_posts_is_empty() {
    let state = seeded_state();
    let resp = send(&state, empty_request("GET", "/posts/user/2")).await;
    let posts: Vec<Post> = body_json(resp).await;
    assert!(posts.is_empty());
}

// --- users ---

#[tokio::test]
async fn delete_missing_user_returns_404_and_keeps_list() {
    let state = seeded_state();
    let resp = send(&state, empty_request("DELETE", "/users/999")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "User 999 not found");
    assert_eq!(state.users.read().await.len(), 2);
}

#[tokio::test]
async fn create_user_requires_username() {
    let state = AppState::default();
    let resp = send(&state, json_request("POST", "/users", r#"{"name":"Ada"}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_user_leaves_posts_orphaned() {
    let state = seeded_state();
    let resp = send(&state, empty_request("DELETE", "/users/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&state, empty_request("GET", "/posts/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.user_id, 1);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let state = AppState::default();
    let resp = send(&state, empty_request("GET", "/comments")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Cannot GET /comments");
}

#[tokio::test]
async fn wrong_method_on_known_path_returns_json_404() {
    let state = seeded_state();
    let resp = send(&state, json_request("PATCH", "/posts/1", r#"{"title":"X"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"statusCode": 404, "message": "Cannot PATCH /posts/1", "error": "Not Found"})
    );
    assert_eq!(state.posts.read().await.get(1).unwrap().title, "A");
}

async fn explode() -> &'static str {
    panic!("handler blew up")
}

#[tokio::test]
async fn panicking_handler_returns_json_500() {
    let router = with_middleware(Router::new().route("/explode", get(explode)));
    let resp = router.oneshot(empty_request("GET", "/explode")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"statusCode": 500, "message": "Internal server error", "error": "Internal Server Error"})
    );
}

// --- seed loading ---

#[tokio::test]
async fn state_loads_seed_files_and_tolerates_missing_ones() {
    let dir = tempfile::tempdir().unwrap();
    let users_seed = dir.path().join("users.json");
    std::fs::write(
        &users_seed,
        r#"[{"id":5,"name":"Kurtis Weissnat","username":"Elwyn.Skiles"}]"#,
    )
    .unwrap();
    let config = ServerConfig {
        users_seed,
        posts_seed: dir.path().join("missing.json"),
        ..ServerConfig::default()
    };

    let state = AppState::load(&config);
    let resp = send(&state, empty_request("GET", "/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 1);
    assert!(state.posts.read().await.is_empty());

    let resp = send(
        &state,
        json_request("POST", "/users", r#"{"name":"Nicholas","username":"Maxime_Nienow"}"#),
    )
    .await;
    let created: User = body_json(resp).await;
    assert_eq!(created.id, 6);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn user_crud_lifecycle() {
    let state = AppState::default();

    // create
    let resp = send(
        &state,
        json_request(
            "POST",
            "/users",
            r#"{"name":"Chelsey Dietrich","username":"Kamren","address":{"city":"Roscoeview","geo":{"lat":"24.8918"}}}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    assert_eq!(created.id, 1);
    let id = created.id;

    // get returns the same record
    let resp = send(&state, empty_request("GET", &format!("/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched, created);

    // partial update
    let resp = send(
        &state,
        json_request("PUT", &format!("/users/{id}"), r#"{"email":"Lucio_Hettinger@annie.ca"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.username, "Kamren");
    assert_eq!(updated.email.as_deref(), Some("Lucio_Hettinger@annie.ca"));
    assert_eq!(updated.address, created.address);

    // delete
    let resp = send(&state, empty_request("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"removed": true}));

    // second delete is not found
    let resp = send(&state, empty_request("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list is empty again, and the id is not reused
    let resp = send(&state, empty_request("GET", "/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());

    let resp = send(
        &state,
        json_request("POST", "/users", r#"{"name":"Dennis Schulist","username":"Leopoldo_Corkery"}"#),
    )
    .await;
    let next: User = body_json(resp).await;
    assert_eq!(next.id, 2);
}
