//! Stateless HTTP request builder and response parser for the API.
//!
//! # Design
//! `ApiClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller runs the round-trip in
//! between. The CRUD pairs are generic over [`Resource`] and called with a
//! turbofish, e.g. `client.build_list::<Users>()`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::{Posts, Resource};
use crate::types::{Health, NewUserPost, Post, Removed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // --- health ---

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url("/"))
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        parse_json(response, 200)
    }

    // --- generic CRUD ---

    pub fn build_list<R: Resource>(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/{}", R::PATH)))
    }

    pub fn build_get<R: Resource>(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/{}/{id}", R::PATH)))
    }

    pub fn build_create<R: Resource>(&self, input: &R::New) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::with_json(
            HttpMethod::Post,
            self.url(&format!("/{}", R::PATH)),
            to_json(input)?,
        ))
    }

    pub fn build_update<R: Resource>(&self, id: u64, patch: &R::Patch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::with_json(
            HttpMethod::Put,
            self.url(&format!("/{}/{id}", R::PATH)),
            to_json(patch)?,
        ))
    }

    pub fn build_delete<R: Resource>(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Delete, self.url(&format!("/{}/{id}", R::PATH)))
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R::Record>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get<R: Resource>(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create<R: Resource>(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update<R: Resource>(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<Removed, ApiError> {
        parse_json(response, 200)
    }

    // --- posts scoped to a user ---

    pub fn build_list_posts_by_user(&self, user_id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/posts/user/{user_id}")))
    }

    pub fn build_create_post_for_user(
        &self,
        user_id: u64,
        input: &NewUserPost,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::with_json(
            HttpMethod::Post,
            self.url(&format!("/posts/user/{user_id}")),
            to_json(input)?,
        ))
    }

    pub fn parse_list_posts_by_user(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        self.parse_list::<Posts>(response)
    }

    pub fn parse_create_post_for_user(&self, response: HttpResponse) -> Result<Post, ApiError> {
        self.parse_create::<Posts>(response)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound(error_message(&response.body)));
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Pull `message` out of the server's error body, falling back to the raw
/// text when the body is not the usual JSON shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Users;
    use crate::types::{NewPost, PostPatch, UserPatch};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list::<Users>();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_post_produces_correct_request() {
        let req = client().build_get::<Posts>(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts/7");
    }

    #[test]
    fn build_create_post_sends_camel_case_json() {
        let input = NewPost {
            user_id: 2,
            title: "B".to_string(),
            body: "c".to_string(),
        };
        let req = client().build_create::<Posts>(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"userId": 2, "title": "B", "body": "c"}));
    }

    #[test]
    fn build_update_omits_unset_fields() {
        let patch = PostPatch {
            title: Some("X".to_string()),
            ..PostPatch::default()
        };
        let req = client().build_update::<Posts>(1, &patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/posts/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "X"}));
    }

    #[test]
    fn build_update_user_with_empty_patch_sends_empty_object() {
        let req = client().build_update::<Users>(3, &UserPatch::default()).unwrap();
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete::<Users>(9);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/users/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_post_for_user_targets_scoped_path() {
        let input = NewUserPost {
            title: "Mine".to_string(),
            body: String::new(),
        };
        let req = client().build_create_post_for_user(4, &input).unwrap();
        assert_eq!(req.path, "http://localhost:3000/posts/user/4");
        assert_eq!(
            client().build_list_posts_by_user(4).path,
            "http://localhost:3000/posts/user/4"
        );
    }

    #[test]
    fn parse_list_posts_success() {
        let resp = response(200, r#"[{"userId":1,"id":1,"title":"A","body":"b"}]"#);
        let posts = client().parse_list::<Posts>(resp).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, 1);
    }

    #[test]
    fn parse_get_not_found_keeps_server_message() {
        let resp = response(
            404,
            r#"{"statusCode":404,"message":"User 42 not found","error":"Not Found"}"#,
        );
        let err = client().parse_get::<Users>(resp).unwrap_err();
        assert_eq!(err, ApiError::NotFound("User 42 not found".to_string()));
    }

    #[test]
    fn parse_create_expects_201() {
        let resp = response(200, r#"{"userId":1,"id":1,"title":"A","body":""}"#);
        let err = client().parse_create::<Posts>(resp).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 200, .. }));
    }

    #[test]
    fn parse_update_validation_error_is_http_error() {
        let resp = response(400, r#"{"statusCode":400,"message":"title should not be empty"}"#);
        let err = client().parse_update::<Posts>(resp).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
    }

    #[test]
    fn parse_delete_reads_acknowledgement() {
        let removed = client().parse_delete(response(200, r#"{"removed":true}"#)).unwrap();
        assert!(removed.removed);
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list::<Users>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_health_ok() {
        let health = client().parse_health(response(200, r#"{"status":"ok"}"#)).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.build_list::<Posts>().path, "http://localhost:3000/posts");
        assert_eq!(client.build_health().path, "http://localhost:3000/");
    }
}
