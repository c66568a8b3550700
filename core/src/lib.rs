//! I/O-free client core for the users and posts API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! cache of each resource as a reducer-driven [`ResourceState`].
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), so the I/O boundary is explicit.
//! - CRUD calls are generic over [`Resource`] (`Users`, `Posts`).
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod resource;
pub mod state;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Posts, Resource, Users};
pub use state::{Action, Identified, ResourceState};
pub use types::{
    Address, Company, Geo, Health, NewPost, NewUser, NewUserPost, Post, PostPatch, Removed, User,
    UserPatch,
};
