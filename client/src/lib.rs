//! Asynchronous client state for the users and posts API.
//!
//! # Overview
//! [`ResourceStore`] runs the four actions (fetch all, create, update,
//! delete) against the server and folds each result into a cached
//! `ResourceState`. The HTTP round-trip goes through a [`Transport`];
//! [`UreqTransport`] is the production one.
//!
//! # Design
//! - Request building, response parsing and the cache reducer all live in
//!   `crud-core`; this crate adds only I/O and sequencing.
//! - Failures never escape as panics. Each one is stored on the cache as a
//!   readable message and returned to the caller.
//! - [`forms`] and [`view`] carry the checks and labels a UI needs before
//!   dispatching and after reading the cache.

pub mod config;
pub mod forms;
pub mod store;
pub mod transport;
pub mod view;

use crud_core::ApiClient;

pub use config::ClientConfig;
pub use forms::{FormError, PostForm, UserForm};
pub use store::{PostsStore, ResourceStore, UsersStore};
pub use transport::{Transport, UreqTransport};
pub use view::{author_label, AuthorLabel};

/// The stores for both resources, sharing one base URL.
pub struct AppStores<T> {
    pub users: UsersStore<T>,
    pub posts: PostsStore<T>,
}

impl<T: Transport + Clone> AppStores<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        let client = ApiClient::new(&config.base_url);
        Self {
            users: ResourceStore::new(client.clone(), transport.clone()),
            posts: ResourceStore::new(client, transport),
        }
    }
}

impl AppStores<UreqTransport> {
    /// Stores configured from `API_BASE_URL`.
    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env(), UreqTransport::new())
    }
}
