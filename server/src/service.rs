//! CRUD services over a `RecordStore`.
//!
//! # Design
//! `ResourceService<R>` is written once and instantiated per resource.
//! The [`Resource`] trait supplies what differs between users and posts:
//! the record and request types, the name used in not-found messages, and
//! where a newly created record goes in the list.

use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{NewPost, NewPostForUser, NewUser, Post, PostPatch, User, UserPatch};
use crate::store::{Placement, Record, RecordStore};

/// Per-resource types and hooks for `ResourceService`.
pub trait Resource {
    /// Capitalized name used in error messages, e.g. "User".
    const NAME: &'static str;
    const PLACEMENT: Placement;

    type Record: Record + Serialize;
    type New;
    type Patch;

    fn build(id: u64, new: Self::New) -> Self::Record;
    fn merge(record: &mut Self::Record, patch: Self::Patch);
}

pub struct Users;

impl Resource for Users {
    const NAME: &'static str = "User";
    const PLACEMENT: Placement = Placement::Back;

    type Record = User;
    type New = NewUser;
    type Patch = UserPatch;

    fn build(id: u64, new: NewUser) -> User {
        User::from_new(id, new)
    }

    fn merge(record: &mut User, patch: UserPatch) {
        record.apply(patch);
    }
}

pub struct Posts;

impl Resource for Posts {
    const NAME: &'static str = "Post";
    const PLACEMENT: Placement = Placement::Front;

    type Record = Post;
    type New = NewPost;
    type Patch = PostPatch;

    fn build(id: u64, new: NewPost) -> Post {
        Post::from_new(id, new)
    }

    fn merge(record: &mut Post, patch: PostPatch) {
        record.apply(patch);
    }
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Removed {
    pub removed: bool,
}

pub struct ResourceService<R: Resource> {
    store: RecordStore<R::Record>,
}

pub type UsersService = ResourceService<Users>;
pub type PostsService = ResourceService<Posts>;

impl<R: Resource> Default for ResourceService<R> {
    fn default() -> Self {
        Self::new(RecordStore::new())
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: RecordStore<R::Record>) -> Self {
        Self { store }
    }

    pub fn seeded(records: Vec<R::Record>) -> Self {
        Self::new(RecordStore::seeded(records))
    }

    pub fn load(path: &Path) -> Self {
        Self::new(RecordStore::load(path))
    }

    pub fn list(&self) -> &[R::Record] {
        self.store.records()
    }

    pub fn get(&self, id: u64) -> Result<&R::Record, ApiError> {
        self.store.get(id).ok_or_else(|| not_found::<R>(id))
    }

    pub fn create(&mut self, new: R::New) -> Result<R::Record, ApiError> {
        let id = self.store.allocate_id().ok_or_else(|| {
            ApiError::Internal(format!("No {} ids left to allocate", R::NAME))
        })?;
        let record = R::build(id, new);
        self.store.insert(record.clone(), R::PLACEMENT);
        debug!(resource = R::NAME, id, "created");
        Ok(record)
    }

    pub fn update(&mut self, id: u64, patch: R::Patch) -> Result<R::Record, ApiError> {
        let record = self.store.get_mut(id).ok_or_else(|| not_found::<R>(id))?;
        R::merge(record, patch);
        debug!(resource = R::NAME, id, "updated");
        Ok(record.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Removed, ApiError> {
        self.store.remove(id).ok_or_else(|| not_found::<R>(id))?;
        debug!(resource = R::NAME, id, "deleted");
        Ok(Removed { removed: true })
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl ResourceService<Posts> {
    pub fn find_by_user(&self, user_id: u64) -> Vec<Post> {
        self.list()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn create_for_user(&mut self, user_id: u64, input: NewPostForUser) -> Result<Post, ApiError> {
        self.create(input.for_user(user_id))
    }
}

fn not_found<R: Resource>(id: u64) -> ApiError {
    ApiError::NotFound {
        resource: R::NAME,
        id,
    }
}
