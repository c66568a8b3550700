//! Compile-time description of the two API resources.
//!
//! `ApiClient` and the state container are generic over [`Resource`], so
//! every CRUD operation is written once and used for both users and posts.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::Identified;
use crate::types::{NewPost, NewUser, Post, PostPatch, User, UserPatch};

pub trait Resource {
    /// Collection path segment, e.g. "users".
    const PATH: &'static str;
    /// Singular noun used in messages, e.g. "user".
    const SINGULAR: &'static str;

    type Record: Identified + Clone + DeserializeOwned + Send + 'static;
    type New: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;
}

#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "users";
    const SINGULAR: &'static str = "user";

    type Record = User;
    type New = NewUser;
    type Patch = UserPatch;
}

#[derive(Debug, Clone, Copy)]
pub struct Posts;

impl Resource for Posts {
    const PATH: &'static str = "posts";
    const SINGULAR: &'static str = "post";

    type Record = Post;
    type New = NewPost;
    type Patch = PostPatch;
}
