//! Records and request shapes for the users and posts resources.
//!
//! # Design
//! Stored records (`User`, `Post`) and the request bodies that create or
//! patch them are separate types. Every request shape carries
//! `deny_unknown_fields`, so a body with an unrecognized key is rejected
//! while it is deserialized, before any service code runs. Presence checks
//! that serde cannot express (non-blank strings) live in [`Validate`].
//!
//! Patches are field-presence merges: a field that is absent (or `null`)
//! leaves the stored value untouched.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

/// A user record as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
}

/// Body of `PUT /users/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
}

impl User {
    pub fn from_new(id: u64, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            address: new.address,
            phone: new.phone,
            website: new.website,
            company: new.company,
        }
    }

    /// Shallow merge: nested `address` and `company` objects are replaced
    /// whole, not merged key by key.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
    }
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A post record as stored and served. `user_id` is not checked against
/// the users resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPost {
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Body of `POST /posts/user/{userId}`. A `userId` in the body is accepted
/// but always replaced by the one in the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPostForUser {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl NewPostForUser {
    pub fn for_user(self, user_id: u64) -> NewPost {
        NewPost {
            user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostPatch {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl Post {
    pub fn from_new(id: u64, new: NewPost) -> Self {
        Self {
            user_id: new.user_id,
            id,
            title: new.title,
            body: new.body,
        }
    }

    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }
}

impl Record for Post {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Presence checks run on a request body after it deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} should not be empty")));
    }
    Ok(())
}

fn require_if_present(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    value.map_or(Ok(()), |v| require(field, v))
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ApiError> {
        require("name", &self.name)?;
        require("username", &self.username)
    }
}

impl Validate for UserPatch {
    fn validate(&self) -> Result<(), ApiError> {
        require_if_present("name", self.name.as_deref())?;
        require_if_present("username", self.username.as_deref())
    }
}

impl Validate for NewPost {
    fn validate(&self) -> Result<(), ApiError> {
        require("title", &self.title)
    }
}

impl Validate for NewPostForUser {
    fn validate(&self) -> Result<(), ApiError> {
        require("title", &self.title)
    }
}

impl Validate for PostPatch {
    fn validate(&self) -> Result<(), ApiError> {
        require_if_present("title", self.title.as_deref())
    }
}
