//! Presence checks run before a create or edit form is submitted.
//!
//! Forms hold raw user input. `to_new_*` and `to_*_patch` trim it and check
//! the required fields in a fixed order. On create, blank optional fields
//! are left unset; on edit they are sent as empty strings so a cleared
//! field overwrites the stored value.

use crud_core::{Address, Company, NewPost, NewUser, PostPatch, UserPatch};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Username is required.")]
    MissingUsername,

    #[error("Name is required.")]
    MissingName,

    #[error("Please select a user.")]
    MissingAuthor,

    #[error("Title is required.")]
    MissingTitle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl UserForm {
    fn checked(&self) -> Result<(String, String), FormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(FormError::MissingUsername);
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok((name.to_string(), username.to_string()))
    }

    pub fn to_new_user(&self) -> Result<NewUser, FormError> {
        let (name, username) = self.checked()?;
        Ok(NewUser {
            name,
            username,
            email: optional(&self.email),
            address: self.address.clone(),
            phone: optional(&self.phone),
            website: optional(&self.website),
            company: self.company.clone(),
        })
    }

    pub fn to_user_patch(&self) -> Result<UserPatch, FormError> {
        let (name, username) = self.checked()?;
        Ok(UserPatch {
            name: Some(name),
            username: Some(username),
            email: Some(self.email.trim().to_string()),
            address: self.address.clone(),
            phone: Some(self.phone.trim().to_string()),
            website: Some(self.website.trim().to_string()),
            company: self.company.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    /// `None` until an author is picked.
    pub user_id: Option<u64>,
    pub title: String,
    pub body: String,
}

impl PostForm {
    fn checked(&self) -> Result<(u64, String, String), FormError> {
        let user_id = self.user_id.ok_or(FormError::MissingAuthor)?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        Ok((user_id, title.to_string(), self.body.trim().to_string()))
    }

    pub fn to_new_post(&self) -> Result<NewPost, FormError> {
        let (user_id, title, body) = self.checked()?;
        Ok(NewPost {
            user_id,
            title,
            body,
        })
    }

    pub fn to_post_patch(&self) -> Result<PostPatch, FormError> {
        let (user_id, title, body) = self.checked()?;
        Ok(PostPatch {
            user_id: Some(user_id),
            title: Some(title),
            body: Some(body),
        })
    }
}
