//! Display helpers for cached records.

use std::fmt;

use crud_core::{Post, User};

/// Who to show as a post's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorLabel {
    User(String),
    /// The post's `userId` matches no cached user.
    Deleted,
}

impl fmt::Display for AuthorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorLabel::User(username) => f.write_str(username),
            AuthorLabel::Deleted => f.write_str("Deleted user"),
        }
    }
}

pub fn author_label(post: &Post, users: &[User]) -> AuthorLabel {
    users
        .iter()
        .find(|u| u.id == post.user_id)
        .map_or(AuthorLabel::Deleted, |u| AuthorLabel::User(u.username.clone()))
}

/// Posts whose author is no longer among `users`.
pub fn orphaned_posts<'a>(posts: &'a [Post], users: &[User]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| author_label(p, users) == AuthorLabel::Deleted)
        .collect()
}
