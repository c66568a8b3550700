//! Client-side cache of one resource's records.
//!
//! # Design
//! `ResourceState` is a plain value changed only by [`ResourceState::reduce`].
//! Each asynchronous operation (fetch, create, update, delete) reports its
//! progress as [`Action`]s: a pending phase when it starts, then exactly one
//! of fulfilled or rejected when it settles. The cache is never written
//! before the server answers, so a rejection needs no rollback.
//!
//! Actions are applied in the order they are dispatched. Two overlapping
//! fetches both write the list; whichever settles last wins.

/// A record with an integer id the cache can match on.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Fallback message for a failed fetch that carried no message.
pub const DEFAULT_ERROR: &str = "Error";

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub records: Vec<T>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            is_loading: false,
            last_error: None,
        }
    }
}

/// One phase of one asynchronous operation, or a direct replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    FetchPending,
    FetchFulfilled(Vec<T>),
    FetchRejected(String),
    CreatePending,
    CreateFulfilled(T),
    CreateRejected(String),
    UpdatePending,
    UpdateFulfilled(T),
    UpdateRejected(String),
    DeletePending,
    DeleteFulfilled(u64),
    DeleteRejected(String),
    /// Overwrite the cached list without touching the flags.
    Replace(Vec<T>),
}

impl<T: Identified> ResourceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, action: Action<T>) {
        match action {
            Action::FetchPending => {
                self.is_loading = true;
                self.last_error = None;
            }
            Action::FetchFulfilled(records) => {
                self.is_loading = false;
                self.records = records;
            }
            Action::FetchRejected(message) => {
                self.is_loading = false;
                self.last_error = Some(if message.is_empty() {
                    DEFAULT_ERROR.to_string()
                } else {
                    message
                });
            }
            Action::CreatePending | Action::UpdatePending | Action::DeletePending => {}
            Action::CreateFulfilled(record) => {
                self.records.insert(0, record);
            }
            Action::UpdateFulfilled(record) => {
                // A record missing from the cache means the cache is stale; skip.
                if let Some(slot) = self.records.iter_mut().find(|r| r.id() == record.id()) {
                    *slot = record;
                }
            }
            Action::DeleteFulfilled(id) => {
                self.records.retain(|r| r.id() != id);
            }
            Action::CreateRejected(message)
            | Action::UpdateRejected(message)
            | Action::DeleteRejected(message) => {
                if !message.is_empty() {
                    self.last_error = Some(message);
                }
            }
            Action::Replace(records) => {
                self.records = records;
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }
}
