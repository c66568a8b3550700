//! In-memory record list with monotonic id allocation.
//!
//! # Design
//! A `RecordStore` is owned by exactly one resource service. It keeps the
//! records in list order and a `next_id` counter that only moves forward,
//! so an id freed by a delete is never handed out again. Once the counter
//! cannot advance, allocation fails instead of wrapping. Seeding from a
//! JSON file is best effort: a missing or malformed file leaves the store
//! empty and logs a warning.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

/// Anything stored in a `RecordStore`.
pub trait Record: Clone + DeserializeOwned {
    fn id(&self) -> u64;
}

/// Where `insert` puts a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    next_id: u64,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial list, keeping its order. Records whose
    /// id repeats an earlier one, or leaves no room for a next id, are dropped.
    pub fn seeded(records: Vec<T>) -> Self {
        let mut store = Self::new();
        for record in records {
            if store.position(record.id()).is_some() {
                warn!(id = record.id(), "dropping seed record with duplicate id");
                continue;
            }
            let Some(after) = record.id().checked_add(1) else {
                warn!(id = record.id(), "dropping seed record with out-of-range id");
                continue;
            };
            store.next_id = store.next_id.max(after);
            store.records.push(record);
        }
        store
    }

    /// Seed from a JSON array on disk, falling back to an empty store.
    pub fn load(path: &Path) -> Self {
        match read_seed(path) {
            Ok(records) => {
                info!(path = %path.display(), count = records.len(), "loaded seed records");
                Self::seeded(records)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not load seed, starting empty");
                Self::new()
            }
        }
    }

    /// Hand out the next id, or `None` once the id space is used up.
    pub fn allocate_id(&mut self) -> Option<u64> {
        let after = self.next_id.checked_add(1)?;
        Some(std::mem::replace(&mut self.next_id, after))
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn insert(&mut self, record: T, placement: Placement) {
        match placement {
            Placement::Front => self.records.insert(0, record),
            Placement::Back => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let idx = self.position(id)?;
        Some(self.records.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn read_seed<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
