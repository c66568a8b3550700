//! Asynchronous actions that keep a `ResourceState` in step with the server.
//!
//! # Design
//! A `ResourceStore` owns one resource's cache. Every action follows the
//! same three steps: dispatch the pending phase, run the HTTP round-trip
//! with the cache unlocked, then dispatch fulfilled or rejected. The lock
//! is never held across the network call, so actions on the same store can
//! overlap. Results are applied in the order they settle; for two
//! overlapping fetches the one that settles last wins. That is accepted
//! behavior, not a race to guard against.
//!
//! Callers never mutate the cache directly; they read it via
//! [`ResourceStore::snapshot`].

use std::marker::PhantomData;

use crud_core::{
    Action, ApiClient, ApiError, HttpRequest, HttpResponse, Posts, Resource, ResourceState, Users,
};
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use crate::transport::Transport;

pub struct ResourceStore<R: Resource, T> {
    client: ApiClient,
    transport: T,
    state: Mutex<ResourceState<R::Record>>,
    _resource: PhantomData<R>,
}

pub type UsersStore<T> = ResourceStore<Users, T>;
pub type PostsStore<T> = ResourceStore<Posts, T>;

impl<R: Resource, T: Transport> ResourceStore<R, T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: Mutex::new(ResourceState::default()),
            _resource: PhantomData,
        }
    }

    /// A copy of the current cache.
    pub async fn snapshot(&self) -> ResourceState<R::Record> {
        self.state.lock().await.clone()
    }

    /// Apply one action to the cache.
    pub async fn dispatch(&self, action: Action<R::Record>) {
        self.state.lock().await.reduce(action);
    }

    async fn round_trip(&self, request: Result<HttpRequest, ApiError>) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request?).await
    }

    /// Replace the cache with the server's full list.
    #[instrument(skip_all, fields(resource = R::PATH))]
    pub async fn fetch_all(&self) -> Result<Vec<R::Record>, ApiError> {
        self.dispatch(Action::FetchPending).await;
        let result = self
            .round_trip(Ok(self.client.build_list::<R>()))
            .await
            .and_then(|response| self.client.parse_list::<R>(response));
        match result {
            Ok(records) => {
                self.dispatch(Action::FetchFulfilled(records.clone())).await;
                Ok(records)
            }
            Err(err) => {
                let message = failure::<R>("fetch", R::PATH, &err);
                self.dispatch(Action::FetchRejected(message)).await;
                Err(err)
            }
        }
    }

    /// Create a record; on success it goes to the front of the cache.
    #[instrument(skip_all, fields(resource = R::PATH))]
    pub async fn create(&self, input: &R::New) -> Result<R::Record, ApiError> {
        self.dispatch(Action::CreatePending).await;
        let result = self
            .round_trip(self.client.build_create::<R>(input))
            .await
            .and_then(|response| self.client.parse_create::<R>(response));
        match result {
            Ok(record) => {
                self.dispatch(Action::CreateFulfilled(record.clone())).await;
                Ok(record)
            }
            Err(err) => {
                let message = failure::<R>("create", R::SINGULAR, &err);
                self.dispatch(Action::CreateRejected(message)).await;
                Err(err)
            }
        }
    }

    /// Patch a record; on success the cached copy is replaced if present.
    #[instrument(skip_all, fields(resource = R::PATH, id = id))]
    pub async fn update(&self, id: u64, patch: &R::Patch) -> Result<R::Record, ApiError> {
        self.dispatch(Action::UpdatePending).await;
        let result = self
            .round_trip(self.client.build_update::<R>(id, patch))
            .await
            .and_then(|response| self.client.parse_update::<R>(response));
        match result {
            Ok(record) => {
                self.dispatch(Action::UpdateFulfilled(record.clone())).await;
                Ok(record)
            }
            Err(err) => {
                let message = failure::<R>("update", R::SINGULAR, &err);
                self.dispatch(Action::UpdateRejected(message)).await;
                Err(err)
            }
        }
    }

    /// Delete a record; on success it is dropped from the cache.
    #[instrument(skip_all, fields(resource = R::PATH, id = id))]
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.dispatch(Action::DeletePending).await;
        let result = self
            .round_trip(Ok(self.client.build_delete::<R>(id)))
            .await
            .and_then(|response| self.client.parse_delete(response));
        match result {
            Ok(_) => {
                self.dispatch(Action::DeleteFulfilled(id)).await;
                Ok(())
            }
            Err(err) => {
                let message = failure::<R>("delete", R::SINGULAR, &err);
                self.dispatch(Action::DeleteRejected(message)).await;
                Err(err)
            }
        }
    }
}

fn failure<R: Resource>(verb: &str, noun: &str, err: &ApiError) -> String {
    warn!(resource = R::PATH, error = %err, "{verb} failed");
    format!("Failed to {verb} {noun}: {err}")
}
