//! Platform capabilities consumed by the negotiator and the event handler.
//!
//! Browser bindings (or test doubles) implement these; the crate never
//! talks to the platform any other way.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    error::Error,
    types::{FetchRequest, PermissionState, SubscribeOptions},
};

// =============================================================================
// Page context
// =============================================================================

pub trait Navigator: Send + Sync {
    /// `None` when the runtime has no service worker support.
    fn service_worker(&self) -> Option<Arc<dyn ServiceWorkerContainer>>;

    fn push_manager_supported(&self) -> bool;

    fn permissions(&self) -> Arc<dyn Permissions>;
}

#[async_trait]
pub trait ServiceWorkerContainer: Send + Sync {
    async fn register(&self, script_url: &str) -> Result<Arc<dyn Registration>, Error>;
}

#[async_trait]
pub trait Permissions: Send + Sync {
    fn current_status(&self) -> PermissionState;

    /// Shows the permission prompt and resolves with the user's choice.
    async fn prompt_user(&self) -> Result<PermissionState, Error>;
}

/// Push manager of a service worker registration.
#[async_trait]
pub trait Registration: Send + Sync {
    async fn subscribe(
        &self,
        options: &SubscribeOptions,
    ) -> Result<Box<dyn PushSubscription>, Error>;

    async fn get_subscription(&self) -> Result<Option<Box<dyn PushSubscription>>, Error>;
}

/// Live subscription handle.
#[async_trait]
pub trait PushSubscription: Send + Sync {
    /// Serialized form: `{endpoint, expirationTime, keys}`.
    fn to_json(&self) -> Result<Value, Error>;

    async fn unsubscribe(&self) -> Result<bool, Error>;
}

// =============================================================================
// Worker context
// =============================================================================

#[async_trait]
pub trait Notifications: Send + Sync {
    async fn show(&self, title: &str, options: Map<String, Value>) -> Result<(), Error>;
}

pub trait Notification: Send + Sync {
    fn close(&self);

    fn data(&self) -> Option<Value>;
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Sends the request and returns the response status.
    async fn fetch(&self, url: &str, request: FetchRequest) -> Result<u16, Error>;
}

#[async_trait]
pub trait Clients: Send + Sync {
    async fn open_window(&self, url: &str) -> Result<(), Error>;
}

/// Keeps the worker alive until `task` finishes.
pub trait Lifetime: Send + Sync {
    fn wait_until(&self, task: BoxFuture<'static, Result<(), Error>>);
}
