use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    error::{Error, PlatformError},
    provider::Permissions,
    types::PermissionState,
};

pub type PermissionCallback = Box<dyn FnOnce(PermissionState) + Send>;

/// Adapts a callback style permission API (`prompt(callback)`) to
/// [`Permissions`].
pub struct CallbackPermissions<Current, Prompt> {
    current: Current,
    prompt: Prompt,
}

impl<Current, Prompt> CallbackPermissions<Current, Prompt>
where
    Current: Fn() -> PermissionState + Send + Sync,
    Prompt: Fn(PermissionCallback) + Send + Sync,
{
    pub fn new(current: Current, prompt: Prompt) -> Self {
        Self { current, prompt }
    }
}

#[async_trait]
impl<Current, Prompt> Permissions for CallbackPermissions<Current, Prompt>
where
    Current: Fn() -> PermissionState + Send + Sync,
    Prompt: Fn(PermissionCallback) + Send + Sync,
{
    fn current_status(&self) -> PermissionState {
        (self.current)()
    }

    async fn prompt_user(&self) -> Result<PermissionState, Error> {
        let (tx, rx) = oneshot::channel();

        (self.prompt)(Box::new(move |state| {
            let _ = tx.send(state);
        }));

        let state = rx.await.map_err(|_| {
            PlatformError::new(
                "AbortError",
                "permission prompt finished without a result",
            )
        })?;

        Ok(state)
    }
}
