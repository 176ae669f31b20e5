//! Page side subscription handshake.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    provider::{Navigator, Permissions, Registration, ServiceWorkerContainer},
    types::{
        ApplicationServerKey, PermissionState, SubscribeOptions,
        SubscriptionRequest, SubscriptionResult,
    },
};

pub struct SubscriptionNegotiator {
    navigator: Arc<dyn Navigator>,
}

impl SubscriptionNegotiator {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Registers the worker script and returns a push subscription, asking
    /// the user for permission when it has not been granted yet.
    pub async fn request_permission(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionResult, Error> {
        let container = self
            .navigator
            .service_worker()
            .ok_or(Error::ServiceWorkerNotSupported)?;

        if !self.navigator.push_manager_supported() {
            return Err(Error::WebpushNotSupported);
        }

        let key = request
            .key()
            .cloned()
            .ok_or(Error::MissingApplicationServerKey)?;

        let permissions = self.navigator.permissions();
        let status = permissions.current_status();
        debug!("Notification permission is {}", status);

        if status.is_granted() {
            let registration = container.register(&request.service_worker_url).await?;
            subscribe(registration.as_ref(), key).await
        } else {
            register_then_prompt(container.as_ref(), permissions.as_ref(), request, key).await
        }
    }
}

async fn register_then_prompt(
    container: &dyn ServiceWorkerContainer,
    permissions: &dyn Permissions,
    request: &SubscriptionRequest,
    key: ApplicationServerKey,
) -> Result<SubscriptionResult, Error> {
    let registration = container.register(&request.service_worker_url).await?;

    if let Some(existing) = registration.get_subscription().await? {
        if !request.resubscribe_if_existing {
            debug!("Reusing existing push subscription");
            return SubscriptionResult::normalize(existing.as_ref());
        }

        match existing.unsubscribe().await {
            Ok(true) => debug!("Existing push subscription removed"),
            Ok(false) => warn!("Existing push subscription was not removed"),
            Err(e) => warn!("Unsubscribe failed, subscribing anyway: {}", e),
        }
    }

    let state = permissions.prompt_user().await?;
    if state != PermissionState::Granted {
        return Err(Error::PermissionNotGranted(state));
    }

    subscribe(registration.as_ref(), key).await
}

async fn subscribe(
    registration: &dyn Registration,
    key: ApplicationServerKey,
) -> Result<SubscriptionResult, Error> {
    let options = SubscribeOptions::new(key);
    let subscription = registration.subscribe(&options).await?;
    let result = SubscriptionResult::normalize(subscription.as_ref())?;

    info!("Push subscription created for {}", result.endpoint);

    Ok(result)
}
