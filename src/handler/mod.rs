//! Worker side reactions to push delivery and notification clicks.

use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::{NotificationClickEvent, PushEvent},
};

pub mod notification_click;
pub mod push;

/// Entry point the worker binding forwards `push` and `notificationclick`
/// events to.
#[derive(Clone)]
pub struct PushEventHandler {
    app_state: AppState<State>,
}

impl PushEventHandler {
    pub fn new(state: State) -> Self {
        Self {
            app_state: AppState::new(state),
        }
    }

    pub async fn on_push(&self, event: PushEvent) -> Result<(), Error> {
        let result = push::on_push(self.app_state.clone(), event).await;
        if let Err(e) = &result {
            error!("Push event failed: {}", e);
        }
        result
    }

    pub async fn on_notification_click(
        &self,
        event: NotificationClickEvent,
    ) -> Result<(), Error> {
        let result =
            notification_click::on_click(self.app_state.clone(), event).await;
        if let Err(e) = &result {
            error!("Notification click failed: {}", e);
        }
        result
    }
}
