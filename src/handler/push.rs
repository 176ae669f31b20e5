use tracing::debug;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::{NotificationSpec, PushEvent},
};

pub async fn on_push(app_state: AppState<State>, event: PushEvent) -> Result<(), Error> {
    let spec = NotificationSpec::from_payload(
        event.data.as_ref(),
        &app_state.config.default_title,
    )?;

    debug!("Showing push notification {}", spec.title);

    let notifications = app_state.notifications.clone();
    event.lifetime.wait_until(Box::pin(async move {
        notifications.show(&spec.title, spec.options).await
    }));

    Ok(())
}
