use tracing::debug;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::{ClickAction, NotificationClickEvent},
};

/// Closes the notification, fires the configured callback request and
/// opens the target window.
pub async fn on_click(
    app_state: AppState<State>,
    event: NotificationClickEvent,
) -> Result<(), Error> {
    event.notification.close();

    let data = event.notification.data();
    let Some(action) = ClickAction::from_data(data.as_ref()) else {
        return Ok(());
    };

    if let Some((url, request)) = action.fetch_request(&event.action)? {
        let status = app_state.http.fetch(&url, request).await?;
        debug!("Notification callback {} answered {}", url, status);
    }

    if let Some(url) = action.window_url(&event.action)? {
        let clients = app_state.clients.clone();
        event
            .lifetime
            .wait_until(Box::pin(async move { clients.open_window(&url).await }));
    }

    Ok(())
}
