//! Push notification types
//!
//! Types for push payload handling and notification click dispatch.

use serde::Serialize;
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

use crate::{
    error::Error,
    helpers::{append_query, coerce_to_string, query_pairs, string_map, truthy},
    provider::{Lifetime, Notification},
};

pub const DEFAULT_FETCH_METHOD: &str = "POST";

// =============================================================================
// Events
// =============================================================================

/// Delivered push message.
#[derive(Clone)]
pub struct PushEvent {
    pub data: Option<PushMessageData>,
    pub lifetime: Arc<dyn Lifetime>,
}

impl PushEvent {
    pub fn new(data: Option<PushMessageData>, lifetime: Arc<dyn Lifetime>) -> Self {
        Self { data, lifetime }
    }
}

impl fmt::Debug for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PushEvent").field("data", &self.data).finish()
    }
}

/// Decrypted payload bytes of a push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessageData(Vec<u8>);

impl PushMessageData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn json(&self) -> Result<Value, Error> {
        Ok(serde_json::from_slice(&self.0)?)
    }
}

/// User interaction with a displayed notification.
#[derive(Clone)]
pub struct NotificationClickEvent {
    /// Activated action button; empty when the body was clicked.
    pub action: String,
    pub notification: Arc<dyn Notification>,
    pub lifetime: Arc<dyn Lifetime>,
}

impl NotificationClickEvent {
    pub fn new(
        action: impl Into<String>,
        notification: Arc<dyn Notification>,
        lifetime: Arc<dyn Lifetime>,
    ) -> Self {
        Self {
            action: action.into(),
            notification,
            lifetime,
        }
    }
}

impl fmt::Debug for NotificationClickEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NotificationClickEvent")
            .field("action", &self.action)
            .finish()
    }
}

// =============================================================================
// Notification
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSpec {
    pub title: String,
    pub options: Map<String, Value>,
}

impl NotificationSpec {
    /// Maps a push payload onto a title and display options. Without a
    /// payload the notification carries `default_title` and no options.
    pub fn from_payload(
        data: Option<&PushMessageData>,
        default_title: &str,
    ) -> Result<NotificationSpec, Error> {
        let Some(data) = data else {
            return Ok(NotificationSpec {
                title: default_title.to_owned(),
                options: Map::new(),
            });
        };

        let mut options = match data.json()? {
            Value::Object(map) => map,
            other => {
                return Err(Error::ParseMessage(format!(
                    "push payload must be an object, got {}",
                    other
                )))
            },
        };

        let title = match options.shift_remove("title") {
            // No title in the payload shows the configured default, not "undefined".
            None | Some(Value::Null) => default_title.to_owned(),
            Some(value) => coerce_to_string(&value),
        };

        Ok(NotificationSpec { title, options })
    }
}

// =============================================================================
// Click action
// =============================================================================

/// What to do when a notification is clicked, read from the notification's
/// `data`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClickAction {
    pub fetch: Option<FetchAction>,
    /// Truthy `target_url` as delivered; only a string is usable.
    pub target_url: Option<Value>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchAction {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
}

/// Outbound request handed to [`crate::provider::Fetcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Serialize)]
struct CallbackBody<'a> {
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

impl ClickAction {
    /// `None` when the notification carries no usable data.
    pub fn from_data(data: Option<&Value>) -> Option<ClickAction> {
        let data = data.filter(|value| truthy(value))?;

        let fetch = data
            .get("fetch")
            .filter(|fetch| truthy(fetch))
            .and_then(FetchAction::from_value);

        let target_url = data
            .get("target_url")
            .filter(|url| truthy(url))
            .cloned();

        Some(ClickAction {
            fetch,
            target_url,
            data: data.get("data").cloned(),
        })
    }

    /// Callback request for the clicked `action`, if one is configured.
    pub fn fetch_request(&self, action: &str) -> Result<Option<(String, FetchRequest)>, Error> {
        let Some(fetch) = &self.fetch else {
            return Ok(None);
        };

        let body = serde_json::to_string(&CallbackBody {
            action,
            data: self.data.as_ref(),
        })?;

        Ok(Some((
            fetch.url.to_owned(),
            FetchRequest {
                method: fetch.method.to_owned(),
                headers: fetch.headers.clone(),
                body,
            },
        )))
    }

    /// Window to open for the clicked `action`, with the action and the
    /// nested data fields appended as query parameters. A `target_url` that
    /// is not a string is rejected.
    pub fn window_url(&self, action: &str) -> Result<Option<String>, Error> {
        let target = match &self.target_url {
            None => return Ok(None),
            Some(Value::String(target)) => target,
            Some(other) => {
                return Err(Error::InvalidOption {
                    option: format!("target_url {}", other),
                })
            },
        };

        let pairs = query_pairs(action, self.data.as_ref());
        Ok(Some(append_query(target, &pairs)))
    }
}

impl FetchAction {
    fn from_value(value: &Value) -> Option<FetchAction> {
        let url = value.get("url").filter(|url| truthy(url))?;

        let method = match value.get("method") {
            None | Some(Value::Null) => String::from(DEFAULT_FETCH_METHOD),
            Some(method) => coerce_to_string(method),
        };

        Some(FetchAction {
            url: coerce_to_string(url),
            method,
            headers: string_map(value.get("headers")),
        })
    }
}
