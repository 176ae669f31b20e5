use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::DEFAULT_SERVICE_WORKER_URL, error::Error,
    provider::PushSubscription,
};

// =============================================================================
// Request
// =============================================================================

/// Caller-supplied options for [`crate::SubscriptionNegotiator`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionRequest {
    pub service_worker_url: String,
    pub resubscribe_if_existing: bool,
    pub application_server_key: Option<ApplicationServerKey>,
}

impl Default for SubscriptionRequest {
    fn default() -> Self {
        Self {
            service_worker_url: String::from(DEFAULT_SERVICE_WORKER_URL),
            resubscribe_if_existing: false,
            application_server_key: None,
        }
    }
}

impl SubscriptionRequest {
    pub fn new(application_server_key: impl Into<ApplicationServerKey>) -> Self {
        Self {
            application_server_key: Some(application_server_key.into()),
            ..Self::default()
        }
    }

    pub fn with_service_worker_url(mut self, url: impl Into<String>) -> Self {
        self.service_worker_url = url.into();
        self
    }

    pub fn resubscribe_if_existing(mut self, resubscribe: bool) -> Self {
        self.resubscribe_if_existing = resubscribe;
        self
    }

    /// Key to subscribe with, or `None` when it is absent or empty.
    pub fn key(&self) -> Option<&ApplicationServerKey> {
        self.application_server_key
            .as_ref()
            .filter(|key| !key.is_empty())
    }
}

/// Public key of the application server, as raw bytes or as the
/// base64url text most servers hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicationServerKey {
    Text(String),
    Bytes(Vec<u8>),
}

impl ApplicationServerKey {
    pub fn is_empty(&self) -> bool {
        match self {
            ApplicationServerKey::Text(text) => text.is_empty(),
            ApplicationServerKey::Bytes(bytes) => bytes.is_empty(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        match self {
            ApplicationServerKey::Text(text) => {
                Ok(BASE64_URL.decode(text.trim_end_matches('='))?)
            },
            ApplicationServerKey::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<String> for ApplicationServerKey {
    fn from(value: String) -> Self {
        ApplicationServerKey::Text(value)
    }
}

impl From<&str> for ApplicationServerKey {
    fn from(value: &str) -> Self {
        ApplicationServerKey::Text(value.to_owned())
    }
}

impl From<Vec<u8>> for ApplicationServerKey {
    fn from(value: Vec<u8>) -> Self {
        ApplicationServerKey::Bytes(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeOptions {
    pub user_visible_only: bool,
    pub application_server_key: ApplicationServerKey,
}

impl SubscribeOptions {
    pub fn new(application_server_key: ApplicationServerKey) -> Self {
        Self {
            user_visible_only: true,
            application_server_key,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Plain copy of a platform subscription, safe to hand to the application
/// server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResult {
    pub endpoint: String,
    #[serde(rename = "expirationTime", alias = "expiration_time", default)]
    pub expiration_time: Option<i64>,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

impl SubscriptionResult {
    /// Converts a live platform handle into a detached record.
    pub fn normalize(
        subscription: &dyn PushSubscription,
    ) -> Result<SubscriptionResult, Error> {
        let value = subscription.to_json()?;
        let result = serde_json::from_value(value)?;
        Ok(result)
    }

    pub fn expires_at(&self) -> Result<Option<DateTime<Utc>>, Error> {
        let Some(ms) = self.expiration_time else {
            return Ok(None);
        };

        let at = DateTime::from_timestamp_millis(ms).ok_or_else(|| {
            Error::ParseMessage(format!("Subscription expiration {}", ms))
        })?;

        Ok(Some(at))
    }

    /// Raw `(p256dh, auth)` bytes.
    pub fn decoded_keys(&self) -> Result<(Vec<u8>, Vec<u8>), Error> {
        let p256dh = BASE64_URL.decode(self.keys.p256dh.trim_end_matches('='))?;
        let auth = BASE64_URL.decode(self.keys.auth.trim_end_matches('='))?;
        Ok((p256dh, auth))
    }
}
