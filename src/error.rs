use std::fmt;

use base64::DecodeError as BASE64_DECODE_ERROR;
use reqwest::header::{
    InvalidHeaderName as INVALID_HEADER_NAME,
    InvalidHeaderValue as INVALID_HEADER_VALUE,
};
use reqwest::Error as REQWEST_ERROR;
use serde_json::Error as JSON_ERROR;
use thiserror::Error;
use tokio::task::JoinError;
use url::ParseError as URL_ERROR;

use crate::types::PermissionState;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Service worker is not supported on this browser.")]
    ServiceWorkerNotSupported,

    #[error("Webpush is not supported on this browser.")]
    WebpushNotSupported,

    #[error("applicationServerKey is required")]
    MissingApplicationServerKey,

    #[error("Push notification permission was not granted.\n{0}")]
    PermissionNotGranted(PermissionState),

    #[error("{0}")]
    Platform(PlatformError),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    Base64DecodeError(#[from] BASE64_DECODE_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    InvalidHeaderName(#[from] INVALID_HEADER_NAME),

    #[error("{0}")]
    InvalidHeaderValue(#[from] INVALID_HEADER_VALUE),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("Parse message error: {0}")]
    ParseMessage(String),

    #[error("Task message error: {0}")]
    TaskError(String),

    #[error("Invalid option {option}")]
    InvalidOption { option: String },
}

/// Failure reported by a platform capability (registration, subscribe,
/// prompt, display...). Carried through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub name: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for PlatformError {}

impl From<PlatformError> for Error {
    fn from(error: PlatformError) -> Self {
        Error::Platform(error)
    }
}
