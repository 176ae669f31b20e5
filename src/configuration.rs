use std::{ops::Deref, sync::Arc};

use crate::provider::{Clients, Fetcher, Notifications};

pub const DEFAULT_SERVICE_WORKER_URL: &str = "webpush.service-worker.js";
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Notification Received";

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

/// Capabilities and settings of the worker side handler.
pub struct State {
    pub config: Config,
    pub notifications: Arc<dyn Notifications>,
    pub http: Arc<dyn Fetcher>,
    pub clients: Arc<dyn Clients>,
}

impl State {
    pub fn new(
        config: Config,
        notifications: Arc<dyn Notifications>,
        http: Arc<dyn Fetcher>,
        clients: Arc<dyn Clients>,
    ) -> State {
        Self {
            config,
            notifications,
            http,
            clients,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub default_title: String,
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: String::from(DEFAULT_NOTIFICATION_TITLE),
            timeout: 30,
            user_agent: String::from("webpush"),
        }
    }
}

impl Config {
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
