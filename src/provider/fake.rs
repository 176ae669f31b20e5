//! Recording in-memory capabilities for tests.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use crate::{
    error::{Error, PlatformError},
    provider::{
        Clients, Fetcher, Navigator, Notification, Notifications, Permissions,
        PushSubscription, Registration, ServiceWorkerContainer,
    },
    types::{FetchRequest, PermissionState, SubscribeOptions},
};

/// Ordered log of platform calls shared by the fakes of one test.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }
}

// =============================================================================
// Page context
// =============================================================================

pub struct FakeNavigator {
    pub container: Option<Arc<FakeContainer>>,
    pub push_supported: bool,
    pub permissions: Arc<FakePermissions>,
}

impl FakeNavigator {
    pub fn new(journal: &Journal, current: PermissionState, answer: PermissionState) -> Self {
        Self {
            container: Some(Arc::new(FakeContainer::new(journal))),
            push_supported: true,
            permissions: Arc::new(FakePermissions {
                current,
                answer,
                journal: journal.clone(),
            }),
        }
    }

    pub fn registration(&self) -> Arc<FakeRegistration> {
        match &self.container {
            Some(container) => container.registration.clone(),
            None => panic!("navigator has no service worker container"),
        }
    }

    pub fn container(&self) -> Arc<FakeContainer> {
        self.container.clone().unwrap()
    }
}

impl Navigator for FakeNavigator {
    fn service_worker(&self) -> Option<Arc<dyn ServiceWorkerContainer>> {
        self.container
            .clone()
            .map(|container| container as Arc<dyn ServiceWorkerContainer>)
    }

    fn push_manager_supported(&self) -> bool {
        self.push_supported
    }

    fn permissions(&self) -> Arc<dyn Permissions> {
        self.permissions.clone()
    }
}

pub struct FakeContainer {
    pub registration: Arc<FakeRegistration>,
    pub register_error: Mutex<Option<PlatformError>>,
    journal: Journal,
}

impl FakeContainer {
    fn new(journal: &Journal) -> Self {
        Self {
            registration: Arc::new(FakeRegistration {
                existing: Mutex::new(None),
                subscribe_error: Mutex::new(None),
                get_error: Mutex::new(None),
                subscribed_with: Mutex::new(vec![]),
                journal: journal.clone(),
            }),
            register_error: Mutex::new(None),
            journal: journal.clone(),
        }
    }

    pub fn fail_register(&self, error: PlatformError) {
        *self.register_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl ServiceWorkerContainer for FakeContainer {
    async fn register(&self, script_url: &str) -> Result<Arc<dyn Registration>, Error> {
        self.journal.record(format!("register {}", script_url));
        if let Some(error) = self.register_error.lock().unwrap().clone() {
            return Err(error.into());
        }
        Ok(self.registration.clone())
    }
}

pub struct FakePermissions {
    pub current: PermissionState,
    pub answer: PermissionState,
    journal: Journal,
}

#[async_trait]
impl Permissions for FakePermissions {
    fn current_status(&self) -> PermissionState {
        self.current
    }

    async fn prompt_user(&self) -> Result<PermissionState, Error> {
        self.journal.record("prompt");
        Ok(self.answer)
    }
}

pub struct FakeRegistration {
    pub existing: Mutex<Option<FakeSubscription>>,
    pub subscribe_error: Mutex<Option<PlatformError>>,
    pub get_error: Mutex<Option<PlatformError>>,
    pub subscribed_with: Mutex<Vec<SubscribeOptions>>,
    journal: Journal,
}

impl FakeRegistration {
    pub fn set_existing(&self, subscription: FakeSubscription) {
        *self.existing.lock().unwrap() = Some(subscription);
    }

    pub fn fail_subscribe(&self, error: PlatformError) {
        *self.subscribe_error.lock().unwrap() = Some(error);
    }

    pub fn fail_get_subscription(&self, error: PlatformError) {
        *self.get_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl Registration for FakeRegistration {
    async fn subscribe(
        &self,
        options: &SubscribeOptions,
    ) -> Result<Box<dyn PushSubscription>, Error> {
        self.journal.record("subscribe");
        self.subscribed_with.lock().unwrap().push(options.clone());
        if let Some(error) = self.subscribe_error.lock().unwrap().clone() {
            return Err(error.into());
        }
        Ok(Box::new(FakeSubscription::new("https://push.example/fresh")))
    }

    async fn get_subscription(&self) -> Result<Option<Box<dyn PushSubscription>>, Error> {
        self.journal.record("get_subscription");
        if let Some(error) = self.get_error.lock().unwrap().clone() {
            return Err(error.into());
        }
        let existing = self.existing.lock().unwrap().clone();
        Ok(existing.map(|subscription| {
            Box::new(subscription.with_journal(&self.journal)) as Box<dyn PushSubscription>
        }))
    }
}

#[derive(Clone)]
pub struct FakeSubscription {
    pub endpoint: String,
    pub unsubscribe_outcome: Result<bool, PlatformError>,
    journal: Option<Journal>,
}

impl FakeSubscription {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            unsubscribe_outcome: Ok(true),
            journal: None,
        }
    }

    pub fn unsubscribe_outcome(mut self, outcome: Result<bool, PlatformError>) -> Self {
        self.unsubscribe_outcome = outcome;
        self
    }

    fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Some(journal.clone());
        self
    }
}

#[async_trait]
impl PushSubscription for FakeSubscription {
    fn to_json(&self) -> Result<Value, Error> {
        Ok(json!({
            "endpoint": self.endpoint,
            "expirationTime": null,
            "keys": { "p256dh": "AQID", "auth": "BAUG" }
        }))
    }

    async fn unsubscribe(&self) -> Result<bool, Error> {
        if let Some(journal) = &self.journal {
            journal.record("unsubscribe");
        }
        Ok(self.unsubscribe_outcome.clone()?)
    }
}

// =============================================================================
// Worker context
// =============================================================================

pub struct FakeNotifications {
    pub shown: Mutex<Vec<(String, Map<String, Value>)>>,
    journal: Journal,
}

impl FakeNotifications {
    pub fn new(journal: &Journal) -> Self {
        Self {
            shown: Mutex::new(vec![]),
            journal: journal.clone(),
        }
    }

    pub fn shown(&self) -> Vec<(String, Map<String, Value>)> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifications for FakeNotifications {
    async fn show(&self, title: &str, options: Map<String, Value>) -> Result<(), Error> {
        self.journal.record(format!("show {}", title));
        self.shown.lock().unwrap().push((title.to_owned(), options));
        Ok(())
    }
}

pub struct FakeNotification {
    pub data: Option<Value>,
    pub closed: AtomicU32,
    journal: Journal,
}

impl FakeNotification {
    pub fn new(journal: &Journal, data: Option<Value>) -> Self {
        Self {
            data,
            closed: AtomicU32::new(0),
            journal: journal.clone(),
        }
    }

    pub fn close_count(&self) -> u32 {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Notification for FakeNotification {
    fn close(&self) {
        self.journal.record("close");
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn data(&self) -> Option<Value> {
        self.data.clone()
    }
}

pub struct FakeFetcher {
    pub requests: Mutex<Vec<(String, FetchRequest)>>,
    pub error: Option<PlatformError>,
    journal: Journal,
}

impl FakeFetcher {
    pub fn new(journal: &Journal) -> Self {
        Self {
            requests: Mutex::new(vec![]),
            error: None,
            journal: journal.clone(),
        }
    }

    pub fn requests(&self) -> Vec<(String, FetchRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, request: FetchRequest) -> Result<u16, Error> {
        self.journal.record(format!("fetch {}", url));
        self.requests
            .lock()
            .unwrap()
            .push((url.to_owned(), request));
        if let Some(error) = self.error.clone() {
            return Err(error.into());
        }
        Ok(200)
    }
}

pub struct FakeClients {
    pub opened: Mutex<Vec<String>>,
    journal: Journal,
}

impl FakeClients {
    pub fn new(journal: &Journal) -> Self {
        Self {
            opened: Mutex::new(vec![]),
            journal: journal.clone(),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clients for FakeClients {
    async fn open_window(&self, url: &str) -> Result<(), Error> {
        self.journal.record(format!("open {}", url));
        self.opened.lock().unwrap().push(url.to_owned());
        Ok(())
    }
}
