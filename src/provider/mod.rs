pub use self::{
    http::HTTP,
    keep_alive::KeepAlive,
    permission::CallbackPermissions,
    platform::{
        Clients, Fetcher, Lifetime, Navigator, Notification, Notifications,
        Permissions, PushSubscription, Registration, ServiceWorkerContainer,
    },
};

#[cfg(test)]
pub(crate) mod fake;
mod http;
mod keep_alive;
mod permission;
mod platform;
