pub use self::{
    permission::PermissionState,
    push::{
        ClickAction, FetchAction, FetchRequest, NotificationClickEvent,
        NotificationSpec, PushEvent, PushMessageData, DEFAULT_FETCH_METHOD,
    },
    subscription::{
        ApplicationServerKey, SubscribeOptions, SubscriptionKeys,
        SubscriptionRequest, SubscriptionResult,
    },
};

mod permission;
mod push;
mod subscription;
