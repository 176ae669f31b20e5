//! Browser push subscription negotiation and notification dispatch.
//!
//! [`SubscriptionNegotiator`] runs in the page and produces a subscription
//! for the application server; [`PushEventHandler`] runs in the service
//! worker and turns delivered pushes and clicks into platform effects.

pub mod configuration;
pub mod error;
pub mod handler;
pub mod helpers;
pub mod negotiator;
pub mod provider;
pub mod types;

pub use self::{
    configuration::{Config, State},
    error::{Error, PlatformError},
    handler::PushEventHandler,
    negotiator::SubscriptionNegotiator,
    types::{SubscriptionRequest, SubscriptionResult},
};
