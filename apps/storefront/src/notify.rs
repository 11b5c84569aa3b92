//! # Notifications
//!
//! Short messages the cart raises for the shopper ("Added to cart", ...).
//! Rendering them as toasts is the view layer's job; the cart only hands
//! them to a [`Notifier`] and moves on.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use shopsmart_core::DEFAULT_NOTIFICATION_MS;

/// A toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub duration_ms: u64,
}

impl Notification {
    /// Creates a notification with the default on-screen duration.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            duration_ms: DEFAULT_NOTIFICATION_MS,
        }
    }

    /// A product was added as a new line.
    pub fn added(name: &str) -> Self {
        Notification::new("Added to cart", format!("{name} has been added to your cart"))
    }

    /// An existing line grew to `quantity`.
    pub fn increased(name: &str, quantity: i64) -> Self {
        Notification::new(
            "Cart updated",
            format!("{name} quantity increased to {quantity}"),
        )
    }

    /// A line was removed.
    pub fn removed(name: &str) -> Self {
        Notification::new(
            "Removed from cart",
            format!("{name} has been removed from your cart"),
        )
    }

    /// The cart was emptied.
    pub fn cleared() -> Self {
        Notification::new("Cart cleared", "All items have been removed from your cart")
    }

    /// Overrides the on-screen duration.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Fire-and-forget sink for notifications.
///
/// Implementations must not block; the cart calls this while holding its
/// mutation lock.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            title = %notification.title,
            duration_ms = notification.duration_ms,
            "{}",
            notification.description
        );
    }
}

/// Forwards notifications to a channel for a UI task to render.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification receiver dropped");
        }
    }
}
