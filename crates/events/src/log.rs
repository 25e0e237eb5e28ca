//! Tracing subscriber for notifications.
//!
//! [`NotificationLog`] drains a [`NotificationBus`](crate::NotificationBus)
//! receiver and writes each notification as a structured log event. It runs
//! as a long-lived background task and exits when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::{Notification, NotificationLevel};

/// Background service that logs every notification.
pub struct NotificationLog;

impl NotificationLog {
    /// Run the logging loop until the channel closes.
    ///
    /// Returns the number of notifications logged.
    pub async fn run(mut receiver: broadcast::Receiver<Notification>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(notification) => {
                    Self::log(&notification);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification log lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Notification bus closed, notification log shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn log(notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(text = %notification.message, "Notification");
            }
            NotificationLevel::Error => {
                tracing::warn!(text = %notification.message, "Error notification");
            }
        }
    }
}
