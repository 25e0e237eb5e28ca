//! User-visible notification side channel.
//!
//! - [`NotificationBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Notification`]: a transient success or error message for the admin
//!   surface.
//! - [`NotificationLog`]: background subscriber writing every notification
//!   to the tracing output.

pub mod bus;
pub mod log;

pub use bus::{Notification, NotificationBus, NotificationLevel};
pub use log::NotificationLog;
