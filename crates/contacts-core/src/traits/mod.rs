//! Core traits for the contacts front end
//!
//! This module defines the abstract interfaces the app is composed from.
//!
//! - [`ContactApi`]: The four REST operations against the backend
//! - [`Notifier`]: Transient, non-blocking outcome messages

pub mod contact_api;
pub mod notifier;

pub use contact_api::{ContactApi, Created};
pub use notifier::{Level, Notification, NotificationBody, Notifier};
