// # Notifier Trait
//
// Surfaces the outcome of an operation as a transient message.
//
// The notifier is injected into `ContactsApp` rather than reached through a
// global, so the app can be driven in tests with a recording double.

use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Failure,
}

/// Body of a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationBody {
    /// Plain text
    Text(String),
    /// Failure detail, with the HTTP status when the backend rejected the call
    Failure {
        status: Option<u16>,
        message: String,
    },
}

impl NotificationBody {
    /// The message text regardless of kind
    pub fn message(&self) -> &str {
        match self {
            NotificationBody::Text(text) => text,
            NotificationBody::Failure { message, .. } => message,
        }
    }
}

impl fmt::Display for NotificationBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationBody::Text(text) => f.write_str(text),
            NotificationBody::Failure {
                status: Some(status),
                message,
            } => write!(f, "{} (HTTP {})", message, status),
            NotificationBody::Failure { status: None, message } => f.write_str(message),
        }
    }
}

/// A transient, user-visible outcome message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: NotificationBody,
    pub level: Level,
}

impl Notification {
    /// A success message with a plain-text body
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: NotificationBody::Text(text.into()),
            level: Level::Success,
        }
    }

    /// A failure message carrying the error detail
    pub fn failure(title: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: NotificationBody::Failure {
                status,
                message: message.into(),
            },
            level: Level::Failure,
        }
    }

    /// Build a failure notification from an error
    pub fn from_error(title: impl Into<String>, err: &crate::Error) -> Self {
        Self::failure(title, err.status(), err.user_message())
    }
}

/// Trait for notification sinks
///
/// `notify` must return immediately: it queues the message and never waits
/// for it to be shown or dismissed.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
