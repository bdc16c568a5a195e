// # contacts-core
//
// Core library for the contacts front end.
//
// ## Architecture Overview
//
// This library holds everything that does not depend on a concrete HTTP
// stack or rendering surface:
// - **ContactApi**: Trait for the four REST operations (list/create/update/delete)
// - **Notifier**: Trait for transient, non-blocking outcome messages
// - **ContactSchema**: Local validation of first name, last name and email
// - **ContactStore**: The in-memory contact sequence, replaced wholesale
// - **FormDialog**: The Closed → Open → Submitting state machine shared by
//   the create and update dialogs
// - **ContactsApp**: Root composition wiring the pieces together
//
// ## Design Principles
//
// 1. **Validate before I/O**: nothing reaches the network until the schema passes
// 2. **Refetch, don't patch**: every successful mutation is followed by a full list call
// 3. **Injected services**: the API client and the notifier are trait objects,
//    so the app runs against test doubles without a backend or a screen

pub mod app;
pub mod config;
pub mod dialog;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;
pub mod traits;
pub mod validation;

// Re-export core types for convenience
pub use app::ContactsApp;
pub use config::{ApiConfig, ClientConfig, FormConfig, NotificationConfig};
pub use dialog::{DialogKind, DialogState, FormDialog, FormState, Submission};
pub use error::{Error, Result};
pub use model::{Contact, ContactDraft, ContactId};
pub use notify::{Toast, ToastId, ToastQueue};
pub use store::ContactStore;
pub use traits::{ContactApi, Created, Level, Notification, NotificationBody, Notifier};
pub use validation::{ContactSchema, Field, ValidationErrors};
