// # Contact API Trait
//
// Defines the interface for the backend's REST operations.
//
// ## Implementations
//
// - HTTP: `contacts-http` crate (`RestClient`)
// - Tests: in-memory doubles under `tests/common`
//
// ## Endpoints
//
// | Operation | Method | Path                    | Success |
// |-----------|--------|-------------------------|---------|
// | list      | GET    | `/contacts`             | 200     |
// | create    | POST   | `/create_contact`       | 200/201 |
// | update    | PATCH  | `/update_contact/{id}`  | 200     |
// | delete    | DELETE | `/delete_contact/{id}`  | 204     |

use async_trait::async_trait;

use crate::model::{Contact, ContactDraft, ContactId};

/// Outcome of a successful create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    /// Message returned by the backend
    pub message: String,
    /// The created record, when the backend echoes it back
    pub contact: Option<Contact>,
}

/// Trait for backend clients
///
/// Every call is single-shot: implementations must not retry. Failures are
/// tagged by status code, not only by transport exceptions:
///
/// - status outside the operation's success set → `Error::Rejected` with
///   the message parsed from the body where present
/// - unreachable backend or malformed body → `Error::Transport` with the
///   raw error text
///
/// # Thread Safety
///
/// Implementations must be usable across async tasks.
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Fetch the full contact sequence
    async fn list(&self) -> Result<Vec<Contact>, crate::Error>;

    /// Create a contact; the backend assigns the identifier
    async fn create(&self, draft: &ContactDraft) -> Result<Created, crate::Error>;

    /// Replace the editable fields of a contact
    ///
    /// # Returns
    ///
    /// The backend's confirmation message
    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> Result<String, crate::Error>;

    /// Remove a contact
    async fn delete(&self, id: &ContactId) -> Result<(), crate::Error>;

    /// Base URL or other description of the backend (for logging)
    fn endpoint(&self) -> &str;
}
