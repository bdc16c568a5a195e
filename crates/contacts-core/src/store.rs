// # Contact Store
//
// Client-side copy of the backend's contact sequence.
//
// ## Replacement Semantics
//
// - The sequence is only ever replaced as a whole, from a list response
// - There is no insert/patch path; mutations go through the backend and
//   are followed by a refetch
// - Readers take a snapshot and never observe a half-applied list
//
// Nothing is persisted: the store starts empty on every session.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::{Contact, ContactId};

/// In-memory ordered contact sequence
///
/// Cloning the store is cheap and yields a handle to the same sequence.
///
/// # Example
///
/// ```rust,no_run
/// use contacts_core::ContactStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = ContactStore::new();
///     store.replace(Vec::new()).await;
///     assert!(store.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    inner: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched sequence
    pub async fn replace(&self, contacts: Vec<Contact>) {
        let mut guard = self.inner.write().await;
        *guard = contacts;
    }

    /// Copy of the current sequence, in backend order
    pub async fn snapshot(&self) -> Vec<Contact> {
        self.inner.read().await.clone()
    }

    /// Find a contact by identifier
    pub async fn get(&self, id: &ContactId) -> Option<Contact> {
        let guard = self.inner.read().await;
        guard.iter().find(|c| &c.id == id).cloned()
    }

    /// Get the number of contacts
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
