//! Test doubles and common utilities for app contract tests
//!
//! `MockContactApi` behaves like a tiny backend: it keeps contacts in memory,
//! assigns ids on create and records every call in order.

#![allow(dead_code)]

use contacts_core::error::Result;
use contacts_core::traits::{ContactApi, Created, Notification, Notifier};
use contacts_core::{Contact, ContactDraft, ContactId, Error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A failure to inject into the next matching call
#[derive(Debug, Clone)]
pub enum Fault {
    /// Backend answers with this status and message
    Reject(u16, String),
    /// Backend unreachable
    Transport(String),
}

impl Fault {
    fn to_error(&self) -> Error {
        match self {
            Fault::Reject(status, message) => Error::rejected(*status, message.clone()),
            Fault::Transport(msg) => Error::transport(msg.clone()),
        }
    }
}

#[derive(Default)]
struct Backend {
    contacts: Vec<Contact>,
    calls: Vec<String>,
    faults: Vec<(&'static str, Fault)>,
}

/// In-memory ContactApi that tracks calls
pub struct MockContactApi {
    backend: Arc<Mutex<Backend>>,
    next_id: Arc<AtomicU64>,
}

impl MockContactApi {
    pub fn new() -> Self {
        Self {
            backend: Arc::new(Mutex::new(Backend::default())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Pre-populate the backend
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let api = Self::new();
        let max_id = contacts
            .iter()
            .filter_map(|c| c.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        api.next_id.store(max_id + 1, Ordering::SeqCst);
        api.backend.lock().unwrap().contacts = contacts;
        api
    }

    /// Create a new MockContactApi that shares the backend with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            backend: Arc::clone(&other.backend),
            next_id: Arc::clone(&other.next_id),
        }
    }

    /// Make the next call of `operation` ("list", "create", "update", "delete") fail
    pub fn fail_next(&self, operation: &'static str, fault: Fault) {
        self.backend.lock().unwrap().faults.push((operation, fault));
    }

    /// Operations called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.backend.lock().unwrap().calls.clone()
    }

    /// Number of calls of one operation
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == operation).count()
    }

    /// Backend-side contents
    pub fn stored(&self) -> Vec<Contact> {
        self.backend.lock().unwrap().contacts.clone()
    }

    fn enter(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, Backend>> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(operation.to_string());
        if let Some(pos) = backend.faults.iter().position(|(op, _)| *op == operation) {
            let (_, fault) = backend.faults.remove(pos);
            return Err(fault.to_error());
        }
        Ok(backend)
    }
}

#[async_trait::async_trait]
impl ContactApi for MockContactApi {
    async fn list(&self) -> Result<Vec<Contact>> {
        let backend = self.enter("list")?;
        Ok(backend.contacts.clone())
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Created> {
        let mut backend = self.enter("create")?;
        let id = ContactId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let contact = Contact {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
        };
        backend.contacts.push(contact.clone());
        Ok(Created {
            message: "Contact created".to_string(),
            contact: Some(contact),
        })
    }

    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> Result<String> {
        let mut backend = self.enter("update")?;
        let contact = backend
            .contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| Error::rejected(404, "User not found"))?;
        contact.first_name = draft.first_name.clone();
        contact.last_name = draft.last_name.clone();
        contact.email = draft.email.clone();
        Ok("User updated.".to_string())
    }

    async fn delete(&self, id: &ContactId) -> Result<()> {
        let mut backend = self.enter("delete")?;
        let before = backend.contacts.len();
        backend.contacts.retain(|c| &c.id != id);
        if backend.contacts.len() == before {
            return Err(Error::rejected(404, "User not found"));
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "mock://contacts"
    }
}

/// A Notifier that records everything it is given
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.title).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Helper to build a contact
pub fn contact(id: u64, first: &str, last: &str, email: &str) -> Contact {
    Contact {
        id: ContactId::from(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

/// Helper to build an app wired to shared doubles
pub fn app_with(
    api: &MockContactApi,
    notifier: &RecordingNotifier,
) -> contacts_core::ContactsApp {
    contacts_core::ContactsApp::new(
        Box::new(MockContactApi::sharing_state_with(api)),
        Arc::new(notifier.clone()),
        contacts_core::ContactSchema::default(),
    )
}
