//! Root composition
//!
//! [`ContactsApp`] wires the API client, the contact store, the two dialogs
//! and the notifier together.
//!
//! ## Flow
//!
//! ```text
//! mount ──▶ list ──▶ store.replace
//!
//! submit ──▶ validate ──▶ create/update ──┬─ ok ──▶ close dialog ──▶ notify ──▶ list
//!               │                         └─ err ─▶ reopen dialog ─▶ notify
//!               └─ invalid ─▶ field errors (no I/O, no notification)
//!
//! delete ──▶ delete call ──┬─ ok ──▶ notify ──▶ list
//!                          └─ err ─▶ notify
//! ```
//!
//! Within one action the mutation always completes before the list call is
//! issued. The sequence is never patched locally.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::dialog::{DialogKind, FormDialog, Submission};
use crate::error::{Error, Result};
use crate::model::{Contact, ContactId};
use crate::store::ContactStore;
use crate::traits::{ContactApi, Notification, Notifier};
use crate::validation::{ContactSchema, Field};

/// Title used for success notifications
pub const SUCCESS_TITLE: &str = "Success";
/// Title used for failure notifications
pub const ERROR_TITLE: &str = "Error";

const CREATED_MESSAGE: &str = "Contact created";
const UPDATED_MESSAGE: &str = "Successfully updated!";
const DELETED_MESSAGE: &str = "Successfully deleted!";

/// The contacts front end without a rendering surface
pub struct ContactsApp {
    api: Box<dyn ContactApi>,
    notifier: Arc<dyn Notifier>,
    store: ContactStore,
    create_dialog: FormDialog,
    update_dialog: FormDialog,
}

impl ContactsApp {
    /// Create an app with the given schema
    pub fn new(api: Box<dyn ContactApi>, notifier: Arc<dyn Notifier>, schema: ContactSchema) -> Self {
        Self {
            api,
            notifier,
            store: ContactStore::new(),
            create_dialog: FormDialog::new(DialogKind::Create, schema),
            update_dialog: FormDialog::new(DialogKind::Update, schema),
        }
    }

    /// Create an app from a validated configuration
    pub fn from_config(
        api: Box<dyn ContactApi>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            api,
            notifier,
            ContactSchema::new(config.form.min_name_len),
        ))
    }

    /// Initial load; always issues a list call
    pub async fn mount(&self) -> Result<()> {
        info!("Mounting contacts app against {}", self.api.endpoint());
        self.refresh().await
    }

    /// Refetch the full sequence and replace the store
    ///
    /// On failure the store keeps its previous contents and an error
    /// notification is shown.
    pub async fn refresh(&self) -> Result<()> {
        match self.api.list().await {
            Ok(contacts) => {
                debug!("Loaded {} contact(s)", contacts.len());
                self.store.replace(contacts).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load contacts: {}", e);
                self.notifier
                    .notify(Notification::from_error(ERROR_TITLE, &e));
                Err(e)
            }
        }
    }

    /// Open the create dialog with empty values
    pub fn open_create(&mut self) {
        self.create_dialog.open_blank();
    }

    /// Open the update dialog for a contact currently in the store
    pub async fn open_update(&mut self, id: &ContactId) -> Result<()> {
        let contact = self
            .store
            .get(id)
            .await
            .ok_or_else(|| Error::not_found(format!("contact {}", id)))?;
        self.update_dialog.open_for(&contact);
        Ok(())
    }

    /// Edit one field of an open dialog
    pub fn edit(&mut self, kind: DialogKind, field: Field, value: impl Into<String>) -> Result<()> {
        self.dialog_mut(kind).set_field(field, value)
    }

    /// Close a dialog without submitting
    pub fn cancel(&mut self, kind: DialogKind) {
        self.dialog_mut(kind).cancel();
    }

    /// Submit a dialog
    ///
    /// # Returns
    ///
    /// - `Ok(message)`: the backend's success message; the dialog is closed
    ///   and the list has been refetched
    /// - `Err(Error::Validation)`: blocked locally, nothing sent or notified
    /// - `Err(_)`: rejected or transport failure; the dialog is open again
    ///   with the entered values and a failure notification was shown
    pub async fn submit(&mut self, kind: DialogKind) -> Result<String> {
        let submission = self.dialog_mut(kind).begin_submit()?;

        match self.send(&submission).await {
            Ok(message) => {
                self.dialog_mut(kind).succeed()?;
                info!("{} succeeded: {}", kind, message);
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, message.clone()));
                // The mutation stands even if the refetch fails
                let _ = self.refresh().await;
                Ok(message)
            }
            Err(e) => {
                self.dialog_mut(kind).fail()?;
                warn!("{} failed: {}", kind, e);
                self.notifier
                    .notify(Notification::from_error(ERROR_TITLE, &e));
                Err(e)
            }
        }
    }

    /// Delete a contact, then refetch on success
    pub async fn delete(&self, id: &ContactId) -> Result<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                info!("Deleted contact {}", id);
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, DELETED_MESSAGE));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!("Delete of contact {} failed: {}", id, e);
                self.notifier
                    .notify(Notification::from_error(ERROR_TITLE, &e));
                Err(e)
            }
        }
    }

    /// Copy of the displayed contacts
    pub async fn contacts(&self) -> Vec<Contact> {
        self.store.snapshot().await
    }

    /// Handle to the underlying store
    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Read access to a dialog
    pub fn dialog(&self, kind: DialogKind) -> &FormDialog {
        match kind {
            DialogKind::Create => &self.create_dialog,
            DialogKind::Update => &self.update_dialog,
        }
    }

    fn dialog_mut(&mut self, kind: DialogKind) -> &mut FormDialog {
        match kind {
            DialogKind::Create => &mut self.create_dialog,
            DialogKind::Update => &mut self.update_dialog,
        }
    }

    async fn send(&self, submission: &Submission) -> Result<String> {
        match (submission.kind, &submission.target) {
            (DialogKind::Create, _) => {
                let created = self.api.create(&submission.draft).await?;
                if created.message.trim().is_empty() {
                    Ok(CREATED_MESSAGE.to_string())
                } else {
                    Ok(created.message)
                }
            }
            (DialogKind::Update, Some(id)) => {
                let message = self.api.update(id, &submission.draft).await?;
                if message.trim().is_empty() {
                    Ok(UPDATED_MESSAGE.to_string())
                } else {
                    Ok(message)
                }
            }
            (DialogKind::Update, None) => {
                Err(Error::invalid_state("update submission without target"))
            }
        }
    }
}
