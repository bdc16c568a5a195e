//! Dialog/form controller
//!
//! One parameterized [`FormDialog`] serves both the create and the update
//! dialog. Each instance walks the same state machine:
//!
//! ```text
//!            open()            begin_submit()           succeed()
//!  Closed ──────────▶ Open ──────────────────▶ Submitting ─────────▶ Closed
//!    ▲                 │  ▲                         │
//!    │    cancel()     │  │         fail()          │
//!    └─────────────────┘  └─────────────────────────┘
//! ```
//!
//! Validation failure on submit keeps the dialog `Open` with field errors.
//! The form state is dropped whenever the dialog closes.

use std::fmt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Contact, ContactDraft, ContactId};
use crate::validation::{ContactSchema, Field, ValidationErrors};

/// Which dialog an instance drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Create,
    Update,
}

impl DialogKind {
    /// Dialog title
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Create => "Create a New Contact",
            DialogKind::Update => "Update the Contact",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogKind::Create => f.write_str("create"),
            DialogKind::Update => f.write_str("update"),
        }
    }
}

/// Lifecycle state of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
    Submitting,
}

/// Field values being edited plus their validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: ContactDraft,
    pub errors: ValidationErrors,
}

impl FormState {
    fn new(values: ContactDraft) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
        }
    }
}

/// What a submit hands to the API layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: DialogKind,
    pub draft: ContactDraft,
    /// Identifier of the contact being updated; `None` for create
    pub target: Option<ContactId>,
}

/// A modal form for creating or updating a contact
#[derive(Debug, Clone)]
pub struct FormDialog {
    kind: DialogKind,
    schema: ContactSchema,
    state: DialogState,
    form: Option<FormState>,
    target: Option<Contact>,
}

impl FormDialog {
    /// Create a closed dialog of the given kind
    pub fn new(kind: DialogKind, schema: ContactSchema) -> Self {
        Self {
            kind,
            schema,
            state: DialogState::Closed,
            form: None,
            target: None,
        }
    }

    /// Open with empty values (create)
    pub fn open_blank(&mut self) {
        self.open(ContactDraft::default(), None);
    }

    /// Open with a snapshot of `contact` as initial values (update)
    pub fn open_for(&mut self, contact: &Contact) {
        self.open(contact.to_draft(), Some(contact.clone()));
    }

    /// Open the dialog with the given initial values and target
    ///
    /// Opening an already open dialog replaces its form and target.
    pub fn open(&mut self, initial: ContactDraft, target: Option<Contact>) {
        if self.state != DialogState::Closed {
            debug!("Reopening {} dialog, previous form discarded", self.kind);
        }
        self.form = Some(FormState::new(initial));
        self.target = target;
        self.state = DialogState::Open;
        debug!("{} dialog opened", self.kind);
    }

    /// Set one field and re-run its rule
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        self.expect_state(DialogState::Open, "edit")?;
        let schema = self.schema;
        let form = self.form_mut()?;

        field.set(&mut form.values, value);
        match schema.validate_field(field, field.get(&form.values)) {
            Some(msg) => form.errors.insert(field, msg),
            None => form.errors.clear(field),
        }
        Ok(())
    }

    /// Validate the whole form and move to `Submitting`
    ///
    /// On validation failure the dialog stays `Open` with every field error
    /// recorded, and no submission is produced.
    pub fn begin_submit(&mut self) -> Result<Submission> {
        self.expect_state(DialogState::Open, "submit")?;
        let schema = self.schema;
        let kind = self.kind;
        let target = self.target.as_ref().map(|c| c.id.clone());

        if kind == DialogKind::Update && target.is_none() {
            return Err(Error::invalid_state("update dialog has no target contact"));
        }

        let form = self.form_mut()?;
        if let Err(errors) = schema.validate(&form.values) {
            form.errors = errors.clone();
            debug!("{} dialog blocked by validation: {}", kind, errors);
            return Err(Error::Validation(errors));
        }
        form.errors = ValidationErrors::new();
        let draft = form.values.clone();

        self.state = DialogState::Submitting;
        Ok(Submission {
            kind,
            draft,
            target,
        })
    }

    /// The call succeeded: close and drop the form
    pub fn succeed(&mut self) -> Result<()> {
        self.expect_state(DialogState::Submitting, "complete")?;
        self.close();
        Ok(())
    }

    /// The call failed: back to `Open` with the entered values kept
    pub fn fail(&mut self) -> Result<()> {
        self.expect_state(DialogState::Submitting, "fail")?;
        self.state = DialogState::Open;
        Ok(())
    }

    /// Close without submitting
    pub fn cancel(&mut self) {
        if self.state != DialogState::Closed {
            self.close();
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    /// Current form, `None` while closed
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Snapshot of the contact being updated
    pub fn target(&self) -> Option<&Contact> {
        self.target.as_ref()
    }

    /// Current field errors (empty while closed)
    pub fn errors(&self) -> ValidationErrors {
        self.form
            .as_ref()
            .map(|f| f.errors.clone())
            .unwrap_or_default()
    }

    fn close(&mut self) {
        self.form = None;
        self.target = None;
        self.state = DialogState::Closed;
        debug!("{} dialog closed", self.kind);
    }

    fn expect_state(&self, expected: DialogState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::invalid_state(format!(
                "cannot {} {} dialog while {:?}",
                action, self.kind, self.state
            )))
        }
    }

    fn form_mut(&mut self) -> Result<&mut FormState> {
        let kind = self.kind;
        self.form
            .as_mut()
            .ok_or_else(|| Error::invalid_state(format!("{} dialog has no form", kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Contact {
        Contact {
            id: ContactId::new("1"),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@doe.com".into(),
        }
    }

    fn filled_create() -> FormDialog {
        let mut dialog = FormDialog::new(DialogKind::Create, ContactSchema::default());
        dialog.open_blank();
        dialog.set_field(Field::FirstName, "Jane").unwrap();
        dialog.set_field(Field::LastName, "Doe").unwrap();
        dialog.set_field(Field::Email, "jane@doe.com").unwrap();
        dialog
    }

    #[test]
    fn test_closed_by_default() {
        let dialog = FormDialog::new(DialogKind::Create, ContactSchema::default());
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.form().is_none());
    }

    #[test]
    fn test_edit_revalidates_field() {
        let mut dialog = FormDialog::new(DialogKind::Create, ContactSchema::default());
        dialog.open_blank();

        dialog.set_field(Field::FirstName, "Jo").unwrap();
        assert!(dialog.errors().get(Field::FirstName).is_some());

        dialog.set_field(Field::FirstName, "Joan").unwrap();
        assert!(dialog.errors().get(Field::FirstName).is_none());
        // Untouched fields are not validated until submit
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn test_submit_success_closes() {
        let mut dialog = filled_create();
        let submission = dialog.begin_submit().unwrap();
        assert_eq!(dialog.state(), DialogState::Submitting);
        assert_eq!(submission.kind, DialogKind::Create);
        assert_eq!(submission.target, None);
        assert_eq!(submission.draft, ContactDraft::new("Jane", "Doe", "jane@doe.com"));

        dialog.succeed().unwrap();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.form().is_none());
    }

    #[test]
    fn test_submit_failure_keeps_values() {
        let mut dialog = filled_create();
        dialog.begin_submit().unwrap();
        dialog.fail().unwrap();

        assert_eq!(dialog.state(), DialogState::Open);
        assert_eq!(
            dialog.form().unwrap().values,
            ContactDraft::new("Jane", "Doe", "jane@doe.com")
        );
    }

    #[test]
    fn test_validation_blocks_submit() {
        let mut dialog = FormDialog::new(DialogKind::Create, ContactSchema::default());
        dialog.open_blank();
        dialog.set_field(Field::FirstName, "Jo").unwrap();

        let err = dialog.begin_submit().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(dialog.state(), DialogState::Open);
        // All three fields fail on a mostly empty form
        assert_eq!(dialog.errors().len(), 3);
    }

    #[test]
    fn test_update_snapshots_target() {
        let mut dialog = FormDialog::new(DialogKind::Update, ContactSchema::default());
        let contact = jane();
        dialog.open_for(&contact);

        assert_eq!(dialog.form().unwrap().values, contact.to_draft());
        let submission = dialog.begin_submit().unwrap();
        assert_eq!(submission.target, Some(ContactId::new("1")));
    }

    #[test]
    fn test_reopen_overwrites_target() {
        let mut dialog = FormDialog::new(DialogKind::Update, ContactSchema::default());
        dialog.open_for(&jane());

        let mut john = jane();
        john.id = ContactId::new("2");
        john.first_name = "John".into();
        dialog.open_for(&john);

        assert_eq!(dialog.target().unwrap().id, ContactId::new("2"));
        assert_eq!(dialog.form().unwrap().values.first_name, "John");
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut dialog = FormDialog::new(DialogKind::Create, ContactSchema::default());
        assert!(matches!(dialog.begin_submit(), Err(Error::InvalidState(_))));
        assert!(matches!(dialog.set_field(Field::Email, "x"), Err(Error::InvalidState(_))));
        assert!(dialog.succeed().is_err());

        let mut dialog = filled_create();
        dialog.begin_submit().unwrap();
        // Second submit while the first is in flight
        assert!(matches!(dialog.begin_submit(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_update_without_target_rejected() {
        let mut dialog = FormDialog::new(DialogKind::Update, ContactSchema::default());
        dialog.open(ContactDraft::new("Jane", "Doe", "jane@doe.com"), None);
        assert!(matches!(dialog.begin_submit(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_cancel_discards_form() {
        let mut dialog = filled_create();
        dialog.cancel();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.form().is_none());

        dialog.open_blank();
        assert_eq!(dialog.form().unwrap().values, ContactDraft::default());
    }
}
