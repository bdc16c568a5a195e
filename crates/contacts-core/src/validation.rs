//! Contact form validation
//!
//! Runs synchronously before any network call. The dialog controller
//! re-runs single-field rules on every edit and the full schema on submit.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::model::ContactDraft;

/// `local-part@domain.tld`, ASCII word characters, dots and hyphens allowed
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+$").expect("email pattern compiles")
});

/// Default minimum length for first and last names
pub const DEFAULT_MIN_NAME_LEN: usize = 3;

/// A validated form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    /// Name used in error maps and console commands
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
        }
    }

    /// Parse a field name, accepting the short forms `first` and `last`
    pub fn parse(name: &str) -> Option<Field> {
        match name.to_ascii_lowercase().as_str() {
            "first_name" | "firstname" | "first" => Some(Field::FirstName),
            "last_name" | "lastname" | "last" => Some(Field::LastName),
            "email" | "mail" => Some(Field::Email),
            _ => None,
        }
    }

    /// Read this field from a draft
    pub fn get<'a>(&self, draft: &'a ContactDraft) -> &'a str {
        match self {
            Field::FirstName => &draft.first_name,
            Field::LastName => &draft.last_name,
            Field::Email => &draft.email,
        }
    }

    /// Write this field on a draft
    pub fn set(&self, draft: &mut ContactDraft, value: impl Into<String>) {
        let slot = match self {
            Field::FirstName => &mut draft.first_name,
            Field::LastName => &mut draft.last_name,
            Field::Email => &mut draft.email,
        };
        *slot = value.into();
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, one per field
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

fn join_messages(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drop the message for a field
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Iterate in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Declarative rules for the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSchema {
    min_name_len: usize,
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_NAME_LEN)
    }
}

impl ContactSchema {
    /// Create a schema with the given minimum name length
    pub fn new(min_name_len: usize) -> Self {
        Self { min_name_len }
    }

    pub fn min_name_len(&self) -> usize {
        self.min_name_len
    }

    /// Check a single field value
    ///
    /// Returns the message to show next to the field, or `None` if it passes.
    pub fn validate_field(&self, field: Field, value: &str) -> Option<String> {
        match field {
            Field::FirstName | Field::LastName => {
                if value.chars().count() < self.min_name_len {
                    Some(format!(
                        "{} must be at least {} characters.",
                        field.label(),
                        self.min_name_len
                    ))
                } else {
                    None
                }
            }
            Field::Email => {
                if EMAIL_PATTERN.is_match(value) {
                    None
                } else {
                    Some("Enter a valid email address.".to_string())
                }
            }
        }
    }

    /// Check every field of a draft
    pub fn validate(&self, draft: &ContactDraft) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in Field::ALL {
            if let Some(msg) = self.validate_field(field, field.get(draft)) {
                errors.insert(field, msg);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
