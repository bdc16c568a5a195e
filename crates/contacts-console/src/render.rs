//! Plain-text rendering of the table, dialogs and toasts

use contacts_core::validation::Field;
use contacts_core::{Contact, FormDialog, Level, Toast};
use std::fmt::Write;

const HEADERS: [&str; 4] = ["ID", "First Name", "Last Name", "Email"];

/// Render the contact table
pub fn table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts yet. Type `new` to create one.".to_string();
    }

    let rows: Vec<[&str; 4]> = contacts
        .iter()
        .map(|c| {
            [
                c.id.as_str(),
                c.first_name.as_str(),
                c.last_name.as_str(),
                c.email.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Render an open dialog with its values and field errors
pub fn dialog(dialog: &FormDialog) -> String {
    let Some(form) = dialog.form() else {
        return "No dialog open.".to_string();
    };

    let mut out = String::new();
    let _ = write!(out, "== {} ==", dialog.kind().title());
    if let Some(target) = dialog.target() {
        let _ = write!(out, " (id {})", target.id);
    }
    out.push('\n');

    for field in Field::ALL {
        let _ = write!(out, "  {:<11} {}", format!("{}:", field.label()), field.get(&form.values));
        if let Some(msg) = form.errors.get(field) {
            let _ = write!(out, "    ! {}", msg);
        }
        out.push('\n');
    }
    out.push_str("  (set <field> <value>, submit, cancel)");
    out
}

/// Render one toast as a single line
pub fn toast(toast: &Toast) -> String {
    let marker = match toast.notification.level {
        Level::Success => "+",
        Level::Failure => "!",
    };
    format!(
        "[{}] {} {}: {}",
        toast.id, marker, toast.notification.title, toast.notification.body
    )
}
