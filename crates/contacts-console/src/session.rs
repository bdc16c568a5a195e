//! Interactive session
//!
//! Maps parsed commands onto [`ContactsApp`] operations and collects the
//! text to print. Toasts are printed once, the first time they are seen.

use contacts_core::{ContactsApp, DialogKind, Error, ToastQueue};
use tracing::debug;

use crate::command::{Command, USAGE};
use crate::render;

const NO_DIALOG: &str = "No dialog open. Use `new` or `edit <id>`.";

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    app: ContactsApp,
    toasts: ToastQueue,
    /// Dialog that `set`, `show`, `submit` and `cancel` act on
    focus: Option<DialogKind>,
    last_toast: u64,
}

impl Session {
    pub fn new(app: ContactsApp, toasts: ToastQueue) -> Self {
        Self {
            app,
            toasts,
            focus: None,
            last_toast: 0,
        }
    }

    /// Load the list and render the initial screen
    pub async fn start(&mut self) -> String {
        let mut out = Vec::new();
        // A failed load is reported through a toast
        if self.app.mount().await.is_ok() {
            out.push(render::table(&self.app.contacts().await));
        }
        out.push("Type `help` for commands.".to_string());
        self.finish(out)
    }

    /// Run one command
    pub async fn handle(&mut self, command: Command) -> (Flow, String) {
        debug!("Handling {:?}", command);
        let mut out = Vec::new();

        match command {
            Command::Nothing => {}
            Command::Help => out.push(USAGE.to_string()),
            Command::Quit => return (Flow::Quit, self.finish(out)),
            Command::List => {
                if self.app.refresh().await.is_ok() {
                    out.push(render::table(&self.app.contacts().await));
                }
            }
            Command::New => {
                self.app.open_create();
                self.focus = Some(DialogKind::Create);
                out.push(render::dialog(self.app.dialog(DialogKind::Create)));
            }
            Command::Edit(id) => match self.app.open_update(&id).await {
                Ok(()) => {
                    self.focus = Some(DialogKind::Update);
                    out.push(render::dialog(self.app.dialog(DialogKind::Update)));
                }
                Err(e) => out.push(e.to_string()),
            },
            Command::Set(field, value) => match self.focus {
                Some(kind) => match self.app.edit(kind, field, value) {
                    Ok(()) => out.push(render::dialog(self.app.dialog(kind))),
                    Err(e) => out.push(e.to_string()),
                },
                None => out.push(NO_DIALOG.to_string()),
            },
            Command::Show => match self.focus {
                Some(kind) => out.push(render::dialog(self.app.dialog(kind))),
                None => out.push(NO_DIALOG.to_string()),
            },
            Command::Submit => match self.focus {
                Some(kind) => match self.app.submit(kind).await {
                    Ok(_) => {
                        out.push(render::table(&self.app.contacts().await));
                        out.extend(self.refocus());
                    }
                    Err(Error::InvalidState(msg)) => out.push(msg),
                    // Field errors or a failure toast; the dialog stays open
                    Err(_) => out.push(render::dialog(self.app.dialog(kind))),
                },
                None => out.push(NO_DIALOG.to_string()),
            },
            Command::Cancel => match self.focus {
                Some(kind) => {
                    self.app.cancel(kind);
                    out.push("Dialog closed.".to_string());
                    out.extend(self.refocus());
                }
                None => out.push(NO_DIALOG.to_string()),
            },
            Command::Delete(id) => {
                if self.app.delete(&id).await.is_ok() {
                    out.push(render::table(&self.app.contacts().await));
                }
            }
            Command::Toasts => {
                let visible = self.toasts.visible();
                if visible.is_empty() {
                    out.push("No notifications.".to_string());
                } else {
                    out.extend(visible.iter().map(render::toast));
                }
                self.mark_seen(&visible);
            }
            Command::Dismiss(Some(id)) => {
                if self.toasts.dismiss(id) {
                    out.push(format!("Dismissed notification {}.", id));
                } else {
                    out.push(format!("No notification {}.", id));
                }
            }
            Command::Dismiss(None) => {
                self.toasts.dismiss_all();
                out.push("Dismissed all notifications.".to_string());
            }
        }

        (Flow::Continue, self.finish(out))
    }

    /// Point focus at a dialog that is still open, if any
    fn refocus(&mut self) -> Option<String> {
        self.focus = [DialogKind::Create, DialogKind::Update]
            .into_iter()
            .find(|kind| self.app.dialog(*kind).is_open());
        self.focus.map(|kind| format!("Back to: {}", kind.title()))
    }

    /// Append toasts not printed yet and join the output
    fn finish(&mut self, mut out: Vec<String>) -> String {
        let fresh: Vec<_> = self
            .toasts
            .visible()
            .into_iter()
            .filter(|t| t.id.get() > self.last_toast)
            .collect();
        out.extend(fresh.iter().map(render::toast));
        self.mark_seen(&fresh);
        out.join("\n")
    }

    fn mark_seen(&mut self, toasts: &[contacts_core::Toast]) {
        if let Some(max) = toasts.iter().map(|t| t.id.get()).max() {
            self.last_toast = self.last_toast.max(max);
        }
    }
}
