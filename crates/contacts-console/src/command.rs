//! Console command parsing

use anyhow::{Result, anyhow, bail};
use contacts_core::validation::Field;
use contacts_core::{ContactId, ToastId};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Refetch and render the table
    List,
    /// Open the create dialog
    New,
    /// Open the update dialog for a row
    Edit(ContactId),
    /// Set a field of the focused dialog
    Set(Field, String),
    /// Render the focused dialog
    Show,
    Submit,
    Cancel,
    Delete(ContactId),
    /// List visible notifications
    Toasts,
    /// Dismiss one notification, or all of them
    Dismiss(Option<ToastId>),
    Help,
    Quit,
    /// Blank line
    Nothing,
}

pub const USAGE: &str = "\
Commands:
  list | refresh            reload and show the contact table
  new                       open the create dialog
  edit <id>                 open the update dialog for a contact
  set <field> <value>       set first_name, last_name or email in the open dialog
  show                      show the open dialog
  submit                    submit the open dialog
  cancel                    close the open dialog without saving
  delete <id>               delete a contact
  toasts                    list notifications
  dismiss <n> | dismiss all dismiss notifications
  help                      show this help
  quit | exit               leave";

impl Command {
    /// Parse a line of input
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Nothing);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "refresh" | "ls" => Command::List,
            "new" | "create" => Command::New,
            "edit" | "update" => Command::Edit(id_arg(word, rest)?),
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    bail!("usage: set <field> <value>");
                }
                let field = Field::parse(name).ok_or_else(|| {
                    anyhow!("unknown field '{}'; use first_name, last_name or email", name)
                })?;
                Command::Set(field, value.to_string())
            }
            "show" => Command::Show,
            "submit" | "save" => Command::Submit,
            "cancel" | "close" => Command::Cancel,
            "delete" | "rm" => Command::Delete(id_arg(word, rest)?),
            "toasts" => Command::Toasts,
            "dismiss" => match rest {
                "" | "all" => Command::Dismiss(None),
                n => {
                    let id: u64 = n
                        .parse()
                        .map_err(|_| anyhow!("usage: dismiss <n> | dismiss all"))?;
                    Command::Dismiss(Some(ToastId::new(id)))
                }
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}'; type `help` for a list", other),
        };
        Ok(command)
    }
}

fn id_arg(word: &str, rest: &str) -> Result<ContactId> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        bail!("usage: {} <id>", word);
    }
    Ok(ContactId::new(rest))
}
