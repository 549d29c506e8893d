//! Text rendering of a directory snapshot.

use std::fmt;

use crate::directory::DirectoryState;
use crate::domain::{User, UserField};

const HEADING: &str = "Howdy!!";
const CARD_RULE: &str = "----------------------------------------";
const FIELD_LABEL_WIDTH: usize = 16;

/// Renders every user as a card; the user in edit mode shows its draft as a form.
pub fn render_directory(state: &DirectoryState) -> String {
    DirectoryView(state).to_string()
}

struct DirectoryView<'a>(&'a DirectoryState);

impl fmt::Display for DirectoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "{HEADING}")?;
        writeln!(f, "{}", "=".repeat(CARD_RULE.len()))?;

        if state.users().is_empty() {
            return writeln!(f, "(no users loaded)");
        }

        for (index, user) in state.users().iter().enumerate() {
            if index > 0 {
                writeln!(f, "{CARD_RULE}")?;
            }
            match state.editing() {
                Some(editing) if editing.id() == user.id => write_form(f, editing.draft())?,
                _ => write_card(f, user)?,
            }
        }
        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, user: &User) -> fmt::Result {
    let address = &user.address;
    writeln!(f, "#{} {}", user.id, user.name)?;
    writeln!(f, "  Username: {}", user.username)?;
    writeln!(f, "  Email: {}", user.email)?;
    writeln!(
        f,
        "  Address: {}, {}, {}, {}",
        address.street, address.suite, address.city, address.zipcode
    )
}

fn write_form(f: &mut fmt::Formatter<'_>, draft: &User) -> fmt::Result {
    writeln!(f, "#{} [editing]", draft.id)?;
    for field in UserField::ALL {
        let label = field.to_string();
        writeln!(f, "  {label:<FIELD_LABEL_WIDTH$}= {}", draft.field(field))?;
    }
    writeln!(f, "  (set <field> <value>, then save or cancel)")
}
