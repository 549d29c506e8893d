use std::str::FromStr;

use thiserror::Error;

use crate::domain::{FieldParseError, UserField, UserId};

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    Edit(UserId),
    Set { field: UserField, value: String },
    Save,
    Cancel,
    Delete(UserId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a user id")]
    InvalidId(String),
    #[error(transparent)]
    Field(#[from] FieldParseError),
}

pub const HELP: &str = "\
commands:
  list | ls                 show the directory
  reload                    fetch users from the server again
  edit <id>                 start editing a user
  set <field> <value>       change a draft field (name, username, email,
                            address.street, address.suite, address.city,
                            address.zipcode)
  save                      send the draft to the server
  cancel                    discard the draft
  delete <id> | rm <id>     delete a user on the server
  help                      show this text
  quit | exit               leave
";

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word {
            "" => Err(CommandParseError::Empty),
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "edit" => parse_id("edit", rest).map(Command::Edit),
            "delete" | "rm" => parse_id("delete", rest).map(Command::Delete),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim_start()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "set",
                        argument: "a field name",
                    });
                }
                Ok(Command::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<UserId, CommandParseError> {
    if arg.is_empty() {
        return Err(CommandParseError::MissingArgument {
            command,
            argument: "a user id",
        });
    }
    arg.parse::<u64>()
        .map(UserId)
        .map_err(|_| CommandParseError::InvalidId(arg.to_string()))
}
