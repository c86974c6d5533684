//! Line commands typed at a screen prompt.

use shared::domain::{Course, DishId, DishInput, CHEF_ROLE_FLAG};
use thiserror::Error;

const DISH_FIELDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Login { role_flag: String },
    List,
    Open(Destination),
    Add(DishInput),
    Remove { id: DishId },
    Reset,
    Filter { course: Option<String> },
    Back,
    Cancel,
    Logout,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    AddDish,
    RemoveDish,
    Filter,
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("type a command, or 'quit' to leave")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'add' takes at most 4 fields separated by '|', got {0}")]
    TooManyFields(usize),
}

pub fn parse_command(line: &str) -> Result<ScreenCommand, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "login" => Ok(ScreenCommand::Login {
            role_flag: parse_role(rest),
        }),
        "list" | "menu" => Ok(ScreenCommand::List),
        "open" | "go" => parse_destination(rest).map(ScreenCommand::Open),
        "add" => parse_dish(rest).map(ScreenCommand::Add),
        "remove" | "rm" => {
            let id = required(rest, "remove", "a dish id")?;
            Ok(ScreenCommand::Remove {
                id: DishId::new(id),
            })
        }
        "reset" => Ok(ScreenCommand::Reset),
        "filter" => Ok(ScreenCommand::Filter {
            course: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "back" => Ok(ScreenCommand::Back),
        "cancel" => Ok(ScreenCommand::Cancel),
        "logout" => Ok(ScreenCommand::Logout),
        "quit" | "exit" => Ok(ScreenCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// `chef` is accepted as shorthand for the chef flag; anything else passes through.
fn parse_role(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("chef") {
        CHEF_ROLE_FLAG.to_string()
    } else {
        raw.to_string()
    }
}

fn parse_destination(raw: &str) -> Result<Destination, CommandError> {
    match required(raw, "open", "add, remove, filter or help")?
        .to_ascii_lowercase()
        .as_str()
    {
        "add" => Ok(Destination::AddDish),
        "remove" => Ok(Destination::RemoveDish),
        "filter" => Ok(Destination::Filter),
        "help" => Ok(Destination::Help),
        other => Err(CommandError::Unknown(format!("open {other}"))),
    }
}

/// `add name | description | course | price`; missing trailing fields stay
/// blank so that validation can name them.
fn parse_dish(raw: &str) -> Result<DishInput, CommandError> {
    let raw = required(raw, "add", "name | description | course | price")?;
    let count = raw.split('|').count();
    if count > DISH_FIELDS {
        return Err(CommandError::TooManyFields(count));
    }
    let mut fields = raw.split('|').map(str::trim);
    let mut next = || fields.next().unwrap_or_default().to_string();
    Ok(DishInput {
        name: next(),
        description: next(),
        course: next(),
        price: next(),
    })
}

fn required<'a>(
    raw: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if raw.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(raw)
    }
}

/// Parses a course typed at the filter prompt.
pub fn course_from_input(raw: &str) -> Course {
    Course::from_label(raw.trim()).normalized()
}
