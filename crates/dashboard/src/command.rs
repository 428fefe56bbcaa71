//! Console command parsing.

use stockroom_core::{DomainError, DomainResult, NotificationId};
use stockroom_sales::DateRange;

use crate::routes::Route;

/// Which notification `dismiss` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    /// 0-based position in the feed.
    Position(usize),
    Id(NotificationId),
}

/// One parsed console line.
///
/// Order line references are typed 1-based and stored 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Goto(Route),
    Show,
    Search(String),
    Range(DateRange),
    Select(String),
    Quantity(String),
    Add,
    AddNamed { name: String, quantity: i64 },
    Increment(usize),
    Decrement(usize),
    SetQuantity { index: usize, quantity: i64 },
    Remove(usize),
    Save,
    Print,
    Export,
    History,
    ToggleNotifications,
    Dismiss(DismissTarget),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> DomainResult<Command> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "goto" | "go" | "open" => Command::Goto(required(rest, "page")?.parse()?),
            "show" | "ls" => Command::Show,
            "search" => Command::Search(rest.to_string()),
            "range" => Command::Range(required(rest, "date range")?.parse()?),
            "select" => Command::Select(required(rest, "item name")?.to_string()),
            "qty" | "quantity" => Command::Quantity(required(rest, "quantity")?.to_string()),
            "add" if rest.is_empty() => Command::Add,
            "add" => parse_add_named(rest)?,
            "inc" | "+" => Command::Increment(line_index(rest)?),
            "dec" | "-" => Command::Decrement(line_index(rest)?),
            "set" => {
                let (line_ref, quantity) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    DomainError::validation("usage: set <line> <quantity>")
                })?;
                Command::SetQuantity {
                    index: line_index(line_ref)?,
                    quantity: whole_number(quantity.trim())?,
                }
            }
            "rm" | "remove" => Command::Remove(line_index(rest)?),
            "save" => Command::Save,
            "print" => Command::Print,
            "export" => Command::Export,
            "history" => Command::History,
            "notifications" | "bell" => Command::ToggleNotifications,
            "dismiss" => Command::Dismiss(dismiss_target(required(rest, "notification")?)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(DomainError::validation(format!(
                    "unknown command {other:?} (try `help`)"
                )));
            }
        };
        Ok(command)
    }
}

fn required<'a>(rest: &'a str, what: &str) -> DomainResult<&'a str> {
    if rest.is_empty() {
        Err(DomainError::validation(format!("missing {what}")))
    } else {
        Ok(rest)
    }
}

fn whole_number(raw: &str) -> DomainResult<i64> {
    raw.parse()
        .map_err(|_| DomainError::validation(format!("expected a whole number, got {raw:?}")))
}

fn line_index(raw: &str) -> DomainResult<usize> {
    let raw = required(raw.trim(), "line number")?;
    let number: usize = raw
        .parse()
        .map_err(|_| DomainError::validation(format!("expected a line number, got {raw:?}")))?;
    number
        .checked_sub(1)
        .ok_or_else(|| DomainError::validation("line numbers start at 1"))
}

fn parse_add_named(rest: &str) -> DomainResult<Command> {
    if let Some((name, last)) = rest.rsplit_once(char::is_whitespace) {
        if let Ok(quantity) = last.parse::<i64>() {
            return Ok(Command::AddNamed {
                name: name.trim().to_string(),
                quantity,
            });
        }
    }
    Ok(Command::AddNamed {
        name: rest.to_string(),
        quantity: 1,
    })
}

fn dismiss_target(raw: &str) -> DomainResult<DismissTarget> {
    if let Ok(number) = raw.parse::<usize>() {
        return number
            .checked_sub(1)
            .map(DismissTarget::Position)
            .ok_or_else(|| DomainError::validation("notification numbers start at 1"));
    }
    Ok(DismissTarget::Id(raw.parse()?))
}
