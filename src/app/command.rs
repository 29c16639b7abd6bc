// WasteDesk - app/command.rs
//
// Parsing of lines typed into the interactive browser. Pure: a line goes
// in, a `Command` (or a `CommandError`) comes out. Execution lives in the
// ui shell.

use crate::app::forms::EventDetails;
use crate::core::model::Address;
use crate::util::error::CommandError;
use chrono::NaiveDate;

/// One browser command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set filter `name` to raw `value` (empty value clears it).
    Filter { name: String, value: String },
    /// Clear one filter.
    Clear(String),
    /// Clear every filter.
    Reset,
    Page(usize),
    Next,
    Prev,
    First,
    Last,
    /// Switch to another view (`view zones`).
    View(String),
    /// Add a zone with this name.
    Add(String),
    /// Ask to delete the record with this id.
    Delete(String),
    /// Confirm the pending delete.
    Confirm,
    /// Cancel the pending delete.
    Cancel,
    Accept(String),
    Reject(String),
    /// Record a weighed item against a request.
    Collect {
        id: String,
        kind: String,
        weight_kg: f64,
    },
    /// Change one field of a collector.
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Open the request wizard.
    NewRequest,
    /// Wizard step one.
    Address(Address),
    /// Return from the event step to the address step.
    Back,
    /// Wizard step two; creates the request.
    Event(EventDetails),
    /// Close the wizard without creating a request.
    Discard,
    Show,
    Filters,
    Summary,
    Help,
    Quit,
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  filter <name> <value>   set a filter (value '*' or empty clears it)
  clear <name>            clear one filter
  reset                   clear all filters
  page <n> | next | prev | first | last
  view <zones|collectors|requests>
  add <zone name>         add a zone
  delete <id>             delete a record (asks for confirmation)
  yes | no                confirm or cancel a pending delete
  accept <id> | reject <id>   decide a pending collection request
  collect <id> <type> <kg>    record a collected item (pet-bottles|aluminium-cans|paper)
  edit <id> <field> <value>   change a collector's name, email, phone, zone or status
  new-request             start a collection request
    address <house>, <street>, <city>, <district>, <state>, <pincode>
    event <kg> <YYYY-MM-DD> [notes]
    back | discard
  show | filters | summary | help | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "filter" | "f" => {
            let (name, value) = split_filter_arg(rest);
            if name.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "filter",
                    argument: "filter name",
                });
            }
            Command::Filter {
                name: name.to_string(),
                value: value.to_string(),
            }
        }
        "clear" => Command::Clear(required(rest, "clear", "filter name")?),
        "reset" => Command::Reset,
        "page" | "p" => {
            let raw = required(rest, "page", "page number")?;
            let page = raw.parse::<usize>().map_err(|_| CommandError::InvalidNumber {
                command: "page",
                input: raw.clone(),
            })?;
            Command::Page(page)
        }
        "next" | "n" => Command::Next,
        "prev" | "previous" => Command::Prev,
        "first" => Command::First,
        "last" => Command::Last,
        "view" | "v" => Command::View(required(rest, "view", "view name")?),
        "add" => Command::Add(required(rest, "add", "zone name")?),
        "delete" | "del" | "rm" => Command::Delete(required(rest, "delete", "record id")?),
        "yes" | "y" | "confirm" => Command::Confirm,
        "no" | "cancel" => Command::Cancel,
        "accept" => Command::Accept(required(rest, "accept", "request id")?),
        "reject" => Command::Reject(required(rest, "reject", "request id")?),
        "collect" => {
            let mut parts = rest.split_whitespace();
            let id = next_word(&mut parts, "collect", "request id")?;
            let kind = next_word(&mut parts, "collect", "waste type")?;
            let raw = next_word(&mut parts, "collect", "weight")?;
            Command::Collect {
                id,
                kind,
                weight_kg: parse_number("collect", &raw)?,
            }
        }
        "edit" => {
            let (id, rest) = split_word(rest);
            let (field, value) = split_word(rest);
            if id.is_empty() || field.is_empty() || value.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "edit",
                    argument: "collector id, field and value",
                });
            }
            Command::Edit {
                id: id.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "new-request" | "new" => Command::NewRequest,
        "address" => Command::Address(parse_address(rest)?),
        "back" => Command::Back,
        "event" => Command::Event(parse_event(rest)?),
        "discard" => Command::Discard,
        "show" | "ls" => Command::Show,
        "filters" => Command::Filters,
        "summary" => Command::Summary,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => {
            return Err(CommandError::Unknown {
                command: word.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// Split `name value` or `name=value` into its two parts.
///
/// The name runs to the first whitespace or `=`; one `=` separator is
/// dropped, so `utilization >=90` and `utilization=>=90` are equivalent.
pub fn split_filter_arg(arg: &str) -> (&str, &str) {
    let arg = arg.trim();
    let end = arg
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(arg.len());
    let (name, rest) = arg.split_at(end);
    let rest = rest.trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest);
    (name, value.trim())
}

/// `house, street, city, district, state, pincode`. Parts are trimmed;
/// empty parts are left for form validation to report.
fn parse_address(rest: &str) -> Result<Address, CommandError> {
    let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [house_number, street, city, district, state, pincode] => Ok(Address {
            house_number: house_number.to_string(),
            street: street.to_string(),
            city: city.to_string(),
            district: district.to_string(),
            state: state.to_string(),
            pincode: pincode.to_string(),
        }),
        _ => Err(CommandError::MissingArgument {
            command: "address",
            argument: "house, street, city, district, state and pincode separated by commas",
        }),
    }
}

/// `<weight> <YYYY-MM-DD> [notes...]`.
fn parse_event(rest: &str) -> Result<EventDetails, CommandError> {
    let (weight, rest) = split_word(rest);
    let (date, notes) = split_word(rest);
    if weight.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "event",
            argument: "garbage weight",
        });
    }
    if date.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "event",
            argument: "collection date",
        });
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| CommandError::InvalidDate {
        command: "event",
        input: date.to_string(),
    })?;
    Ok(EventDetails {
        garbage_weight: parse_number("event", weight)?,
        date,
        notes: notes.to_string(),
    })
}

fn parse_number(command: &'static str, raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>().map_err(|_| CommandError::InvalidNumber {
        command,
        input: raw.to_string(),
    })
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(text: &str) -> (&str, &str) {
    match text.trim().split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text.trim(), ""),
    }
}

fn next_word<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    parts
        .next()
        .map(str::to_string)
        .ok_or(CommandError::MissingArgument { command, argument })
}

fn required(rest: &str, command: &'static str, argument: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn test_filter_forms() {
        let expected = Command::Filter {
            name: "utilization".to_string(),
            value: ">=90".to_string(),
        };
        assert_eq!(parse("filter utilization >=90"), expected);
        assert_eq!(parse("filter utilization=>=90"), expected);
        assert_eq!(parse("  F utilization   >=90  "), expected);
        assert_eq!(
            parse("filter name"),
            Command::Filter {
                name: "name".to_string(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn test_filter_value_keeps_inner_spaces() {
        assert_eq!(
            split_filter_arg("search back entrance"),
            ("search", "back entrance")
        );
        assert_eq!(split_filter_arg("status = pending"), ("status", "pending"));
        assert_eq!(split_filter_arg(""), ("", ""));
    }

    #[test]
    fn test_navigation_and_actions() {
        assert_eq!(parse("page 3"), Command::Page(3));
        assert_eq!(parse("NEXT"), Command::Next);
        assert_eq!(parse("y"), Command::Confirm);
        assert_eq!(parse("no"), Command::Cancel);
        assert_eq!(parse("add  Lake Side "), Command::Add("Lake Side".to_string()));
        assert_eq!(parse("delete 4"), Command::Delete("4".to_string()));
        assert_eq!(parse("view requests"), Command::View("requests".to_string()));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_command("page two"),
            Err(CommandError::InvalidNumber {
                command: "page",
                input: "two".to_string(),
            })
        );
        assert_eq!(
            parse_command("delete"),
            Err(CommandError::MissingArgument {
                command: "delete",
                argument: "record id",
            })
        );
        assert!(matches!(parse_command("filter"), Err(CommandError::MissingArgument { .. })));
        assert!(matches!(parse_command("dance"), Err(CommandError::Unknown { .. })));
    }

    #[test]
    fn test_collect_and_edit() {
        assert_eq!(
            parse("collect 3 paper 2.5"),
            Command::Collect {
                id: "3".to_string(),
                kind: "paper".to_string(),
                weight_kg: 2.5,
            }
        );
        assert_eq!(
            parse_command("collect 3 paper lots"),
            Err(CommandError::InvalidNumber {
                command: "collect",
                input: "lots".to_string(),
            })
        );
        assert!(matches!(parse_command("collect 3"), Err(CommandError::MissingArgument { .. })));
        assert_eq!(
            parse("edit 2 name  Jane  Q Smith "),
            Command::Edit {
                id: "2".to_string(),
                field: "name".to_string(),
                value: "Jane  Q Smith".to_string(),
            }
        );
        assert!(matches!(parse_command("edit 2 phone"), Err(CommandError::MissingArgument { .. })));
    }

    #[test]
    fn test_request_wizard_commands() {
        assert_eq!(parse("new-request"), Command::NewRequest);
        match parse("address 12, Canal Road , Ludhiana, Ludhiana, Punjab, 141001") {
            Command::Address(address) => {
                assert_eq!(address.street, "Canal Road");
                assert_eq!(address.pincode, "141001");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_command("address 12, Canal Road"),
            Err(CommandError::MissingArgument { command: "address", .. })
        ));
        assert_eq!(
            parse("event 18.5 2025-04-02 ring the bell"),
            Command::Event(EventDetails {
                garbage_weight: 18.5,
                date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                notes: "ring the bell".to_string(),
            })
        );
        assert_eq!(
            parse_command("event 18.5 02/04/2025"),
            Err(CommandError::InvalidDate {
                command: "event",
                input: "02/04/2025".to_string(),
            })
        );
        assert_eq!(
            parse_command("event 18.5"),
            Err(CommandError::MissingArgument {
                command: "event",
                argument: "collection date",
            })
        );
        assert_eq!(parse("back"), Command::Back);
        assert_eq!(parse("discard"), Command::Discard);
    }
}
