//! Line-oriented command input.

use anyhow::{bail, Context, Result};
use hazardmap_app::Command;
use hazardmap_core::models::{CategoryId, Limit, StatusFilter};
use hazardmap_ui::ControlEvent;

pub const USAGE: &str = "\
Commands:
  status <open|closed|all>   Change the status filter
  limit <25|50|100>          Change the event limit
  toggle <category-id>       Toggle a category filter
  select <event-id>          Show event details
  zoom <event-id>            Zoom to an event on the map
  hover <event-id>           Highlight an event
  unhover <event-id>         Remove the highlight
  help                       Show this help
  quit                       Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if words.next().is_some() {
        bail!("Too many arguments for '{}'", verb);
    }

    let input = match verb.to_lowercase().as_str() {
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Command(Command::Shutdown),
        "status" => {
            let status: StatusFilter = required(verb, argument)?.parse()?;
            Input::Command(Command::Control(ControlEvent::StatusChanged(status)))
        }
        "limit" => {
            let limit: Limit = required(verb, argument)?.parse()?;
            Input::Command(Command::Control(ControlEvent::LimitChanged(limit)))
        }
        "toggle" => {
            let raw = required(verb, argument)?;
            let id: CategoryId = raw
                .parse()
                .with_context(|| format!("Invalid category id '{}'", raw))?;
            Input::Command(Command::Control(ControlEvent::CategoryToggled(id)))
        }
        "select" => Input::Command(Command::Select(required(verb, argument)?.to_string())),
        "zoom" => Input::Command(Command::Zoom(required(verb, argument)?.to_string())),
        "hover" | "unhover" => Input::Command(Command::Hover {
            event_id: required(verb, argument)?.to_string(),
            hovering: verb.eq_ignore_ascii_case("hover"),
        }),
        _ => bail!("Unknown command '{}'. Type 'help' for usage.", verb),
    };
    Ok(Some(input))
}

fn required<'a>(verb: &str, argument: Option<&'a str>) -> Result<&'a str> {
    match argument {
        Some(value) => Ok(value),
        None => bail!("'{}' needs an argument. Type 'help' for usage.", verb),
    }
}
