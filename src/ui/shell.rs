// WasteDesk - ui/shell.rs
//
// Line-oriented interactive browser. Reads commands from any `BufRead`,
// applies them to the dashboard state, and writes the refreshed table to
// any `Write`. Bad input is reported and the session continues.

use crate::app::command::{self, Command};
use crate::app::state::DashboardState;
use crate::core::model::ViewKind;
use crate::ui::render;
use crate::util::error::{ActionError, WasteDeskError};
use std::io::{self, BufRead, Write};

const ADDRESS_USAGE: &str = "address <house>, <street>, <city>, <district>, <state>, <pincode>";
const EVENT_USAGE: &str = "event <weight kg> <YYYY-MM-DD> [notes]  (or 'back')";

/// Outcome of one command, telling the loop what to redraw.
enum Step {
    /// Redraw the current table.
    Redraw,
    /// Output already written; nothing to redraw.
    Done,
    Quit,
}

fn io_error(source: io::Error) -> WasteDeskError {
    WasteDeskError::Io {
        operation: "writing to terminal",
        source,
    }
}

/// Run the browser until `quit` or end of input.
pub fn run<I: BufRead, O: Write>(
    state: &mut DashboardState,
    start: ViewKind,
    input: I,
    output: &mut O,
) -> Result<(), WasteDeskError> {
    let mut view = start;
    tracing::info!(view = view.label(), "Interactive session started");

    render::render_table(output, &state.view(view).table()).map_err(io_error)?;
    prompt(output, view)?;

    for line in input.lines() {
        let line = line.map_err(|e| WasteDeskError::Io {
            operation: "reading input",
            source: e,
        })?;

        let step = match command::parse_command(&line) {
            Ok(Some(cmd)) => execute(state, &mut view, cmd, output),
            Ok(None) => Ok(Step::Done),
            Err(e) => Err(e.into()),
        };

        match step {
            Ok(Step::Quit) => break,
            Ok(Step::Redraw) => {
                render::render_table(output, &state.view(view).table()).map_err(io_error)?;
            }
            Ok(Step::Done) => {}
            Err(e @ WasteDeskError::Io { .. }) => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Command rejected");
                writeln!(output, "Error: {e}").map_err(io_error)?;
            }
        }
        prompt(output, view)?;
    }

    tracing::info!("Interactive session ended");
    Ok(())
}

fn prompt<O: Write>(output: &mut O, view: ViewKind) -> Result<(), WasteDeskError> {
    write!(output, "{view}> ").map_err(io_error)?;
    output.flush().map_err(io_error)
}

fn execute<O: Write>(
    state: &mut DashboardState,
    view: &mut ViewKind,
    cmd: Command,
    output: &mut O,
) -> Result<Step, WasteDeskError> {
    // While a delete awaits confirmation only yes/no/help/quit are accepted.
    if let Some(pending) = state.pending_delete() {
        if !matches!(
            cmd,
            Command::Confirm | Command::Cancel | Command::Help | Command::Quit
        ) {
            writeln!(
                output,
                "Delete '{}' from {}? Type 'yes' to delete or 'no' to keep it.",
                pending.title, pending.view
            )
            .map_err(io_error)?;
            return Ok(Step::Done);
        }
    }

    let current = *view;
    match cmd {
        Command::Filter { name, value } => {
            state.view_mut(current).set_filter_input(&name, &value)?;
            Ok(Step::Redraw)
        }
        Command::Clear(name) => {
            state.view_mut(current).clear_filter(&name)?;
            Ok(Step::Redraw)
        }
        Command::Reset => {
            state.view_mut(current).reset_filters();
            Ok(Step::Redraw)
        }
        Command::Page(page) => {
            state.view_mut(current).change_page(page);
            Ok(Step::Redraw)
        }
        Command::Next => {
            state.view_mut(current).next_page();
            Ok(Step::Redraw)
        }
        Command::Prev => {
            state.view_mut(current).prev_page();
            Ok(Step::Redraw)
        }
        Command::First => {
            state.view_mut(current).first_page();
            Ok(Step::Redraw)
        }
        Command::Last => {
            state.view_mut(current).last_page();
            Ok(Step::Redraw)
        }
        Command::View(name) => {
            *view = name.parse::<ViewKind>()?;
            Ok(Step::Redraw)
        }
        Command::Add(name) => {
            require_view(current, ViewKind::Zones, "add")?;
            let notice = state.add_zone(&name)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::Delete(id) => {
            let pending = state.request_delete(current, &id)?;
            writeln!(
                output,
                "Delete '{}' from {}? This cannot be undone. Type 'yes' or 'no'.",
                pending.title, pending.view
            )
            .map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Confirm => {
            let notice = state.confirm_delete()?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::Cancel => {
            let written = match state.cancel_delete() {
                Some(pending) => writeln!(output, "Kept '{}'.", pending.title),
                None => writeln!(output, "Nothing to cancel."),
            };
            written.map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Accept(id) => {
            require_view(current, ViewKind::Requests, "accept")?;
            let notice = state.accept_request(&id)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::Reject(id) => {
            require_view(current, ViewKind::Requests, "reject")?;
            let notice = state.reject_request(&id)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::Collect {
            id,
            kind,
            weight_kg,
        } => {
            require_view(current, ViewKind::Requests, "collect")?;
            let notice = state.record_collected_item(&id, &kind, weight_kg)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::Edit { id, field, value } => {
            require_view(current, ViewKind::Collectors, "edit")?;
            let notice = state.update_collector(&id, &field, &value)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            Ok(Step::Redraw)
        }
        Command::NewRequest => {
            state.start_request();
            writeln!(output, "New collection request. Step 1 of 2: {ADDRESS_USAGE}").map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Address(address) => {
            let notice = state.submit_address(address)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            writeln!(output, "Step 2 of 2: {EVENT_USAGE}").map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Back => {
            state.back_to_address()?;
            let saved = state
                .request_form()
                .and_then(|form| form.address())
                .map(ToString::to_string)
                .unwrap_or_default();
            writeln!(output, "Saved address: {saved}").map_err(io_error)?;
            writeln!(output, "Step 1 of 2: {ADDRESS_USAGE}").map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Event(details) => {
            let notice = state.submit_event(details)?;
            render::render_notice(output, &notice).map_err(io_error)?;
            *view = ViewKind::Requests;
            Ok(Step::Redraw)
        }
        Command::Discard => {
            let written = match state.discard_request() {
                Some(_) => writeln!(output, "Request form discarded."),
                None => writeln!(output, "No request form is open."),
            };
            written.map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Show => Ok(Step::Redraw),
        Command::Filters => {
            let catalog = state.view(current).filter_catalog();
            render::render_filters(output, current, &catalog).map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Summary => {
            render::render_summary(output, &state.summary(), state.recent_collectors())
                .map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Help => {
            writeln!(output, "{}", command::HELP).map_err(io_error)?;
            Ok(Step::Done)
        }
        Command::Quit => Ok(Step::Quit),
    }
}

fn require_view(current: ViewKind, needed: ViewKind, action: &'static str) -> Result<(), ActionError> {
    if current == needed {
        Ok(())
    } else {
        Err(ActionError::Unsupported {
            action,
            view: current.label(),
        })
    }
}
