//! Reads commands and pumps session messages concurrently.

use std::io::Write;

use enlist_form::{Dirty, FormSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::command::{Command, HELP};
use crate::render::render;

/// Whether the driver should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
	Continue,
	Quit,
}

/// Runs commands from `input` against `session`, writing output to `out`.
///
/// The view is printed after every command that changes it and after every
/// applied message that changes it. At end of input, outstanding lookups are
/// allowed to finish before the final view is printed.
pub async fn run<R, W>(session: &mut FormSession, input: R, out: &mut W) -> anyhow::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: Write,
{
	let mut lines = input.lines();
	loop {
		let pending = session.has_pending_work();
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else {
					break;
				};
				if execute(session, &line, out).await? == Flow::Quit {
					return Ok(());
				}
			}
			dirty = session.pump(), if pending => {
				redraw(session, dirty, out)?;
			}
		}
	}

	debug!("driver.eof");
	let dirty = session.pump_until_idle().await;
	redraw(session, dirty, out)?;
	Ok(())
}

async fn execute<W: Write>(session: &mut FormSession, line: &str, out: &mut W) -> anyhow::Result<Flow> {
	if line.trim().is_empty() || line.trim_start().starts_with('#') {
		return Ok(Flow::Continue);
	}
	let command = match line.parse::<Command>() {
		Ok(command) => command,
		Err(err) => {
			writeln!(out, "error: {err}")?;
			return Ok(Flow::Continue);
		}
	};
	debug!(?command, "driver.command");

	let dirty = match command {
		Command::Type(text) => session.on_raw_value_change(text),
		Command::Keys(text) => {
			let mut typed = String::new();
			let mut dirty = Dirty::NONE;
			for ch in text.chars() {
				typed.push(ch);
				dirty |= session.on_raw_value_change(typed.clone());
			}
			dirty
		}
		Command::Location(location) => {
			let dirty = session.on_location_change(&location);
			if dirty.is_empty() && !location.is_empty() {
				writeln!(out, "error: unknown location '{location}'")?;
			}
			dirty
		}
		Command::Add => match session.on_commit() {
			Some(record) => {
				writeln!(out, "added {} | {}", record.name, record.location)?;
				Dirty::NAME | Dirty::LOCATIONS | Dirty::RECORDS
			}
			None => {
				writeln!(out, "add is disabled")?;
				Dirty::NONE
			}
		},
		Command::Clear => session.on_clear(),
		Command::Wait(duration) => {
			let deadline = tokio::time::Instant::now() + duration;
			let mut dirty = Dirty::NONE;
			loop {
				let pending = session.has_pending_work();
				tokio::select! {
					_ = tokio::time::sleep_until(deadline) => break,
					applied = session.pump(), if pending => dirty |= applied,
				}
			}
			dirty
		}
		Command::Show => {
			write!(out, "{}", render(&session.view()))?;
			Dirty::NONE
		}
		Command::Help => {
			writeln!(out, "{HELP}")?;
			Dirty::NONE
		}
		Command::Quit => return Ok(Flow::Quit),
	};

	redraw(session, dirty, out)?;
	Ok(Flow::Continue)
}

fn redraw<W: Write>(session: &FormSession, dirty: Dirty, out: &mut W) -> std::io::Result<()> {
	if dirty.needs_redraw() {
		write!(out, "{}", render(&session.view()))?;
		out.flush()?;
	}
	Ok(())
}
