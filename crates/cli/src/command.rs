//! Driver command grammar.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  type <text>       replace the name with <text>
  keys <text>       type <text> one character at a time
  location [name]   select a location (no name clears it)
  add               commit the entry if the form allows it
  clear             remove all committed entries
  wait <ms>         let time pass while lookups complete
  show              print the form
  help              print this text
  quit              exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Type(String),
	Keys(String),
	Location(String),
	Add,
	Clear,
	Wait(Duration),
	Show,
	Help,
	Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
	#[error("empty command")]
	Empty,
	#[error("unknown command '{0}' (try 'help')")]
	Unknown(String),
	#[error("'{0}' expects an argument")]
	MissingArgument(&'static str),
	#[error("invalid duration '{0}': expected milliseconds")]
	InvalidDuration(String),
}

impl FromStr for Command {
	type Err = CommandError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let line = line.trim_start();
		let (verb, rest) = match line.split_once(char::is_whitespace) {
			Some((verb, rest)) => (verb, rest),
			None => (line.trim_end(), ""),
		};

		match verb {
			"" => Err(CommandError::Empty),
			// The name is taken verbatim so surrounding whitespace can be typed.
			"type" => Ok(Self::Type(rest.to_string())),
			"keys" if rest.is_empty() => Err(CommandError::MissingArgument("keys")),
			"keys" => Ok(Self::Keys(rest.to_string())),
			"location" => Ok(Self::Location(rest.trim().to_string())),
			"add" => Ok(Self::Add),
			"clear" => Ok(Self::Clear),
			"wait" => {
				let ms = rest.trim();
				if ms.is_empty() {
					return Err(CommandError::MissingArgument("wait"));
				}
				ms.parse::<u64>()
					.map(|ms| Self::Wait(Duration::from_millis(ms)))
					.map_err(|_| CommandError::InvalidDuration(ms.to_string()))
			}
			"show" => Ok(Self::Show),
			"help" | "?" => Ok(Self::Help),
			"quit" | "exit" => Ok(Self::Quit),
			other => Err(CommandError::Unknown(other.to_string())),
		}
	}
}
