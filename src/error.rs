use std::ffi;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Syntax errors in a submitted line. The line is discarded and the session
/// re-prompts; none of these are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("Invalid pipe usage.")]
	InvalidPipeUsage,
	#[error("Too many commands. Please try again.")]
	TooManyCommands,
	#[error("Too many arguments. Please try again.")]
	TooManyArguments,
	#[error("Syntax error, unexpected & token.")]
	UnexpectedAmpersand,
	#[error("Missing file name after '{0}'.")]
	MissingRedirectTarget(char),
	#[error("Missing command.")]
	EmptyCommand,
}

/// Outcomes of reading a line that do not produce text to parse.
///
/// `Empty` asks for a silent re-prompt and carries no message the loop
/// should print.
#[derive(Debug, Error)]
pub enum ReadError {
	#[error("empty command line")]
	Empty,
	#[error("Command line too long. Please try again")]
	LineTooLong,
	#[error("No commands in history.")]
	NoHistory,
	#[error("{0}")]
	Io(#[from] io::Error),
}

/// A redirection target that could not be opened. Detected strictly before
/// any fork, so no child is ever left holding half a pipeline.
#[derive(Debug, Error)]
pub enum RedirectError {
	#[error("Unable to open {} for input: {source}", path.display())]
	Input { path: PathBuf, source: io::Error },
	#[error("Unable to open {} for output: {source}", path.display())]
	Output { path: PathBuf, source: io::Error },
}

/// Failures on the child side of a fork, between the descriptor wiring and
/// the `execvp` call. These never propagate to the parent; the child reports
/// and exits with a failure status.
#[derive(Debug, Error)]
pub enum ExecError {
	#[error("Command \"{0}\" not found")]
	NotFound(String),
	#[error("{0}")]
	Sys(#[from] nix::Error),
	#[error("{0}")]
	Nul(#[from] ffi::NulError),
}
