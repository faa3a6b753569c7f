use std::io::BufRead;

use crate::config::Limits;
use crate::error::ReadError;
use crate::types::Pipeline;

/// What the line store hands back to the read-eval loop.
#[derive(Debug)]
pub enum ReadOutcome {
	/// A raw line to be validated and tokenized.
	Fresh(String),
	/// `!!`: a copy of the previously accepted pipeline, to be relaunched
	/// as-is without reparsing.
	Repeat(Pipeline),
	/// End of input or the `exit` command; the session is over.
	Shutdown,
}

/// Reads one line and classifies it.
///
/// The caller owns the previous-pipeline slot and passes it in each cycle;
/// nothing here holds state between calls. The whole physical line is
/// consumed up to its newline before the length check, so an oversized line
/// leaves no stray bytes behind for the next prompt.
pub fn read_line<R: BufRead>(
	input: &mut R,
	previous: Option<&Pipeline>,
	limits: &Limits,
) -> Result<ReadOutcome, ReadError> {
	let mut raw: Vec<u8> = Vec::new();
	let n = input.read_until(b'\n', &mut raw)?;
	if n == 0 {
		return Ok(ReadOutcome::Shutdown);
	}
	if raw.last() == Some(&b'\n') {
		raw.pop();
	}
	if raw.len() > limits.max_line {
		return Err(ReadError::LineTooLong);
	}

	let line = String::from_utf8_lossy(&raw).into_owned();
	match line.as_str() {
		"" => Err(ReadError::Empty),
		"exit" => Ok(ReadOutcome::Shutdown),
		"!!" => match previous {
			Some(p) => Ok(ReadOutcome::Repeat(p.clone())),
			None => Err(ReadError::NoHistory),
		},
		_ => Ok(ReadOutcome::Fresh(line)),
	}
}
