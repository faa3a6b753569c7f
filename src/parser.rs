use std::path::PathBuf;

use log::debug;

use crate::config::Limits;
use crate::error::ParseError;
use crate::types::{Pipeline, Stage};

type ParseResult<T> = Result<T, ParseError>;

/// Validates and tokenizes one raw line into a `Pipeline`.
///
/// Runs the pipe-placement check, the stage split, per-stage tokenization
/// and the ampersand validation in that order; the first failure discards
/// the whole line. The input is never mutated, so re-running on the same
/// line always yields the same result.
pub fn parse(line: &str, limits: &Limits) -> ParseResult<Pipeline> {
	check_pipes(line)?;
	let mut stages = Vec::new();
	for segment in split_stages(line, limits)? {
		stages.push(tokenize_stage(segment, limits)?);
	}
	let mut pipeline = Pipeline { stages, background: false };
	take_background(&mut pipeline)?;
	debug!(
		"parsed {} stage(s), background: {}",
		pipeline.stages.len(),
		pipeline.background
	);
	Ok(pipeline)
}

/// Rejects a line whose pipe bars cannot delimit non-empty commands: a bar
/// before any word, two bars with only whitespace between, a trailing bar,
/// or a line of bars and whitespace alone (which includes a line of
/// whitespace alone).
fn check_pipes(line: &str) -> ParseResult<()> {
	// whether a word has appeared since the last bar
	let mut seen_word = false;
	for c in line.chars() {
		if c == '|' {
			if !seen_word {
				return Err(ParseError::InvalidPipeUsage);
			}
			seen_word = false;
		} else if !c.is_whitespace() {
			seen_word = true;
		}
	}
	if !seen_word {
		return Err(ParseError::InvalidPipeUsage);
	}
	Ok(())
}

/// Splits the line at each pipe bar, discarding the bars. The first segment
/// becomes the upstream stage, the second the downstream one.
fn split_stages<'a>(line: &'a str, limits: &Limits) -> ParseResult<Vec<&'a str>> {
	let segments: Vec<&str> = line.split('|').collect();
	if segments.len() > limits.max_stages {
		return Err(ParseError::TooManyCommands);
	}
	Ok(segments)
}

/// Splits a stage segment on whitespace and classifies the tokens.
///
/// `<` and `>` each consume the following token as a redirection path and
/// neither reaches the argv; every other token is appended to the argv in
/// encountered order. An operator at the end of the segment has no target
/// and is rejected outright.
fn tokenize_stage(segment: &str, limits: &Limits) -> ParseResult<Stage> {
	let tokens: Vec<&str> = segment.split_whitespace().collect();
	if tokens.len() > limits.max_args {
		return Err(ParseError::TooManyArguments);
	}

	let mut argv: Vec<String> = Vec::new();
	let mut input: Option<PathBuf> = None;
	let mut output: Option<PathBuf> = None;
	let mut it = tokens.iter();
	while let Some(&token) = it.next() {
		match token {
			"<" => match it.next() {
				Some(&target) => input = Some(PathBuf::from(target)),
				None => return Err(ParseError::MissingRedirectTarget('<')),
			},
			">" => match it.next() {
				Some(&target) => output = Some(PathBuf::from(target)),
				None => return Err(ParseError::MissingRedirectTarget('>')),
			},
			_ => argv.push(token.to_string()),
		}
	}

	if argv.is_empty() {
		return Err(ParseError::EmptyCommand);
	}
	Ok(Stage { argv, input, output })
}

/// Scans every stage's argv for the background marker. `&` is legal only as
/// the very last argument of the final stage; on success it is stripped so
/// it never reaches exec, and the pipeline's background flag is set.
fn take_background(pipeline: &mut Pipeline) -> ParseResult<()> {
	let last = pipeline.stages.len() - 1;
	for (i, stage) in pipeline.stages.iter().enumerate() {
		for (j, arg) in stage.argv.iter().enumerate() {
			if arg == "&" && (i != last || j != stage.argv.len() - 1) {
				return Err(ParseError::UnexpectedAmpersand);
			}
		}
	}

	let final_stage = &mut pipeline.stages[last];
	if final_stage.argv.last().map(String::as_str) == Some("&") {
		final_stage.argv.pop();
		pipeline.background = true;
		if final_stage.argv.is_empty() {
			return Err(ParseError::EmptyCommand);
		}
	}
	Ok(())
}
