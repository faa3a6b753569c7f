use std::path::PathBuf;

/// One program invocation within a pipeline.
///
/// `argv` holds the program name first, then its arguments, in input order.
/// Redirection paths are recorded here; the descriptors themselves are only
/// opened later by the redirection resolver, so a `Stage` stays plain data
/// that can be cloned for the repeat feature. A stage with neither path set
/// inherits its streams from the pipeline wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
	pub argv: Vec<String>,
	pub input: Option<PathBuf>,
	pub output: Option<PathBuf>,
}

/// A fully parsed input line: one or two stages in left-to-right pipeline
/// order, plus the detach flag set by a trailing `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
	pub stages: Vec<Stage>,
	pub background: bool,
}
