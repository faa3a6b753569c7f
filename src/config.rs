/// Behavioral limits of the interpreter.
///
/// These are checks on what a line may contain, not storage sizes; the
/// parsed structures grow dynamically and the bounds are enforced by the
/// validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
	/// Longest accepted input line, in bytes, excluding the newline.
	pub max_line: usize,
	/// Most pipe-separated stages per line.
	pub max_stages: usize,
	/// Most whitespace-separated tokens per stage.
	pub max_args: usize,
}

impl Default for Limits {
	fn default() -> Limits {
		Limits {
			max_line: 80,
			max_stages: 2,
			max_args: 40,
		}
	}
}
