use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

use crate::error::RedirectError;
use crate::types::Pipeline;

/// Descriptors a stage's redirections resolved to. `None` means the stream
/// stays on the pipeline wiring (pipe end or inherited terminal).
#[derive(Debug)]
pub struct StageIo {
	pub stdin: Option<File>,
	pub stdout: Option<File>,
}

/// Opens every redirection target of the pipeline, one `StageIo` per stage
/// in stage order.
///
/// Input targets must exist and be readable; output targets are created if
/// absent and truncated if present, mode 0o666 before the umask. This runs
/// strictly before any fork, so an unopenable file discards the line without
/// ever spawning a child.
pub fn resolve(pipeline: &Pipeline) -> Result<Vec<StageIo>, RedirectError> {
	let mut resolved = Vec::with_capacity(pipeline.stages.len());
	for stage in &pipeline.stages {
		let stdin = match &stage.input {
			Some(path) => Some(File::open(path).map_err(|source| RedirectError::Input {
				path: path.clone(),
				source,
			})?),
			None => None,
		};
		let stdout = match &stage.output {
			Some(path) => Some(
				OpenOptions::new()
					.write(true)
					.create(true)
					.truncate(true)
					.mode(0o666)
					.open(path)
					.map_err(|source| RedirectError::Output {
						path: path.clone(),
						source,
					})?,
			),
			None => None,
		};
		resolved.push(StageIo { stdin, stdout });
	}
	Ok(resolved)
}
