use std::convert::Infallible;
use std::ffi::CString;
use std::os::fd::{AsRawFd, OwnedFd};

use libc::{STDIN_FILENO, STDOUT_FILENO};
use log::debug;
use nix::fcntl::OFlag;
use nix::sys::wait::wait;
use nix::unistd::{self, dup2, ForkResult};

use crate::error::ExecError;
use crate::redirect::StageIo;
use crate::types::{Pipeline, Stage};

/// Forks and execs the pipeline's stages, wiring the pipe and any resolved
/// file descriptors, then waits once per spawned stage unless the pipeline
/// is detached.
///
/// An `Err` from here means pipe or fork creation failed; the caller treats
/// that as fatal to the whole program. Exec failures inside a child never
/// surface here — the child reports them itself and exits nonzero.
pub fn launch(pipeline: &Pipeline, io: &[StageIo]) -> nix::Result<()> {
	let nstages = pipeline.stages.len();
	assert!(nstages >= 1 && io.len() == nstages);
	let piped = nstages > 1;

	// Both ends close-on-exec: dup2 below clears the flag on the copies the
	// children actually use, and exec drops every stray end on its own.
	let (pipe_read, pipe_write) = if piped {
		let (r, w) = unistd::pipe2(OFlag::O_CLOEXEC)?;
		(Some(r), Some(w))
	} else {
		(None, None)
	};

	// Upstream stage: stdout goes to the pipe unless a file redirection
	// takes precedence.
	match unsafe { unistd::fork() }? {
		ForkResult::Child => {
			run_child(&pipeline.stages[0], &io[0], None, pipe_write.as_ref())
		}
		ForkResult::Parent { child } => {
			debug!("stage 1 spawned as pid {}", child);
		}
	}
	// The write end now lives only in the upstream child; keeping it open
	// here would stop the downstream stage from ever seeing end-of-stream.
	drop(pipe_write);

	// Downstream stage: stdin comes from the pipe unless a file redirection
	// takes precedence.
	if piped {
		match unsafe { unistd::fork() }? {
			ForkResult::Child => {
				run_child(&pipeline.stages[1], &io[1], pipe_read.as_ref(), None)
			}
			ForkResult::Parent { child } => {
				debug!("stage 2 spawned as pid {}", child);
			}
		}
	}
	drop(pipe_read);

	if pipeline.background {
		debug!("pipeline detached, not waiting");
		return Ok(());
	}

	// One termination per spawned stage, in whatever order they finish.
	for _ in 0..nstages {
		match wait() {
			Ok(status) => debug!("reaped {:?}", status),
			Err(e) => {
				debug!("wait: {}", e);
				break;
			}
		}
	}
	Ok(())
}

/// Child side of a fork: wire descriptors, exec, and on failure report and
/// terminate this process only. Never returns to the pipeline launcher.
fn run_child(
	stage: &Stage,
	io: &StageIo,
	pipe_stdin: Option<&OwnedFd>,
	pipe_stdout: Option<&OwnedFd>,
) -> ! {
	let status = match wire_and_exec(stage, io, pipe_stdin, pipe_stdout) {
		Ok(never) => match never {},
		Err(e @ ExecError::NotFound(_)) => {
			eprintln!("{}", e);
			127
		}
		Err(e) => {
			eprintln!("osh: {}", e);
			126
		}
	};
	// a forked child must not unwind back into the prompt loop
	unsafe { libc::_exit(status) }
}

fn wire_and_exec(
	stage: &Stage,
	io: &StageIo,
	pipe_stdin: Option<&OwnedFd>,
	pipe_stdout: Option<&OwnedFd>,
) -> Result<Infallible, ExecError> {
	// file redirections win over pipe wiring
	if let Some(file) = &io.stdin {
		dup2(file.as_raw_fd(), STDIN_FILENO)?;
	} else if let Some(fd) = pipe_stdin {
		dup2(fd.as_raw_fd(), STDIN_FILENO)?;
	}
	if let Some(file) = &io.stdout {
		dup2(file.as_raw_fd(), STDOUT_FILENO)?;
	} else if let Some(fd) = pipe_stdout {
		dup2(fd.as_raw_fd(), STDOUT_FILENO)?;
	}

	let argv: Vec<CString> = stage
		.argv
		.iter()
		.map(|a| CString::new(a.as_str()))
		.collect::<Result<_, _>>()?;
	unistd::execvp(&argv[0], &argv).map_err(|_| ExecError::NotFound(stage.argv[0].clone()))?;
	unreachable!()
}
