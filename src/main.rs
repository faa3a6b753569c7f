mod config;
mod error;
mod exec;
mod parser;
mod reader;
mod redirect;
mod types;

use std::io::{self, Write};
use std::process;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use config::Limits;
use error::ReadError;
use reader::ReadOutcome;
use types::Pipeline;

const PROMPT: &str = "osh> ";

fn init_logger() {
	let level = std::env::var("OSH_LOG")
		.ok()
		.and_then(|v| v.parse::<LevelFilter>().ok())
		.unwrap_or(LevelFilter::Warn);
	let _ = TermLogger::init(
		level,
		Config::default(),
		TerminalMode::Stderr,
		ColorChoice::Auto,
	);
}

fn main() {
	init_logger();
	let limits = Limits::default();
	let stdin = io::stdin();
	let mut input = stdin.lock();
	let mut stdout = io::stdout();
	// single-slot history for the `!!` repeat; owned here, only cloned into
	// the cycles that ask for it
	let mut previous: Option<Pipeline> = None;

	loop {
		let _ = stdout.write_all(PROMPT.as_bytes());
		let _ = stdout.flush();

		let pipeline = match reader::read_line(&mut input, previous.as_ref(), &limits) {
			Ok(ReadOutcome::Shutdown) => {
				println!("Exiting...");
				break;
			}
			Ok(ReadOutcome::Repeat(p)) => p,
			Ok(ReadOutcome::Fresh(line)) => match parser::parse(&line, &limits) {
				Ok(p) => {
					previous = Some(p.clone());
					p
				}
				Err(e) => {
					eprintln!("{}\n", e);
					continue;
				}
			},
			Err(ReadError::Empty) => continue,
			Err(ReadError::Io(e)) => {
				eprintln!("osh: {}", e);
				break;
			}
			Err(e) => {
				eprintln!("{}\n", e);
				continue;
			}
		};

		let stage_io = match redirect::resolve(&pipeline) {
			Ok(stage_io) => stage_io,
			Err(e) => {
				eprintln!("{}\n", e);
				continue;
			}
		};

		if let Err(e) = exec::launch(&pipeline, &stage_io) {
			// pipe or fork creation failed: the host cannot support further
			// process creation, so re-prompting cannot help
			eprintln!("osh: {}", e);
			process::exit(1);
		}
	}
}
