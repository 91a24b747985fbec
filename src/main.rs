use std::{
	io::{self, IsTerminal, Write},
	ops::Range,
	process::ExitCode,
};

use ariadne::{Label, Report, ReportKind, Source};
use clap::Parser;
use diceroller::{
	command::Command,
	dice::{roller::FastRand as FastRandRoller, Describe},
	Error, Expr, Limits,
};
use tracing_subscriber::EnvFilter;

/// Rolls chat-style dice expressions like "2d6 + 4d20 + 7"
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
	/// Expression to roll. Reads a line from stdin if omitted; an empty expression rolls a single d20.
	expr: Vec<String>,

	/// Maximum number of dice (and modifiers) per expression
	#[arg(long, default_value_t = Limits::DEFAULT.max_count)]
	max_dice: u32,

	/// Maximum number of sides per die, also used as the maximum modifier
	#[arg(long, default_value_t = Limits::DEFAULT.max_sides)]
	max_sides: u32,

	/// Command token the expression is passed to
	#[arg(long, default_value = Command::DEFAULT_NAME)]
	command: String,

	/// Seed for the random number generator, for reproducible rolls
	#[arg(long)]
	seed: Option<u64>,

	/// Maximum number of values to list per term in the detailed description
	#[arg(long)]
	list_limit: Option<usize>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let input = if args.expr.is_empty() {
		match read_stdin_line() {
			Ok(line) => line,
			Err(err) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		// Combine all args so that the expression can be left unquoted even with spaces
		args.expr.join(" ")
	};
	let input = input.trim_matches(|c: char| c.is_ascii_whitespace());

	let command = Command::new(args.command, Limits::new(args.max_dice, args.max_sides));
	let mut roller = args.seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);

	let message = format!("{} {input}", command.name);
	let Some(result) = command.run(&message, &mut roller) else {
		eprintln!("Command token {} isn't usable as a command", command.name);
		return ExitCode::FAILURE;
	};

	match result {
		Ok(outcome) => {
			println!("{outcome}");
			println!("Described: {}", outcome.describe(args.list_limit));
			ExitCode::SUCCESS
		}
		Err(err) => {
			report(input, &err);
			ExitCode::FAILURE
		}
	}
}

/// Reads the first line available from stdin, displaying a prompt if stdin is interactive.
fn read_stdin_line() -> io::Result<String> {
	let stdin = io::stdin();
	if stdin.is_terminal() {
		print!("Enter dice expression: ");
		io::stdout().flush()?;
	}

	let mut line = String::new();
	stdin.read_line(&mut line)?;
	Ok(line)
}

/// Prints an error, pointing at the offending term within the expression when there is one.
fn report(input: &str, err: &Error) {
	if err.is_internal() {
		tracing::error!(%err, "internal error while rolling");
	}

	let located = err
		.term()
		.zip(Expr::parse(input).ok())
		.and_then(|(term, expr)| term_span(&expr, term).map(|span| (expr.to_string(), span)));

	let Some((source, span)) = located else {
		eprintln!("{err}");
		return;
	};

	let printed = Report::build(ReportKind::Error, span.clone())
		.with_message(err.to_string())
		.with_label(Label::new(span).with_message(if err.is_internal() {
			"while rolling this"
		} else {
			"this term"
		}))
		.finish()
		.eprint(Source::from(source));

	if printed.is_err() {
		eprintln!("{err}");
	}
}

/// Finds the span of a term within the [`Display`](std::fmt::Display) output of its expression.
fn term_span(expr: &Expr, term: &str) -> Option<Range<usize>> {
	if term.is_empty() {
		return None;
	}

	let mut start = 0;
	for candidate in expr.terms() {
		if candidate.as_str() == term {
			return Some(start..start + term.len());
		}
		start += candidate.as_str().len() + " + ".len();
	}
	None
}
