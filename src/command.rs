//! Entry point for chat hosts: recognizing the roll command in a message and producing the reply.

use alloc::{
	string::{String, ToString},
	vec,
};

use tracing::{debug, warn};

use crate::{
	dice::{roller::Roller, Dice, DiceSpec},
	error::Error,
	expr::{Expr, Outcome},
	limits::Limits,
	term::Term,
};

/// Roll command settings
///
/// # Examples
/// ```
/// use diceroller::{dice::roller::Iter as IterRoller, Command};
///
/// let command = Command::default();
/// let mut roller = IterRoller::new([4, 5, 12]);
///
/// let reply = command.run("!roll 2d6 + 7", &mut roller).unwrap()?;
/// assert_eq!(reply.to_string(), "Rolling 2d6 + 7...   4 + 5 + 7 = 16");
///
/// let reply = command.run("!ROLL", &mut roller).unwrap()?;
/// assert_eq!(reply.to_string(), "Rolling 1d20... 12");
///
/// assert!(command.run("hello there", &mut roller).is_none());
/// # Ok::<(), diceroller::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[expect(clippy::exhaustive_structs, reason = "Settings are meant to be built field by field")]
pub struct Command {
	/// Token that a message has to start with to be a roll request (matched case-insensitively)
	pub name: String,

	/// Limits to evaluate expressions with
	pub limits: Limits,
}

impl Command {
	/// Name of the command unless otherwise configured
	pub const DEFAULT_NAME: &'static str = "!roll";

	/// Creates a new command with the given name and limits.
	#[must_use]
	pub fn new(name: impl Into<String>, limits: Limits) -> Self {
		Self {
			name: name.into(),
			limits,
		}
	}

	/// Works out what a message asks for. Returns [`None`] if the message isn't addressed to this command at all.
	///
	/// Only the ASCII space separates the command token from the expression. Any other whitespace is left in place
	/// for [`Expr::parse()`] to reject.
	///
	/// # Examples
	/// ```
	/// use diceroller::{command::Invocation, Command};
	///
	/// let command = Command::default();
	/// assert_eq!(command.invocation("!roll 2d6 + 1"), Some(Invocation::Expr("2d6 + 1")));
	/// assert_eq!(command.invocation("!Roll   "), Some(Invocation::Default));
	/// assert_eq!(command.invocation("!rolling 2d6"), None);
	/// ```
	#[must_use]
	pub fn invocation<'m>(&self, message: &'m str) -> Option<Invocation<'m>> {
		let message = message.trim_start_matches(' ');
		let (token, rest) = message.split_once(' ').unwrap_or((message, ""));

		if !token.eq_ignore_ascii_case(&self.name) {
			return None;
		}

		let rest = rest.trim_matches(' ');
		Some(if rest.is_empty() {
			Invocation::Default
		} else {
			Invocation::Expr(rest)
		})
	}

	/// Handles a message: evaluates the expression after the command token, or performs the [default
	/// roll](Self::default_roll()) if there's nothing after it. Returns [`None`] if the message isn't addressed to this
	/// command.
	///
	/// # Errors
	/// Any error from [`Expr::parse()`], [`Expr::eval()`] or [`Self::default_roll()`].
	pub fn run(&self, message: &str, roller: &mut impl Roller) -> Option<Result<Outcome, Error>> {
		let invocation = self.invocation(message)?;
		debug!(command = %self.name, ?invocation, "handling roll command");

		Some(match invocation {
			Invocation::Default => Self::default_roll(roller),
			Invocation::Expr(raw) => Expr::parse(raw).and_then(|expr| expr.eval(&self.limits, roller)),
		})
	}

	/// Rolls a single d20. No limits apply, but values from the roller are still checked.
	///
	/// # Errors
	/// If the roller produces a value outside of `1..=20`, [`Error::RngRangeViolation`] is returned.
	pub fn default_roll(roller: &mut impl Roller) -> Result<Outcome, Error> {
		let spec = DiceSpec::Dice(Dice::default());
		let rolled = roller.roll(&spec).map_err(|source| {
			warn!(%spec, %source, "roller produced an out-of-range value");
			Error::RngRangeViolation {
				term: spec.to_string(),
				source,
			}
		})?;

		Outcome::new(vec![Term::from(spec)], vec![rolled]).map(Outcome::into_default_roll)
	}
}

impl Default for Command {
	fn default() -> Self {
		Self::new(Self::DEFAULT_NAME, Limits::default())
	}
}

/// What a message addressed to the roll command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::exhaustive_enums, reason = "There's either something to roll or there isn't")]
pub enum Invocation<'m> {
	/// Nothing follows the command token
	Default,

	/// Raw expression text following the command token
	Expr(&'m str),
}
