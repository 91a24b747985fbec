//! Full `+`-separated dice expressions: validating and splitting them into terms, and rolling them into an
//! [`Outcome`].

use alloc::{
	format,
	string::{String, ToString},
	vec,
	vec::Vec,
};
use core::{fmt, str::FromStr};

use tracing::{debug, trace};

use crate::{
	dice::{roller::Roller, Describe, Dice, DiceSpec, Rolled},
	error::Error,
	limits::Limits,
	term::Term,
};

/// Validated sequence of terms to add together, in the order they were written.
///
/// Only the characters of the expression are validated when creating one; the terms themselves are checked when the
/// expression is evaluated, so that errors can point at a specific term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expr {
	/// Terms of the expression (never empty)
	terms: Vec<Term>,
}

impl Expr {
	/// Validates the characters of raw expression text and splits it into terms.
	///
	/// The checks happen in order and the first failure wins:
	/// 1. every character must be ASCII
	/// 2. every character must be a digit, `+`, `d`, `D` or a space
	/// 3. once whitespace is removed and the text is split on `+`, at least one term must be non-empty
	///
	/// Empty terms between other terms (such as in `2d6++3`) are kept, and fail once evaluated.
	///
	/// # Errors
	/// [`Error::NonAsciiInput`], [`Error::InvalidCharacter`] or [`Error::NoTermsFound`], depending on which check fails.
	///
	/// # Examples
	/// ```
	/// use diceroller::{Error, Expr, Term};
	///
	/// let expr = Expr::parse("2d6 + 4d20 + 7")?;
	/// assert_eq!(expr.terms(), &[Term::new("2d6"), Term::new("4d20"), Term::new("7")]);
	///
	/// assert_eq!(Expr::parse("+ +"), Err(Error::NoTermsFound));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn parse(raw: &str) -> Result<Self, Error> {
		if !raw.is_ascii() {
			return Err(Error::NonAsciiInput);
		}

		if let Some(found) = raw.chars().find(|&c| !is_allowed_char(c)) {
			return Err(Error::InvalidCharacter { found });
		}

		let compact = raw.chars().filter(|c| !c.is_whitespace()).collect::<String>();
		let terms = compact.split('+').map(Term::new).collect::<Vec<_>>();
		if terms.iter().all(|term| term.as_str().is_empty()) {
			return Err(Error::NoTermsFound);
		}

		trace!(input = raw, terms = terms.len(), "split expression");
		Ok(Self { terms })
	}

	/// Gets the terms of the expression.
	#[must_use]
	#[inline]
	pub fn terms(&self) -> &[Term] {
		&self.terms
	}

	/// Evaluates every term from left to right and adds up the results.
	///
	/// The number of values across all terms is checked after each term, so the dice limit applies to the expression as
	/// a whole and not just to single terms. Nothing from earlier terms is reported if a later one fails.
	///
	/// # Errors
	/// - Any error from [`Term::eval()`], for the first term that fails
	/// - [`Error::TooManyDice`] if the values across all terms exceed [`Limits::max_count`]
	/// - [`Error::NoValidRoll`] if there are no values or their total is below 1
	///
	/// # Examples
	/// ```
	/// use diceroller::{dice::roller::Iter as IterRoller, Error, Expr, Limits};
	///
	/// let expr = Expr::parse("2d6 + 7")?;
	/// let outcome = expr.eval(&Limits::default(), &mut IterRoller::new([4, 5]))?;
	/// assert_eq!(outcome.values().collect::<Vec<_>>(), vec![4, 5, 7]);
	/// assert_eq!(outcome.total(), 16);
	///
	/// let expr = Expr::parse("3d6 + 3d6 + 3d6 + 3d6")?;
	/// let result = expr.eval(&Limits::default(), &mut IterRoller::new(std::iter::repeat(1)));
	/// assert_eq!(result.unwrap_err(), Error::TooManyDice { max: 10 });
	/// # Ok::<(), Error>(())
	/// ```
	pub fn eval(&self, limits: &Limits, roller: &mut impl Roller) -> Result<Outcome, Error> {
		let mut rolls = Vec::with_capacity(self.terms.len());
		let mut count: usize = 0;

		for term in &self.terms {
			let rolled = term.eval(limits, roller)?;
			if rolled.vals.is_empty() {
				return Err(Error::NoValidRoll);
			}

			count = count.saturating_add(rolled.vals.len());
			if count > limits.max_count as usize {
				return Err(Error::TooManyDice { max: limits.max_count });
			}

			rolls.push(rolled);
		}

		let outcome = Outcome::new(self.terms.clone(), rolls)?;
		debug!(expr = %self, total = outcome.total, "evaluated expression");
		Ok(outcome)
	}
}

impl Default for Expr {
	/// Creates the default expression (1d20).
	#[inline]
	fn default() -> Self {
		Self {
			terms: vec![Term::from(DiceSpec::Dice(Dice::default()))],
		}
	}
}

impl FromStr for Expr {
	type Err = Error;

	#[inline]
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The terms are joined with ` + `, so whitespace the user wrote within terms isn't preserved.
	///
	/// # Examples
	/// ```
	/// use diceroller::Expr;
	///
	/// assert_eq!(Expr::parse("2 d6+7")?.to_string(), "2d6 + 7");
	/// # Ok::<(), diceroller::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", join(self.terms.iter(), " + "))
	}
}

/// Result of successfully evaluating an [`Expr`]: each term along with its values, and the total of them all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	/// Terms that were evaluated
	terms: Vec<Term>,

	/// Values produced by each term (same order and length as `terms`)
	rolls: Vec<Rolled>,

	/// Sum of every value
	total: u64,

	/// Whether this came from a bare command rather than an expression
	default_roll: bool,
}

impl Outcome {
	/// Assembles an outcome from the terms and the values each produced, calculating the total.
	///
	/// # Errors
	/// If there are no values at all or their total is below 1, [`Error::NoValidRoll`] is returned.
	pub(crate) fn new(terms: Vec<Term>, rolls: Vec<Rolled>) -> Result<Self, Error> {
		debug_assert_eq!(terms.len(), rolls.len(), "every term should have produced a roll");

		let total = rolls.iter().map(Rolled::total).sum::<u64>();
		if rolls.iter().all(|rolled| rolled.vals.is_empty()) || total < 1 {
			return Err(Error::NoValidRoll);
		}

		Ok(Self {
			terms,
			rolls,
			total,
			default_roll: false,
		})
	}

	/// Marks the outcome as the default roll of a bare command, which is replied to in a shorter form.
	pub(crate) fn into_default_roll(self) -> Self {
		Self {
			default_roll: true,
			..self
		}
	}

	/// Gets the terms that were evaluated, in order.
	#[must_use]
	#[inline]
	pub fn terms(&self) -> &[Term] {
		&self.terms
	}

	/// Gets the values produced by each term, in order.
	#[must_use]
	#[inline]
	pub fn rolls(&self) -> &[Rolled] {
		&self.rolls
	}

	/// Iterates over every individual value across all terms, in order.
	pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
		self.rolls.iter().flat_map(|rolled| rolled.vals.iter().copied())
	}

	/// Counts every individual value across all terms.
	#[must_use]
	pub fn len(&self) -> usize {
		self.rolls.iter().map(|rolled| rolled.vals.len()).sum()
	}

	/// Checks whether there are no values. Always `false` for an outcome produced by evaluation.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Gets the sum of every value.
	#[must_use]
	#[inline]
	pub const fn total(&self) -> u64 {
		self.total
	}

	/// Checks whether this is the default roll of a bare command.
	#[must_use]
	#[inline]
	pub const fn is_default_roll(&self) -> bool {
		self.default_roll
	}
}

impl Describe for Outcome {
	/// Builds a string of every term's values (see [`Rolled::describe()`]) followed by the total.
	///
	/// # Examples
	/// ```
	/// use diceroller::{dice::{roller::Iter as IterRoller, Describe}, Expr, Limits};
	///
	/// let expr = Expr::parse("4d6 + 2")?;
	/// let outcome = expr.eval(&Limits::default(), &mut IterRoller::new([6, 2, 5, 3]))?;
	/// assert_eq!(outcome.describe(None), "4d6[6, 2, 5, 3] + 2 = 18");
	/// assert_eq!(outcome.describe(Some(1)), "4d6[6, 3 more...] + 2 = 18");
	/// # Ok::<(), diceroller::Error>(())
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		format!(
			"{} = {}",
			self.rolls
				.iter()
				.map(|rolled| rolled.describe(list_limit))
				.collect::<Vec<_>>()
				.join(" + "),
			self.total
		)
	}
}

impl fmt::Display for Outcome {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// This is the reply for a chat: the terms that were rolled, then every value and the total. When there's only a
	/// single value, just the total is listed. The default roll of a bare command is the short `Rolling 1d20... 17`.
	///
	/// # Examples
	/// ```
	/// use diceroller::{dice::roller::Iter as IterRoller, Expr, Limits};
	///
	/// let expr = Expr::parse("2d6 + 7")?;
	/// let outcome = expr.eval(&Limits::default(), &mut IterRoller::new([4, 5]))?;
	/// assert_eq!(outcome.to_string(), "Rolling 2d6 + 7...   4 + 5 + 7 = 16");
	///
	/// let expr = Expr::parse("d20")?;
	/// let outcome = expr.eval(&Limits::default(), &mut IterRoller::new([17]))?;
	/// assert_eq!(outcome.to_string(), "Rolling d20...   17");
	/// # Ok::<(), diceroller::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.default_roll {
			return write!(f, "Rolling {}... {}", join(self.terms.iter(), " + "), self.total);
		}

		write!(f, "Rolling {}...   ", join(self.terms.iter(), " + "))?;
		if self.len() > 1 {
			write!(f, "{} = {}", join(self.values(), " + "), self.total)
		} else {
			write!(f, "{}", self.total)
		}
	}
}

/// Joins the string representations of some items with a separator.
fn join<T: ToString>(items: impl Iterator<Item = T>, sep: &str) -> String {
	items.map(|item| item.to_string()).collect::<Vec<_>>().join(sep)
}

/// Checks whether a character may appear in a raw expression.
const fn is_allowed_char(c: char) -> bool {
	matches!(c, '0'..='9' | '+' | 'd' | 'D' | ' ')
}
