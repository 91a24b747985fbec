//! Single `+`-separated terms of an expression and their evaluation.

use alloc::string::{String, ToString};
use core::fmt;

use tracing::{debug, trace, warn};

use crate::{
	dice::{roller::Roller, DiceSpec, Rolled},
	error::Error,
	limits::Limits,
};

/// One unit of an expression, as the user wrote it (minus surrounding whitespace). A term hasn't necessarily been
/// validated; see [`Term::spec()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Term(String);

impl Term {
	/// Creates a new term from some text, trimming any surrounding whitespace.
	#[must_use]
	pub fn new(text: &str) -> Self {
		Self(text.trim().to_string())
	}

	/// Gets the text of the term.
	#[must_use]
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Classifies the term as either a flat modifier or dice. Classification is deterministic: the same term always
	/// results in the same spec. No limits are checked.
	///
	/// # Errors
	/// If the term is neither all digits nor in `NdS` notation, [`Error::MalformedTerm`] is returned.
	///
	/// # Examples
	/// ```
	/// use diceroller::{Dice, DiceSpec, Error, Term};
	///
	/// assert_eq!(Term::new(" 4d20 ").spec()?, DiceSpec::Dice(Dice::new(4, 20)));
	/// assert_eq!(Term::new("D6").spec()?, DiceSpec::Dice(Dice::new(1, 6)));
	/// assert_eq!(Term::new("7").spec()?, DiceSpec::Flat(7));
	/// assert_eq!(Term::new("6d").spec(), Err(Error::MalformedTerm { term: "6d".to_owned() }));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn spec(&self) -> Result<DiceSpec, Error> {
		self.0.parse::<DiceSpec>().map_err(|err| {
			trace!(term = %self, %err, "term didn't parse");
			Error::MalformedTerm { term: self.0.clone() }
		})
	}

	/// Classifies the term, checks it against the limits, then rolls it.
	///
	/// # Errors
	/// - Any error from [`Self::spec()`] or [`Limits::check()`]
	/// - [`Error::RngRangeViolation`] if the roller produces a value outside of the dice's range
	///
	/// # Examples
	/// ```
	/// use diceroller::{dice::roller::Iter as IterRoller, Limits, Term};
	///
	/// let mut roller = IterRoller::new([4, 5]);
	/// let rolled = Term::new("2d6").eval(&Limits::default(), &mut roller)?;
	/// assert_eq!(rolled.vals, vec![4, 5]);
	///
	/// let rolled = Term::new("7").eval(&Limits::default(), &mut roller)?;
	/// assert_eq!(rolled.vals, vec![7]);
	/// # Ok::<(), diceroller::Error>(())
	/// ```
	pub fn eval(&self, limits: &Limits, roller: &mut impl Roller) -> Result<Rolled, Error> {
		let spec = self.spec()?;
		limits.check(self, &spec)?;

		let rolled = roller.roll(&spec).map_err(|source| {
			warn!(term = %self, %source, "roller produced an out-of-range value");
			Error::RngRangeViolation {
				term: self.0.clone(),
				source,
			}
		})?;

		debug!(term = %self, vals = ?rolled.vals, "rolled term");
		Ok(rolled)
	}
}

impl From<DiceSpec> for Term {
	#[inline]
	fn from(spec: DiceSpec) -> Self {
		Self(spec.to_string())
	}
}

impl AsRef<str> for Term {
	#[inline]
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
