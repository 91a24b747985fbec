//! Configurable ceilings that keep requested rolls within reason.

use alloc::string::ToString;

use crate::{
	dice::{Dice, DiceSpec},
	error::Error,
	term::Term,
};

/// Ceilings applied to every evaluated expression
///
/// # Examples
/// ```
/// use diceroller::Limits;
///
/// let limits = Limits::default();
/// assert_eq!(limits, Limits::new(10, 1000));
///
/// let generous = Limits::default().with_max_count(100);
/// assert_eq!(generous.max_count, 100);
/// assert_eq!(generous.max_sides, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[expect(clippy::exhaustive_structs, reason = "Adding a limit is a breaking change anyway")]
pub struct Limits {
	/// Maximum number of individual values (dice plus flat modifiers) a single expression may produce
	pub max_count: u32,

	/// Maximum number of sides per die. Also used as the maximum value of a flat modifier.
	pub max_sides: u32,
}

impl Limits {
	/// Default limits: 10 dice of up to 1000 sides each.
	pub const DEFAULT: Self = Self::new(10, 1000);

	/// Creates new limits.
	#[must_use]
	pub const fn new(max_count: u32, max_sides: u32) -> Self {
		Self { max_count, max_sides }
	}

	/// Sets the maximum number of values per expression.
	#[must_use]
	pub const fn with_max_count(mut self, max_count: u32) -> Self {
		self.max_count = max_count;
		self
	}

	/// Sets the maximum number of sides per die (and maximum flat modifier).
	#[must_use]
	pub const fn with_max_sides(mut self, max_sides: u32) -> Self {
		self.max_sides = max_sides;
		self
	}

	/// Checks a single term's parsed spec against the limits. Checks happen in a fixed order: count, then sides, then
	/// whether the dice are rollable at all.
	///
	/// # Errors
	/// - [`Error::ModifierTooLarge`] if a flat modifier is above [`Self::max_sides`]
	/// - [`Error::TooManyDice`] if the dice count is above [`Self::max_count`]
	/// - [`Error::TooManySides`] if the dice sides are above [`Self::max_sides`]
	/// - [`Error::MalformedTerm`] if there are no dice or fewer than two sides
	///
	/// # Examples
	/// ```
	/// use diceroller::{Error, Limits, Term};
	///
	/// let limits = Limits::default();
	/// let term = Term::new("20d6");
	/// assert_eq!(limits.check(&term, &term.spec()?), Err(Error::TooManyDice { max: 10 }));
	///
	/// let term = Term::new("0d6");
	/// assert!(matches!(limits.check(&term, &term.spec()?), Err(Error::MalformedTerm { .. })));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn check(&self, term: &Term, spec: &DiceSpec) -> Result<(), Error> {
		match *spec {
			DiceSpec::Flat(val) if val > self.max_sides => Err(Error::ModifierTooLarge {
				term: term.to_string(),
				max: self.max_sides,
			}),
			DiceSpec::Flat(..) => Ok(()),
			DiceSpec::Dice(Dice { count, .. }) if count > self.max_count => Err(Error::TooManyDice { max: self.max_count }),
			DiceSpec::Dice(Dice { sides, .. }) if sides > self.max_sides => Err(Error::TooManySides {
				term: term.to_string(),
				max: self.max_sides,
			}),
			DiceSpec::Dice(dice) if !dice.is_rollable() => Err(Error::MalformedTerm { term: term.to_string() }),
			DiceSpec::Dice(..) => Ok(()),
		}
	}
}

impl Default for Limits {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}
