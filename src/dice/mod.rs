//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For rolling a whole `+`-separated expression, see [`Expr`].
//!
//! [`Expr`]: crate::expr::Expr

pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, str::FromStr};

pub use self::roller::Roller;
use crate::parse;

/// A set of one or more rollable dice with a specific number of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_structs, reason = "Count and sides are all there is to a plain die")]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self { count, sides }
	}

	/// Checks whether the dice describe something that can actually be rolled (at least one die with at least two
	/// sides).
	///
	/// # Examples
	/// ```
	/// use diceroller::Dice;
	///
	/// assert!(Dice::new(2, 6).is_rollable());
	/// assert!(!Dice::new(0, 6).is_rollable());
	/// assert!(!Dice::new(3, 1).is_rollable());
	/// ```
	#[must_use]
	#[inline]
	pub const fn is_rollable(&self) -> bool {
		self.count >= 1 && self.sides >= 2
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}

/// Parsed form of a single term of an expression: either a flat number to add as-is or a set of dice to roll.
///
/// The only way to get one from user input is through the grammar in [`parse`] (usually via [`Term::spec()`] or
/// [`str::parse()`]), so invalid terms never produce a spec.
///
/// [`Term::spec()`]: crate::term::Term::spec()
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "Addition is the only supported operation")]
pub enum DiceSpec {
	/// Flat modifier that's added to the total without being rolled
	Flat(u32),

	/// Dice to roll
	Dice(Dice),
}

impl From<Dice> for DiceSpec {
	#[inline]
	fn from(dice: Dice) -> Self {
		Self::Dice(dice)
	}
}

impl fmt::Display for DiceSpec {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Flat(val) => write!(f, "{val}"),
			Self::Dice(dice) => write!(f, "{dice}"),
		}
	}
}

impl FromStr for DiceSpec {
	type Err = parse::Error;

	/// Parses a single term such as `7`, `d20` or `2D6`. Surrounding whitespace isn't accepted.
	///
	/// # Examples
	/// ```
	/// use diceroller::{Dice, DiceSpec};
	///
	/// assert_eq!("2D6".parse::<DiceSpec>()?, DiceSpec::Dice(Dice::new(2, 6)));
	/// assert_eq!("d20".parse::<DiceSpec>()?, DiceSpec::Dice(Dice::new(1, 20)));
	/// assert_eq!("7".parse::<DiceSpec>()?, DiceSpec::Flat(7));
	/// assert!("2x6".parse::<DiceSpec>().is_err());
	/// # Ok::<(), diceroller::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse::spec_from_str(s)
	}
}

/// Representation of the result from evaluating a [`DiceSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain result data")]
pub struct Rolled {
	/// Each individual value that was produced, in draw order
	pub vals: Vec<u32>,

	/// Spec that was evaluated to produce this
	pub spec: DiceSpec,
}

impl Rolled {
	/// Calculates the total of all values.
	///
	/// # Examples
	/// ```
	/// use diceroller::dice::{roller::{Iter as IterRoller, Roller}, Dice, DiceSpec};
	///
	/// let rolled = IterRoller::new([3, 5, 1]).roll(&DiceSpec::Dice(Dice::new(3, 6)))?;
	/// assert_eq!(rolled.total(), 9);
	/// # Ok::<(), diceroller::dice::Error>(())
	/// ```
	#[must_use]
	pub fn total(&self) -> u64 {
		self.vals.iter().map(|&val| u64::from(val)).sum()
	}

	/// Creates a new rolled set from a given spec and an iterator of values.
	#[must_use]
	pub fn from_spec_and_vals(spec: DiceSpec, vals: impl IntoIterator<Item = u32>) -> Self {
		Self {
			vals: vals.into_iter().collect(),
			spec,
		}
	}
}

impl Describe for Rolled {
	/// Builds a string of the spec the values are from and a list of all of the individual values. Flat modifiers are
	/// described as just their value.
	///
	/// If `list_limit` is specified and there are more values than it, the list will be truncated and appended with
	/// "X more..." (where X is the remaining value count past the max).
	///
	/// # Examples
	/// ```
	/// use diceroller::dice::{Describe, Dice, DiceSpec, Rolled};
	///
	/// let rolled = Rolled::from_spec_and_vals(DiceSpec::Dice(Dice::new(4, 6)), [6, 2, 5, 3]);
	/// assert_eq!(rolled.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6[6, 2, 2 more...]");
	///
	/// let rolled = Rolled::from_spec_and_vals(DiceSpec::Flat(7), [7]);
	/// assert_eq!(rolled.describe(None), "7");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		if let DiceSpec::Flat(val) = self.spec {
			return val.to_string();
		}

		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated = self.vals.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.spec,
			self.vals
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated > 0 {
				format!(", {truncated} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed string with all of the individual results that occurred (ideally, up to `list_limit` of
	/// them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The roller produced a value that can't have come from the dice being rolled.
	///
	/// # Examples
	/// ```
	/// use diceroller::dice::{roller::{Roller, Val as ValRoller}, Dice, DiceSpec, Error};
	///
	/// let result = ValRoller(0).roll(&DiceSpec::Dice(Dice::new(2, 6)));
	/// assert_eq!(result, Err(Error::OutOfRange { val: 0, dice: Dice::new(2, 6) }));
	/// ```
	#[error("roller produced {val}, which is outside of 1..={} for {dice}", .dice.sides)]
	OutOfRange {
		/// Value that was produced
		val: u32,

		/// Dice that were being rolled
		dice: Dice,
	},
}
