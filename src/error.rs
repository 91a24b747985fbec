//! The error taxonomy shared by every stage of evaluating an expression.

use alloc::string::String;

use crate::dice;

/// Reason an expression couldn't be rolled.
///
/// Every variant is terminal for the invocation that raised it: no partial results are reported and nothing should be
/// retried automatically. The [`Display`](core::fmt::Display) output of each variant is the message meant to be
/// relayed to the user verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The input contains characters outside of 7-bit ASCII.
	///
	/// # Examples
	/// ```
	/// use diceroller::{Error, Expr};
	///
	/// assert_eq!("café".parse::<Expr>(), Err(Error::NonAsciiInput));
	/// ```
	#[error("Nice try. No dice were rolled.")]
	NonAsciiInput,

	/// The input contains a character that can't be part of a dice expression.
	///
	/// # Examples
	/// ```
	/// use diceroller::{Error, Expr};
	///
	/// assert_eq!("2x6".parse::<Expr>(), Err(Error::InvalidCharacter { found: 'x' }));
	/// ```
	#[error("Unsupported characters found. No dice were rolled.")]
	InvalidCharacter {
		/// First disallowed character in the input
		found: char,
	},

	/// The input didn't contain any terms at all.
	#[error("No valid dice found to roll.")]
	NoTermsFound,

	/// A term is neither a flat number nor dice, or describes dice that can't be rolled (no dice, or fewer than two
	/// sides).
	#[error("Invalid parameter found. Unable to roll {term}")]
	MalformedTerm {
		/// Offending term
		term: String,
	},

	/// More dice were requested than the limit allows, either by a single term or across the whole expression.
	#[error("Please don't ask to roll more than {max} dice at a time.")]
	TooManyDice {
		/// Maximum number of dice per expression
		max: u32,
	},

	/// A term requested dice with more sides than the limit allows.
	#[error("Please don't ask to roll dice with more than {max} sides.")]
	TooManySides {
		/// Offending term
		term: String,

		/// Maximum number of sides per die
		max: u32,
	},

	/// A flat modifier is larger than the limit allows (the sides limit doubles as the modifier limit).
	#[error("Please don't use a modifier higher than {max}")]
	ModifierTooLarge {
		/// Offending term
		term: String,

		/// Maximum value of a flat modifier
		max: u32,
	},

	/// Evaluation produced no values or a total below 1.
	#[error("No valid dice found to roll.")]
	NoValidRoll,

	/// The roller produced a value the dice can't have rolled. This is a fault of the roller, not of the user's input.
	#[error("Something went wrong while rolling {term}")]
	RngRangeViolation {
		/// Term that was being rolled
		term: String,

		/// Underlying roller fault
		#[source]
		source: dice::Error,
	},
}

impl Error {
	/// Checks whether the error is an internal fault rather than a problem with the user's input. Internal faults
	/// should be logged and presented as a generic failure.
	///
	/// # Examples
	/// ```
	/// use diceroller::{dice::roller::Val as ValRoller, Error, Expr, Limits};
	///
	/// let err = "2d6".parse::<Expr>()?.eval(&Limits::default(), &mut ValRoller(0)).unwrap_err();
	/// assert!(err.is_internal());
	/// assert!(!Error::NoTermsFound.is_internal());
	/// # Ok::<(), Error>(())
	/// ```
	#[must_use]
	pub const fn is_internal(&self) -> bool {
		matches!(self, Self::RngRangeViolation { .. })
	}

	/// Gets the term the error is about, if it's about a specific one.
	#[must_use]
	pub fn term(&self) -> Option<&str> {
		match self {
			Self::MalformedTerm { term }
			| Self::TooManySides { term, .. }
			| Self::ModifierTooLarge { term, .. }
			| Self::RngRangeViolation { term, .. } => Some(term),
			Self::NonAsciiInput
			| Self::InvalidCharacter { .. }
			| Self::NoTermsFound
			| Self::TooManyDice { .. }
			| Self::NoValidRoll => None,
		}
	}
}
