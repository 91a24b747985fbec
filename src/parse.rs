//! Parser generators for single expression terms, built with [chumsky].
//!
//! The grammar is intentionally looser than the configured [`Limits`]: any run of digits is accepted for counts,
//! sides and flat modifiers, so that an oversized value is reported as a limit violation rather than as an
//! unparseable term.
//!
//! [`Limits`]: crate::limits::Limits

use alloc::{
	string::{String, ToString},
	vec::Vec,
};

use chumsky::prelude::*;

use crate::dice::{Dice, DiceSpec};

/// Generates a parser for an unsigned decimal number of any length. Numbers too large to fit into a [`u32`] saturate
/// at [`u32::MAX`] instead of failing.
pub fn number<'src>() -> impl Parser<'src, &'src str, u32, extra::Err<Rich<'src, char>>> + Clone {
	text::digits(10).to_slice().map(saturating_u32)
}

/// Generates a parser that specifically handles dice terms like "d20", "2d6", "4D8", etc.
/// The count defaults to 1 when it's omitted.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	number()
		.or_not()
		.then_ignore(one_of("dD"))
		.then(number())
		.map(|(count, sides)| Dice::new(count.unwrap_or(1), sides))
}

/// Generates a parser that specifically handles dice terms like "d20", "2d6", "4D8", etc. and expects end of input
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	dice_part().then_ignore(end())
}

/// Generates a parser that handles a full term: either dice (see [`dice_part()`]) or a flat number, and expects end
/// of input
pub fn spec<'src>() -> impl Parser<'src, &'src str, DiceSpec, extra::Err<Rich<'src, char>>> + Clone {
	choice((dice_part().map(DiceSpec::Dice), number().map(DiceSpec::Flat))).then_ignore(end())
}

/// Parses a full term with [`spec()`], collecting any errors into a single [`Error`].
///
/// # Errors
/// If the input isn't a valid term, an error containing the details of all parse errors is returned.
pub fn spec_from_str(input: &str) -> Result<DiceSpec, Error> {
	spec().parse(input).into_result().map_err(|errs| Error {
		details: errs
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("; "),
	})
}

/// Converts a string of ASCII digits into a number, saturating on overflow.
fn saturating_u32(digits: &str) -> u32 {
	digits.parse().unwrap_or(u32::MAX)
}

/// Failure to parse a term from a string
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
#[expect(clippy::exhaustive_structs, reason = "Details are all there is to report")]
pub struct Error {
	/// Description of everything that went wrong
	pub details: String,
}
