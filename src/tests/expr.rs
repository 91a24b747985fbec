use core::iter;

use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Val as ValRoller},
		Describe, Dice, DiceSpec,
	},
	error::Error,
	expr::Expr,
	limits::Limits,
	term::Term,
};

fn terms(expr: &Expr) -> Vec<&str> {
	expr.terms().iter().map(Term::as_str).collect()
}

#[test]
fn splits_on_plus() {
	let expr = Expr::parse("2d6 + 4d20 + 7").unwrap();
	assert_eq!(terms(&expr), ["2d6", "4d20", "7"]);
}

#[test]
fn whitespace_within_terms_is_removed() {
	let expr = Expr::parse("  2 d 6+   1 0 ").unwrap();
	assert_eq!(terms(&expr), ["2d6", "10"]);
}

#[test]
fn non_ascii() {
	assert_eq!(Expr::parse("café"), Err(Error::NonAsciiInput));
	assert_eq!(Expr::parse("2d6 + ７"), Err(Error::NonAsciiInput));
}

#[test]
fn invalid_characters() {
	assert_eq!(Expr::parse("2x6"), Err(Error::InvalidCharacter { found: 'x' }));
	assert_eq!(Expr::parse("2d6 - 1"), Err(Error::InvalidCharacter { found: '-' }));
	assert_eq!(Expr::parse("2d6\t+ 1"), Err(Error::InvalidCharacter { found: '\t' }));
	assert_eq!(Expr::parse("2d20kh1"), Err(Error::InvalidCharacter { found: 'k' }));
}

#[test]
fn no_terms() {
	assert_eq!(Expr::parse(""), Err(Error::NoTermsFound));
	assert_eq!(Expr::parse("   "), Err(Error::NoTermsFound));
	assert_eq!(Expr::parse("+++"), Err(Error::NoTermsFound));
}

#[test]
fn empty_terms_are_kept() {
	let expr = Expr::parse("2d6 ++ 3").unwrap();
	assert_eq!(terms(&expr), ["2d6", "", "3"]);

	let result = expr.eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(result, Err(Error::MalformedTerm { term: String::new() }));
}

#[test]
fn full_expression() {
	let expr = Expr::parse("2d6 + 4d20 + 7").unwrap();
	let mut roller = IterRoller::new([4, 5, 20, 1, 13, 8]);
	let outcome = expr.eval(&Limits::default(), &mut roller).unwrap();

	assert_eq!(outcome.len(), 7);
	assert_eq!(outcome.values().collect::<Vec<_>>(), [4, 5, 20, 1, 13, 8, 7]);
	assert_eq!(outcome.total(), 58);
	assert_eq!(outcome.rolls()[0].spec, DiceSpec::Dice(Dice::new(2, 6)));
	assert_eq!(outcome.rolls()[2].vals, [7]);
	assert_eq!(outcome.terms(), expr.terms());
	assert!(!roller.can_roll());
}

#[test]
fn random_expression_in_range() {
	let expr = Expr::parse("2d6 + 4d20 + 7").unwrap();
	let outcome = expr.eval(&Limits::default(), &mut FastRandRoller::default()).unwrap();
	let rolls = outcome.rolls();

	assert_eq!(rolls[0].vals.len(), 2);
	assert!(rolls[0].vals.iter().all(|val| (1..=6).contains(val)));
	assert_eq!(rolls[1].vals.len(), 4);
	assert!(rolls[1].vals.iter().all(|val| (1..=20).contains(val)));
	assert_eq!(rolls[2].vals, [7]);
	assert_eq!(outcome.total(), outcome.values().map(u64::from).sum::<u64>());
}

#[test]
fn too_many_dice_in_one_term() {
	let expr = Expr::parse("20d6").unwrap();
	assert_eq!(
		expr.eval(&Limits::default(), &mut MaxRoller),
		Err(Error::TooManyDice { max: 10 })
	);
}

#[test]
fn too_many_dice_across_terms() {
	let expr = Expr::parse("3d6 + 3d6 + 3d6 + 3d6").unwrap();
	let result = expr.eval(&Limits::default(), &mut IterRoller::new(iter::repeat(2)));
	assert_eq!(result, Err(Error::TooManyDice { max: 10 }));
}

#[test]
fn flat_modifiers_count_toward_dice_limit() {
	let expr = Expr::parse("5d6 + 5d6 + 1").unwrap();
	let result = expr.eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(result, Err(Error::TooManyDice { max: 10 }));
}

#[test]
fn exactly_at_limit() {
	let expr = Expr::parse("5d6 + 4d6 + 1").unwrap();
	let outcome = expr.eval(&Limits::default(), &mut MaxRoller).unwrap();
	assert_eq!(outcome.len(), 10);
	assert_eq!(outcome.total(), 55);
}

#[test]
fn first_failing_term_wins() {
	let expr = Expr::parse("2d2000 + 0d6").unwrap();
	assert!(matches!(
		expr.eval(&Limits::default(), &mut MaxRoller),
		Err(Error::TooManySides { .. })
	));

	let expr = Expr::parse("8d6 + 5d2000").unwrap();
	assert!(matches!(
		expr.eval(&Limits::default(), &mut MaxRoller),
		Err(Error::TooManySides { .. })
	));
}

#[test]
fn malformed_terms() {
	assert_eq!(
		Expr::parse("0d6").unwrap().eval(&Limits::default(), &mut MaxRoller),
		Err(Error::MalformedTerm { term: "0d6".to_owned() })
	);
	assert_eq!(
		Expr::parse("2d6 + 6d").unwrap().eval(&Limits::default(), &mut MaxRoller),
		Err(Error::MalformedTerm { term: "6d".to_owned() })
	);
}

#[test]
fn zero_total_is_no_valid_roll() {
	let expr = Expr::parse("0").unwrap();
	assert_eq!(expr.eval(&Limits::default(), &mut MaxRoller), Err(Error::NoValidRoll));

	let expr = Expr::parse("0 + 0 + 1").unwrap();
	assert_eq!(expr.eval(&Limits::default(), &mut MaxRoller).unwrap().total(), 1);
}

#[test]
fn bad_roller_aborts_everything() {
	let expr = Expr::parse("2d6 + 2d6").unwrap();
	let result = expr.eval(&Limits::default(), &mut IterRoller::new([3, 4, 5, 0]));
	assert!(result.unwrap_err().is_internal());

	let expr = Expr::parse("d20").unwrap();
	assert!(expr.eval(&Limits::default(), &mut ValRoller(21)).is_err());
}

#[test]
fn custom_limits() {
	let limits = Limits::new(100, 6);
	let expr = Expr::parse("50d6 + 6").unwrap();
	assert_eq!(expr.eval(&limits, &mut MaxRoller).unwrap().total(), 306);
	assert!(Expr::parse("d8").unwrap().eval(&limits, &mut MaxRoller).is_err());
}

#[test]
fn default_expr() {
	let expr = Expr::default();
	assert_eq!(terms(&expr), ["1d20"]);
	let outcome = expr.eval(&Limits::default(), &mut ValRoller(11)).unwrap();
	assert_eq!(outcome.to_string(), "Rolling 1d20...   11");
}

#[test]
fn display() {
	let expr = Expr::parse("2d6+4D20 + 7").unwrap();
	assert_eq!(expr.to_string(), "2d6 + 4D20 + 7");

	let outcome = expr
		.eval(&Limits::default(), &mut IterRoller::new([4, 5, 1, 2, 3, 4]))
		.unwrap();
	assert_eq!(
		outcome.to_string(),
		"Rolling 2d6 + 4D20 + 7...   4 + 5 + 1 + 2 + 3 + 4 + 7 = 26"
	);
	assert_eq!(outcome.describe(None), "2d6[4, 5] + 4d20[1, 2, 3, 4] + 7 = 26");
	assert_eq!(outcome.describe(Some(2)), "2d6[4, 5] + 4d20[1, 2, 2 more...] + 7 = 26");
}

#[test]
fn single_flat_value_display() {
	let outcome = Expr::parse("7").unwrap().eval(&Limits::default(), &mut MaxRoller).unwrap();
	assert_eq!(outcome.to_string(), "Rolling 7...   7");
}

mod props {
	use proptest::prelude::*;

	use crate::{
		dice::roller::FastRand as FastRandRoller,
		error::Error,
		expr::Expr,
		limits::Limits,
	};

	proptest! {
		#[test]
		fn disallowed_characters_rejected(
			prefix in "[0-9+dD ]{0,6}",
			bad in "[!-~]".prop_filter("disallowed", |c| !c.chars().all(|c| c.is_ascii_digit() || "+dD ".contains(c))),
			suffix in "[0-9+dD ]{0,6}",
		) {
			let input = format!("{prefix}{bad}{suffix}");
			let found = bad.chars().next().unwrap();
			prop_assert_eq!(Expr::parse(&input), Err(Error::InvalidCharacter { found }));
		}

		#[test]
		fn order_is_preserved(counts in prop::collection::vec(1u32..=3, 1..=3), seed: u64) {
			let input = counts.iter().enumerate()
				.map(|(i, count)| format!("{count}d{}", i + 2))
				.collect::<Vec<_>>()
				.join(" + ");
			let expr = Expr::parse(&input).unwrap();
			let outcome = expr.eval(&Limits::default(), &mut FastRandRoller::with_seed(seed)).unwrap();

			prop_assert_eq!(outcome.rolls().len(), counts.len());
			for (i, (rolled, count)) in outcome.rolls().iter().zip(&counts).enumerate() {
				prop_assert_eq!(rolled.vals.len(), *count as usize);
				prop_assert!(rolled.vals.iter().all(|val| (1..=i as u32 + 2).contains(val)));
			}
		}

		#[test]
		fn aggregate_limit_holds(counts in prop::collection::vec(1u32..=10, 1..=5), seed: u64) {
			let input = counts.iter().map(|count| format!("{count}d6")).collect::<Vec<_>>().join("+");
			let result = Expr::parse(&input).unwrap().eval(&Limits::default(), &mut FastRandRoller::with_seed(seed));
			let total_dice: u32 = counts.iter().sum();

			if total_dice > 10 {
				prop_assert_eq!(result, Err(Error::TooManyDice { max: 10 }));
			} else {
				prop_assert_eq!(result.unwrap().len(), total_dice as usize);
			}
		}
	}
}
