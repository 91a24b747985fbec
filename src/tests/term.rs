use crate::{
	dice::{
		roller::{Iter as IterRoller, Max as MaxRoller, Val as ValRoller},
		Dice, DiceSpec,
	},
	error::Error,
	limits::Limits,
	term::Term,
};

fn malformed(term: &str) -> Error {
	Error::MalformedTerm { term: term.to_owned() }
}

#[test]
fn terms_are_trimmed() {
	assert_eq!(Term::new("  2d6\t").as_str(), "2d6");
	assert_eq!(Term::new(" 7 ").to_string(), "7");
}

#[test]
fn classification() {
	assert_eq!(Term::new("2d6").spec(), Ok(DiceSpec::Dice(Dice::new(2, 6))));
	assert_eq!(Term::new("d20").spec(), Ok(DiceSpec::Dice(Dice::new(1, 20))));
	assert_eq!(Term::new("15").spec(), Ok(DiceSpec::Flat(15)));
	assert_eq!(Term::new("2x6").spec(), Err(malformed("2x6")));
	assert_eq!(Term::new("").spec(), Err(malformed("")));
}

#[test]
fn dice_roll_in_order() {
	let mut roller = IterRoller::new([3, 1, 4, 1]);
	let rolled = Term::new("4d6").eval(&Limits::default(), &mut roller).unwrap();
	assert_eq!(rolled.vals, vec![3, 1, 4, 1]);
	assert_eq!(rolled.spec, DiceSpec::Dice(Dice::new(4, 6)));
}

#[test]
fn flat_modifier() {
	let rolled = Term::new("1000").eval(&Limits::default(), &mut IterRoller::new([])).unwrap();
	assert_eq!(rolled.vals, vec![1000]);
}

#[test]
fn modifier_too_large() {
	let result = Term::new("1001").eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(
		result,
		Err(Error::ModifierTooLarge {
			term: "1001".to_owned(),
			max: 1000
		})
	);
}

#[test]
fn modifier_limit_follows_sides_limit() {
	let limits = Limits::default().with_max_sides(20);
	assert!(Term::new("20").eval(&limits, &mut MaxRoller).is_ok());
	assert!(matches!(
		Term::new("21").eval(&limits, &mut MaxRoller),
		Err(Error::ModifierTooLarge { max: 20, .. })
	));
}

#[test]
fn too_many_dice() {
	let result = Term::new("20d6").eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(result, Err(Error::TooManyDice { max: 10 }));
}

#[test]
fn too_many_sides() {
	let result = Term::new("2d2000").eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(
		result,
		Err(Error::TooManySides {
			term: "2d2000".to_owned(),
			max: 1000
		})
	);
}

#[test]
fn count_checked_before_sides() {
	let result = Term::new("11d1001").eval(&Limits::default(), &mut MaxRoller);
	assert_eq!(result, Err(Error::TooManyDice { max: 10 }));
}

#[test]
fn huge_sides_are_too_many_sides() {
	let result = Term::new("d123456789012345").eval(&Limits::default(), &mut MaxRoller);
	assert!(matches!(result, Err(Error::TooManySides { .. })));
}

#[test]
fn degenerate_dice() {
	let limits = Limits::default();
	assert_eq!(Term::new("0d6").eval(&limits, &mut MaxRoller), Err(malformed("0d6")));
	assert_eq!(Term::new("3d1").eval(&limits, &mut MaxRoller), Err(malformed("3d1")));
	assert_eq!(Term::new("d0").eval(&limits, &mut MaxRoller), Err(malformed("d0")));
}

#[test]
fn out_of_range_roll_is_internal() {
	let err = Term::new("2d6").eval(&Limits::default(), &mut ValRoller(0)).unwrap_err();
	assert!(err.is_internal());
	assert_eq!(err.term(), Some("2d6"));
	assert!(matches!(err, Error::RngRangeViolation { .. }));
}

#[test]
fn limit_errors_dont_roll() {
	let mut roller = IterRoller::new([5]);
	assert!(Term::new("2d2000").eval(&Limits::default(), &mut roller).is_err());
	assert!(roller.can_roll());
}
