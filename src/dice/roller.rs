//! Abstractions for producing random die values using various means.

use alloc::{vec, vec::Vec};
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{DiceSpec, Error, Rolled};

/// Source of die values - what else is there to say?
///
/// Implementors are expected to return values within the requested range. [`Roller::roll()`] double-checks every
/// value it gets, so a misbehaving roller results in an [`Error::OutOfRange`] rather than an impossible roll.
pub trait Roller {
	/// Produces a single value in `min..=max`.
	#[must_use]
	fn next_int(&mut self, min: u32, max: u32) -> u32;

	/// Evaluates a spec. Flat modifiers produce their own value without touching the roller, while dice produce one
	/// value per die (in draw order).
	///
	/// # Errors
	/// If the roller produces any value outside of `1..=sides`, an error variant is returned.
	fn roll(&mut self, spec: &DiceSpec) -> Result<Rolled, Error>
	where
		Self: Sized,
	{
		let vals = match *spec {
			DiceSpec::Flat(val) => vec![val],
			DiceSpec::Dice(dice) => {
				let mut vals = Vec::with_capacity(dice.count as usize);
				for _ in 0..dice.count {
					let val = self.next_int(1, dice.sides);
					if !(1..=dice.sides).contains(&val) {
						return Err(Error::OutOfRange { val, dice });
					}
					vals.push(val);
				}
				vals
			}
		};

		Ok(Rolled { vals, spec: *spec })
	}
}

/// Generates values randomly using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use diceroller::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice, DiceSpec};
///
/// let mut roller = FastRandRoller::default();
///
/// let spec = DiceSpec::Dice(Dice::new(4, 6));
/// let rolled = roller.roll(&spec)?;
/// assert!(rolled.vals.iter().all(|val| (1..=6).contains(val)));
/// # Ok::<(), diceroller::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use diceroller::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice, DiceSpec};
///
/// let spec = DiceSpec::Dice(Dice::new(4, 6));
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&spec)?;
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&spec)?;
/// assert_eq!(first, second);
/// # Ok::<(), diceroller::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate values.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate values.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Produces a value using the [`fastrand::Rng`] the roller was created with. An empty range produces `0`.
	#[inline]
	fn next_int(&mut self, min: u32, max: u32) -> u32 {
		if min <= max {
			self.0.u32(min..=max)
		} else {
			0
		}
	}
}

/// Generates values that are always one specific value, regardless of the range asked for.
///
/// # Examples
/// ```
/// use diceroller::dice::{roller::{Roller, Val as ValRoller}, Dice, DiceSpec};
///
/// let mut roller = ValRoller(4);
///
/// let rolled = roller.roll(&DiceSpec::Dice(Dice::new(3, 6)))?;
/// assert_eq!(rolled.vals, vec![4, 4, 4]);
/// # Ok::<(), diceroller::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	#[inline]
	fn next_int(&mut self, _min: u32, _max: u32) -> u32 {
		self.0
	}
}

/// Generates values that are always the max of the range.
///
/// # Examples
/// ```
/// use diceroller::dice::{roller::{Max as MaxRoller, Roller}, Dice, DiceSpec};
///
/// let mut roller = MaxRoller;
///
/// let rolled = roller.roll(&DiceSpec::Dice(Dice::new(2, 20)))?;
/// assert_eq!(rolled.vals, vec![20, 20]);
/// # Ok::<(), diceroller::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	#[inline]
	fn next_int(&mut self, _min: u32, max: u32) -> u32 {
		max
	}
}

/// Generates values from an iterator. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use diceroller::dice::{roller::{Iter as IterRoller, Roller}, Dice, DiceSpec};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 6]);
/// let rolled = roller.roll(&DiceSpec::Dice(Dice::new(5, 6)))?;
/// assert_eq!(rolled.vals, vec![1, 2, 3, 4, 6]);
/// assert!(!roller.can_roll());
/// # Ok::<(), diceroller::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Produces the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn next_int(&mut self, _min: u32, _max: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
