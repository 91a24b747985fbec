#![feature(test)]

extern crate test;

use test::Bencher;

use diceroller::{dice::roller::FastRand as FastRandRoller, Command, Expr, Limits};

#[bench]
fn e2e_basic(b: &mut Bencher) {
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	b.iter(|| {
		"4d8 + 4"
			.parse::<Expr>()
			.unwrap()
			.eval(&Limits::default(), &mut roller)
			.unwrap()
			.total()
	});
}

#[bench]
fn e2e_max_terms(b: &mut Bencher) {
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	b.iter(|| {
		"d4 + d6 + d8 + d10 + d12 + d20 + d100 + d1000 + 7 + 3"
			.parse::<Expr>()
			.unwrap()
			.eval(&Limits::default(), &mut roller)
			.unwrap()
			.total()
	});
}

#[bench]
fn e2e_command(b: &mut Bencher) {
	let command = Command::default();
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	b.iter(|| command.run("!roll 2d6 + 4d20 + 7", &mut roller).unwrap().unwrap().to_string());
}
