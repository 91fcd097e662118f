use std::{collections::BTreeMap, ops};

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use ser_archive::{Bytes, Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Default, Debug, PartialEq)]
pub enum StationKind {
	#[default]
	Weather,
	Tide {
		depth: f32,
	},
	Seismic(u8, bool),
}

impl Generate for StationKind {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		match rng.gen_range(0..3) {
			0 => StationKind::Weather,
			1 => StationKind::Tide { depth: rng.gen() },
			2 => StationKind::Seismic(rng.gen(), rng.gen_bool(0.5)),
			_ => unreachable!(),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
pub struct Reading {
	pub timestamp: u64,
	pub temperature: f32,
	pub pressure: f64,
	pub humidity: u8,
	pub quality: Option<u8>,
	pub note: Option<String>,
}

impl Generate for Reading {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NOTES: [&str; 6] = [
			"ok",
			"sensor reset",
			"battery low",
			"gust > 40 knots",
			"\"manual\" override",
			"frost\non lens",
		];

		Self {
			timestamp: rng.gen(),
			temperature: rng.gen(),
			pressure: rng.gen(),
			humidity: rng.gen(),
			quality: Generate::generate(rng),
			note: <Option<()> as Generate>::generate(rng)
				.map(|_| NOTES[rng.gen_range(0..NOTES.len())].to_string()),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
pub struct Station {
	pub id: u32,
	pub name: String,
	pub location: (f64, f64),
	pub elevation: Option<i16>,
	pub kind: StationKind,
	pub calibration: [f32; 4],
	pub readings: Vec<Reading>,
	pub tags: BTreeMap<String, u16>,
	pub firmware: Bytes,
}

impl Generate for Station {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NAMES: [&str; 6] = ["Ben Nevis", "Malin Head", "Dover", "Fitzroy", "Tromsø", "Ushant"];
		const TAGS: [&str; 5] = ["coastal", "remote", "heated", "solar", "backup"];

		let tags = (0..rng.gen_range(0..4))
			.map(|_| (TAGS[rng.gen_range(0..TAGS.len())].to_string(), rng.gen()))
			.collect();

		Self {
			id: rng.gen(),
			name: NAMES[rng.gen_range(0..NAMES.len())].to_string(),
			location: Generate::generate(rng),
			elevation: Generate::generate(rng),
			kind: Generate::generate(rng),
			calibration: [rng.gen(), rng.gen(), rng.gen(), rng.gen()],
			readings: generate_vec(rng, 0..40),
			tags,
			firmware: Bytes(generate_vec(rng, 0..64)),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
pub struct Network {
	pub stations: Vec<Station>,
}

pub trait Generate {
	fn generate<R: Rng>(rng: &mut R) -> Self;
}

impl Generate for () {
	fn generate<R: Rng>(_: &mut R) -> Self {}
}

macro_rules! impl_generate {
	($ty:ty) => {
		impl Generate for $ty {
			fn generate<R: Rng>(rng: &mut R) -> Self {
				rng.gen()
			}
		}
	};
}

impl_generate!(u8);
impl_generate!(i16);
impl_generate!(f64);

impl<T0: Generate, T1: Generate> Generate for (T0, T1) {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		(T0::generate(rng), T1::generate(rng))
	}
}

impl<T: Generate> Generate for Option<T> {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		if rng.gen_bool(0.5) {
			Some(T::generate(rng))
		} else {
			None
		}
	}
}

fn generate_vec<R: Rng, T: Generate>(rng: &mut R, range: ops::Range<usize>) -> Vec<T> {
	let len = rng.gen_range(range);
	(0..len).map(|_| T::generate(rng)).collect()
}

pub fn generate_data() -> Network {
	const STATE: u64 = 2718281828;
	const STREAM: u64 = 4590452353;

	let mut rng = Lcg64Xsh32::new(STATE, STREAM);

	const STATIONS: usize = 200;
	Network {
		stations: generate_vec::<_, Station>(&mut rng, STATIONS..STATIONS + 1),
	}
}
