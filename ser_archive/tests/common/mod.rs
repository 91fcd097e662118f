#![allow(dead_code)]

use std::time::Duration;

use ser_archive::{IArchive, OArchive, Result, SerializeWith};

mod station_data;
pub use station_data::generate_data as generate_station_data;

pub enum Test {
	Primitives,
	NonZeroNumbers,
	Arrays,
	Tuples,
	UnitAndTupleStructs,
	EnumFieldless,
	EnumWithFields,
	Boxed,
	VecOfPrimitives,
	VecOfVecs,
	Strings,
	BytesAndBuffers,
	Options,
	Maps,
	SerWith,
	Generics,
	BigInts,
	StationData,
}

/// Size of output of binary archive with a header and fixed-width encoding.
/// `None` where size depends on generated data.
pub fn binary_size(test: Test, test_num: usize) -> Option<usize> {
	const HEADER: usize = 5;
	let body = match test {
		Test::Primitives => 95,
		Test::NonZeroNumbers => 78,
		Test::Arrays => 49,
		Test::Tuples => 14,
		Test::UnitAndTupleStructs => 5,
		Test::EnumFieldless => 4,
		Test::EnumWithFields => [9, 17, 4][test_num],
		Test::Boxed => 19,
		Test::VecOfPrimitives => [8, 14, 2008][test_num],
		Test::VecOfVecs => 35,
		Test::Strings => [8, 13, 26, 39][test_num],
		Test::BytesAndBuffers => 23,
		Test::Options => [4, 31, 6][test_num],
		Test::Maps => 62,
		Test::SerWith => 9,
		Test::Generics => 16,
		Test::BigInts => 39,
		Test::StationData => return None,
	};
	Some(HEADER + body)
}

/// Stores a `Duration` as whole milliseconds.
pub struct DurationAsMillis;

impl SerializeWith<Duration> for DurationAsMillis {
	fn serialize_with<A: OArchive>(value: &Duration, ar: &mut A) -> Result<()> {
		ar.write_primitive(value.as_millis() as u64)
	}

	fn deserialize_with<A: IArchive>(value: &mut Duration, ar: &mut A) -> Result<()> {
		*value = Duration::from_millis(ar.read_primitive()?);
		Ok(())
	}
}

macro_rules! tests {
	($test_round_trip:ident) => {
		#[test]
		fn primitives() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				u8: u8,
				u16: u16,
				u32: u32,
				u64: u64,
				u128: u128,
				i8: i8,
				i16: i16,
				i32: i32,
				i64: i64,
				i128: i128,
				usize: usize,
				isize: isize,
				f32: f32,
				f64: f64,
				bool: bool,
				char: char,
			}

			let input = Foo {
				u8: 0x01,
				u16: 0x0203,
				u32: 0x04050607,
				u64: 0x08090a0b0c0d0e0f,
				u128: 0x101112131415161718191a1b1c1d1e1f,
				i8: -0x01,
				i16: -0x0203,
				i32: i32::MIN,
				i64: -0x08090a0b0c0d0e0f,
				i128: i128::MIN + 1,
				usize: usize::MAX,
				isize: isize::MIN / 2,
				f32: f32::MAX,
				f64: -f64::MAX / 2f64,
				bool: true,
				char: '€',
			};
			$test_round_trip(&input, Test::Primitives, 0);
		}

		#[test]
		fn non_zero_numbers() {
			use std::num;

			#[derive(Serialize, Deserialize, Debug, PartialEq)]
			#[allow(non_snake_case)]
			struct Foo {
				NonZeroU8: num::NonZeroU8,
				NonZeroU16: num::NonZeroU16,
				NonZeroU32: num::NonZeroU32,
				NonZeroU64: num::NonZeroU64,
				NonZeroU128: num::NonZeroU128,
				NonZeroUsize: num::NonZeroUsize,
				NonZeroI8: num::NonZeroI8,
				NonZeroI16: num::NonZeroI16,
				NonZeroI32: num::NonZeroI32,
				NonZeroI64: num::NonZeroI64,
				NonZeroI128: num::NonZeroI128,
				NonZeroIsize: num::NonZeroIsize,
			}

			impl Default for Foo {
				fn default() -> Self {
					Self {
						NonZeroU8: num::NonZeroU8::MAX,
						NonZeroU16: num::NonZeroU16::MAX,
						NonZeroU32: num::NonZeroU32::MAX,
						NonZeroU64: num::NonZeroU64::MAX,
						NonZeroU128: num::NonZeroU128::MAX,
						NonZeroUsize: num::NonZeroUsize::MAX,
						NonZeroI8: num::NonZeroI8::MAX,
						NonZeroI16: num::NonZeroI16::MAX,
						NonZeroI32: num::NonZeroI32::MAX,
						NonZeroI64: num::NonZeroI64::MAX,
						NonZeroI128: num::NonZeroI128::MAX,
						NonZeroIsize: num::NonZeroIsize::MAX,
					}
				}
			}

			let input = Foo {
				NonZeroU8: num::NonZeroU8::new(0x01).unwrap(),
				NonZeroU16: num::NonZeroU16::new(0x0203).unwrap(),
				NonZeroU32: num::NonZeroU32::new(0x04050607).unwrap(),
				NonZeroU64: num::NonZeroU64::new(0x08090a0b0c0d0e0f).unwrap(),
				NonZeroU128: num::NonZeroU128::new(0x101112131415161718191a1b1c1d1e1f).unwrap(),
				NonZeroUsize: num::NonZeroUsize::new(usize::MAX).unwrap(),
				NonZeroI8: num::NonZeroI8::new(-0x01).unwrap(),
				NonZeroI16: num::NonZeroI16::new(0x0203).unwrap(),
				NonZeroI32: num::NonZeroI32::new(-0x04050607).unwrap(),
				NonZeroI64: num::NonZeroI64::new(0x08090a0b0c0d0e0f).unwrap(),
				NonZeroI128: num::NonZeroI128::new(-0x101112131415161718191a1b1c1d1e1f).unwrap(),
				NonZeroIsize: num::NonZeroIsize::new(isize::MAX / 2).unwrap(),
			};
			$test_round_trip(&input, Test::NonZeroNumbers, 0);
		}

		#[test]
		fn arrays() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				empty: [u8; 0],
				single: [u8; 1],
				double: [u16; 2],
				triple: [u32; 3],
			}

			let input = Foo {
				empty: [],
				single: [0x01],
				double: [0x0203, 0x0405],
				triple: [0x06070809, 0x0a0b0c0d, 0x0e0f1011],
			};
			$test_round_trip(&input, Test::Arrays, 0);
		}

		#[test]
		fn tuples() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				tup: (u8, u16, u32),
				tup_of_boxes: (Box<u8>, Box<u16>, Box<u32>),
			}

			let input = Foo {
				tup: (0x01, 0x0203, 0x04050607),
				tup_of_boxes: (Box::new(0x08), Box::new(0x090a), Box::new(0x0b0c0d0e)),
			};
			$test_round_trip(&input, Test::Tuples, 0);
		}

		#[test]
		fn unit_and_tuple_structs() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Unit;

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Newtype(u32);

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Wrapper(Unit, Newtype, (i8,));

			let input = Wrapper(Unit, Newtype(0xdeadbeef), (-7,));
			$test_round_trip(&input, Test::UnitAndTupleStructs, 0);
		}

		#[test]
		fn enum_fieldless() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			enum Foo {
				#[default]
				One,
				Two,
				Three,
			}

			$test_round_trip(&Foo::One, Test::EnumFieldless, 0);
			$test_round_trip(&Foo::Two, Test::EnumFieldless, 1);
			$test_round_trip(&Foo::Three, Test::EnumFieldless, 2);
		}

		#[test]
		fn enum_with_fields() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			enum Foo {
				Bar(Bar),
				Qux {
					x: u16,
					name: String,
				},
				#[default]
				Empty,
			}

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: u32,
			}

			let bar = Foo::Bar(Bar {
				small: 0x01,
				big: 0x02030405,
			});
			$test_round_trip(&bar, Test::EnumWithFields, 0);

			let qux = Foo::Qux {
				x: 0x0607,
				name: "qux".into(),
			};
			$test_round_trip(&qux, Test::EnumWithFields, 1);

			$test_round_trip(&Foo::Empty, Test::EnumWithFields, 2);
		}

		#[test]
		fn boxed() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				num: Box<u32>,
				text: Box<String>,
				nested: Box<Option<Box<u8>>>,
			}

			let input = Foo {
				num: Box::new(0x01020304),
				text: Box::new("hello".into()),
				nested: Box::new(Some(Box::new(0x05))),
			};
			$test_round_trip(&input, Test::Boxed, 0);
		}

		#[test]
		fn vec_of_primitives() {
			$test_round_trip(&Vec::<u16>::new(), Test::VecOfPrimitives, 0);
			$test_round_trip(&vec![1u16, 2, 3], Test::VecOfPrimitives, 1);
			$test_round_trip(&(0..1000u16).collect::<Vec<_>>(), Test::VecOfPrimitives, 2);
		}

		#[test]
		fn vec_of_vecs() {
			let input: Vec<Vec<u8>> = vec![vec![], vec![1], vec![2, 3]];
			$test_round_trip(&input, Test::VecOfVecs, 0);
		}

		#[test]
		fn strings() {
			$test_round_trip(&String::new(), Test::Strings, 0);
			$test_round_trip(&String::from("hello"), Test::Strings, 1);
			$test_round_trip(&String::from("héllo wörld 🎉"), Test::Strings, 2);
			$test_round_trip(
				&String::from("quote \" back \\ nl \n tab \t nul \0"),
				Test::Strings,
				3,
			);
		}

		#[test]
		fn bytes_and_buffers() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				bytes: Bytes,
				shared: SharedBuffer,
			}

			let input = Foo {
				bytes: Bytes(vec![0, 0xff, b' ', b'"']),
				shared: SharedBuffer::from(&b"abc"[..]),
			};
			$test_round_trip(&input, Test::BytesAndBuffers, 0);
		}

		#[test]
		fn options() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				num: Option<u8>,
				text: Option<String>,
				list: Option<Vec<u32>>,
				nested: Option<Option<u8>>,
			}

			$test_round_trip(&Foo::default(), Test::Options, 0);

			let input = Foo {
				num: Some(5),
				text: Some("x".into()),
				list: Some(vec![1, 2]),
				nested: Some(None),
			};
			$test_round_trip(&input, Test::Options, 1);

			let input = Foo {
				nested: Some(Some(7)),
				..Foo::default()
			};
			$test_round_trip(&input, Test::Options, 2);
		}

		#[test]
		fn maps() {
			use std::collections::{BTreeMap, HashMap};

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				names: BTreeMap<String, u32>,
				flags: HashMap<u8, Vec<bool>>,
			}

			let input = Foo {
				names: [("a".to_string(), 1), ("bc".to_string(), 2)].into_iter().collect(),
				flags: [(1, vec![true]), (2, vec![])].into_iter().collect(),
			};
			$test_round_trip(&input, Test::Maps, 0);
		}

		#[test]
		fn ser_with() {
			use std::time::Duration;

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				#[ser_with(DurationAsMillis)]
				timeout: Duration,
				retries: u8,
			}

			let input = Foo {
				timeout: Duration::from_millis(1500),
				retries: 3,
			};
			$test_round_trip(&input, Test::SerWith, 0);
		}

		#[test]
		fn generics() {
			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Pair<A, B> {
				first: A,
				second: B,
			}

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			enum Either<L, R> {
				Left(L),
				Right(R),
				#[default]
				Neither,
			}

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				pair: Pair<u8, String>,
				either: Either<u16, bool>,
			}

			let input = Foo {
				pair: Pair {
					first: 1,
					second: "ab".into(),
				},
				either: Either::Right(true),
			};
			$test_round_trip(&input, Test::Generics, 0);
		}

		#[test]
		fn big_ints() {
			use num_bigint::{BigInt, BigUint};

			#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
			struct Foo {
				unsigned: BigUint,
				signed: BigInt,
			}

			let input = Foo {
				unsigned: BigUint::from(1u8) << 100usize,
				signed: -(BigInt::from(1u8) << 70usize),
			};
			$test_round_trip(&input, Test::BigInts, 0);
		}

		#[test]
		fn station_data() {
			let input = generate_station_data();
			$test_round_trip(&input, Test::StationData, 0);
		}
	};
}

pub(crate) use tests;
