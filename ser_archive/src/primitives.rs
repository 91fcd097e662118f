use std::{fmt::Display, str::FromStr};

use crate::util::{sign_extend, unzigzag, width_mask, zigzag};

/// Category of a [`Primitive`]. Archives choose an encoding per kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrimitiveKind {
	Bool,
	Unsigned,
	Signed,
	Float,
	Char,
}

mod private {
	pub trait Sealed {}
}

/// Numeric, boolean and character types archives encode directly.
///
/// Implemented for all integer types, `f32`, `f64`, `bool` and `char`.
/// Cannot be implemented outside this crate.
///
/// Values convert to and from "bits": the value's fixed-width representation
/// in the low [`WIDTH`](Primitive::WIDTH) bytes of a `u128` (two's complement
/// for signed integers, IEEE 754 for floats, scalar value for `char`).
/// `usize` and `isize` are always 8 bytes wide, whatever the target.
pub trait Primitive: private::Sealed + Copy + Display + FromStr + 'static {
	const KIND: PrimitiveKind;

	/// Width in bytes in binary archives.
	const WIDTH: usize;

	fn to_bits(self) -> u128;

	/// Returns `None` if `bits` does not hold a valid value of this type.
	fn from_bits(bits: u128) -> Option<Self>;

	/// Integer value for varint encoding. Signed integers are zigzag-encoded.
	///
	/// Only meaningful for integers and `char`.
	#[inline]
	fn to_varint(self) -> u128 {
		match Self::KIND {
			PrimitiveKind::Signed => zigzag(sign_extend(self.to_bits(), Self::WIDTH)),
			_ => self.to_bits(),
		}
	}

	/// Inverse of [`to_varint`](Primitive::to_varint).
	#[inline]
	fn from_varint(value: u128) -> Option<Self> {
		match Self::KIND {
			PrimitiveKind::Signed => {
				let value = unzigzag(value);
				let min = sign_extend(1 << (Self::WIDTH * 8 - 1), Self::WIDTH);
				if value < min || value > -(min + 1) {
					return None;
				}
				Self::from_bits(value as u128 & width_mask(Self::WIDTH))
			}
			_ => Self::from_bits(value),
		}
	}

	/// `false` for NaN and infinities.
	#[inline]
	fn is_finite(self) -> bool {
		true
	}
}

macro_rules! impl_unsigned {
	($ty:ty, $width:expr) => {
		impl private::Sealed for $ty {}

		impl Primitive for $ty {
			const KIND: PrimitiveKind = PrimitiveKind::Unsigned;
			const WIDTH: usize = $width;

			#[inline]
			fn to_bits(self) -> u128 {
				self as u128
			}

			#[inline]
			fn from_bits(bits: u128) -> Option<Self> {
				<$ty>::try_from(bits).ok()
			}
		}
	};
}

impl_unsigned!(u8, 1);
impl_unsigned!(u16, 2);
impl_unsigned!(u32, 4);
impl_unsigned!(u64, 8);
impl_unsigned!(u128, 16);
impl_unsigned!(usize, 8);

macro_rules! impl_signed {
	($ty:ty, $width:expr) => {
		impl private::Sealed for $ty {}

		impl Primitive for $ty {
			const KIND: PrimitiveKind = PrimitiveKind::Signed;
			const WIDTH: usize = $width;

			#[inline]
			fn to_bits(self) -> u128 {
				self as u128 & width_mask($width)
			}

			#[inline]
			fn from_bits(bits: u128) -> Option<Self> {
				if bits & !width_mask($width) != 0 {
					return None;
				}
				<$ty>::try_from(sign_extend(bits, $width)).ok()
			}
		}
	};
}

impl_signed!(i8, 1);
impl_signed!(i16, 2);
impl_signed!(i32, 4);
impl_signed!(i64, 8);
impl_signed!(i128, 16);
impl_signed!(isize, 8);

macro_rules! impl_float {
	($ty:ty, $bits_ty:ty, $width:expr) => {
		impl private::Sealed for $ty {}

		impl Primitive for $ty {
			const KIND: PrimitiveKind = PrimitiveKind::Float;
			const WIDTH: usize = $width;

			#[inline]
			fn to_bits(self) -> u128 {
				<$ty>::to_bits(self) as u128
			}

			#[inline]
			fn from_bits(bits: u128) -> Option<Self> {
				<$bits_ty>::try_from(bits).ok().map(<$ty>::from_bits)
			}

			#[inline]
			fn is_finite(self) -> bool {
				<$ty>::is_finite(self)
			}
		}
	};
}

impl_float!(f32, u32, 4);
impl_float!(f64, u64, 8);

impl private::Sealed for bool {}

impl Primitive for bool {
	const KIND: PrimitiveKind = PrimitiveKind::Bool;
	const WIDTH: usize = 1;

	#[inline]
	fn to_bits(self) -> u128 {
		self as u128
	}

	#[inline]
	fn from_bits(bits: u128) -> Option<Self> {
		match bits {
			0 => Some(false),
			1 => Some(true),
			_ => None,
		}
	}
}

impl private::Sealed for char {}

impl Primitive for char {
	const KIND: PrimitiveKind = PrimitiveKind::Char;
	const WIDTH: usize = 4;

	#[inline]
	fn to_bits(self) -> u128 {
		self as u128
	}

	#[inline]
	fn from_bits(bits: u128) -> Option<Self> {
		u32::try_from(bits).ok().and_then(char::from_u32)
	}
}
