use std::num;

use crate::{Deserialize, Error, IArchive, OArchive, Result, Serialize};

macro_rules! impl_primitive {
	($ty:ty) => {
		impl Serialize for $ty {
			#[inline(always)]
			fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
				ar.write_primitive(*self)
			}
		}

		impl Deserialize for $ty {
			#[inline(always)]
			fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
				*self = ar.read_primitive()?;
				Ok(())
			}
		}
	};
}

impl_primitive!(u8);
impl_primitive!(u16);
impl_primitive!(u32);
impl_primitive!(u64);
impl_primitive!(u128);
impl_primitive!(usize);

impl_primitive!(i8);
impl_primitive!(i16);
impl_primitive!(i32);
impl_primitive!(i64);
impl_primitive!(i128);
impl_primitive!(isize);

impl_primitive!(f32);
impl_primitive!(f64);

impl_primitive!(bool);
impl_primitive!(char);

// Encoded as the inner integer. Zero is rejected on load.
macro_rules! impl_non_zero {
	($ty:ty, $inner:ty) => {
		impl Serialize for $ty {
			#[inline]
			fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
				ar.write_primitive(self.get())
			}
		}

		impl Deserialize for $ty {
			fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
				let pos = ar.pos();
				let value: $inner = ar.read_primitive()?;
				*self = <$ty>::new(value).ok_or(Error::InvalidValue {
					pos,
					reason: "zero in non-zero integer",
				})?;
				Ok(())
			}
		}
	};
}

impl_non_zero!(num::NonZeroU8, u8);
impl_non_zero!(num::NonZeroU16, u16);
impl_non_zero!(num::NonZeroU32, u32);
impl_non_zero!(num::NonZeroU64, u64);
impl_non_zero!(num::NonZeroU128, u128);
impl_non_zero!(num::NonZeroUsize, usize);

impl_non_zero!(num::NonZeroI8, i8);
impl_non_zero!(num::NonZeroI16, i16);
impl_non_zero!(num::NonZeroI32, i32);
impl_non_zero!(num::NonZeroI64, i64);
impl_non_zero!(num::NonZeroI128, i128);
impl_non_zero!(num::NonZeroIsize, isize);
