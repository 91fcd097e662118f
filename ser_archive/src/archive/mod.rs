//! Archives: encoders and decoders for each format.
//!
//! An archive wraps a stream. Creating an archive performs the header phase
//! (writing or checking the header, unless flags include `NO_HEADER`). Each
//! subsequent [`save`](OArchive::save) or [`load`](IArchive::load) processes
//! one value, strictly in order. [`finish`](OArchive::finish) ends the archive.
//!
//! Types drive archives through the shape methods (`write_primitive`,
//! `begin_seq`...). Each format decides how a shape is represented.

use crate::{Deserialize, Error, Format, Primitive, Result, Serialize};

mod binary;
pub use binary::{BinaryIArchive, BinaryOArchive};
mod json;
pub use json::{JsonIArchive, JsonOArchive};
mod text;
pub use text::{TextIArchive, TextOArchive};

/// Maximum length of a sequence whose elements occupy no bytes (e.g. `Vec<()>`)
/// which a length-prefixed archive will load.
pub const MAX_ZERO_WIDTH_LEN: usize = 1 << 24;

/// Output archive.
pub trait OArchive: Sized {
	const FORMAT: Format;

	fn write_primitive<P: Primitive>(&mut self, value: P) -> Result<()>;

	/// Write a byte buffer (length-prefixed).
	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

	/// Write a string (length-prefixed).
	fn write_str(&mut self, s: &str) -> Result<()>;

	/// Begin a sequence of `len` elements.
	fn begin_seq(&mut self, len: usize) -> Result<()>;

	fn end_seq(&mut self) -> Result<()>;

	/// Begin a group of values whose count both sides know (tuples, arrays,
	/// enum variants).
	fn begin_tuple(&mut self) -> Result<()>;

	fn end_tuple(&mut self) -> Result<()>;

	/// Begin a struct with named fields.
	/// Each field is introduced by [`field`](OArchive::field).
	fn begin_struct(&mut self) -> Result<()>;

	fn field(&mut self, name: &'static str) -> Result<()>;

	fn end_struct(&mut self) -> Result<()>;

	/// Write presence marker of an `Option`. If `present`, the value follows,
	/// then [`end_option`](OArchive::end_option).
	fn write_option(&mut self, present: bool) -> Result<()>;

	/// End a present `Option`'s value.
	#[inline]
	fn end_option(&mut self) -> Result<()> {
		Ok(())
	}

	/// End archive.
	fn finish(self) -> Result<()>;

	/// Serialize `value`.
	#[inline]
	fn save<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
		value.serialize(self)?;
		Ok(self)
	}
}

/// Input archive.
pub trait IArchive: Sized {
	const FORMAT: Format;

	fn read_primitive<P: Primitive>(&mut self) -> Result<P>;

	fn read_bytes(&mut self) -> Result<Vec<u8>>;

	fn read_str(&mut self) -> Result<String>;

	/// Begin a sequence. Returns the number of elements if the format records
	/// it. Otherwise returns `None`, and [`has_next`](IArchive::has_next) must
	/// be called before each element.
	fn begin_seq(&mut self) -> Result<Option<usize>>;

	/// Returns `true` if an unsized sequence has another element.
	#[inline]
	fn has_next(&mut self) -> Result<bool> {
		Ok(false)
	}

	fn end_seq(&mut self) -> Result<()>;

	fn begin_tuple(&mut self) -> Result<()>;

	fn end_tuple(&mut self) -> Result<()>;

	fn begin_struct(&mut self) -> Result<()>;

	/// Check next field is `name`.
	fn field(&mut self, name: &'static str) -> Result<()>;

	fn end_struct(&mut self) -> Result<()>;

	/// Read presence marker of an `Option`. If `true`, read the value, then
	/// call [`end_option`](IArchive::end_option).
	fn read_option(&mut self) -> Result<bool>;

	#[inline]
	fn end_option(&mut self) -> Result<()> {
		Ok(())
	}

	/// Bytes consumed so far. For error reports.
	fn pos(&self) -> usize;

	/// Bytes left in input. Upper bound for pre-allocation.
	fn remaining(&self) -> usize;

	/// End archive.
	fn finish(self) -> Result<()>;

	/// Deserialize into `value`.
	#[inline]
	fn load<T: Deserialize + ?Sized>(&mut self, value: &mut T) -> Result<&mut Self> {
		value.deserialize(self)?;
		Ok(self)
	}

	/// Read a sequence, calling `f` with each element's index.
	/// Returns number of elements.
	fn read_seq<F>(&mut self, mut f: F) -> Result<usize>
	where F: FnMut(&mut Self, usize) -> Result<()> {
		let count = match self.begin_seq()? {
			Some(len) => {
				let start = self.pos();
				for index in 0..len {
					f(self, index)?;
					// Length of input can't bound a sequence whose elements consume none of it
					if index == 0 && len > MAX_ZERO_WIDTH_LEN && self.pos() == start {
						return Err(Error::malformed(
							start,
							format!("{} elements consuming no input", len),
						));
					}
				}
				len
			}
			None => {
				let mut index = 0;
				while self.has_next()? {
					f(self, index)?;
					index += 1;
				}
				index
			}
		};
		self.end_seq()?;
		Ok(count)
	}
}

/// Static `reason` for a primitive which failed validation.
pub(crate) fn invalid_reason<P: Primitive>() -> &'static str {
	use crate::PrimitiveKind::*;
	match P::KIND {
		Bool => "invalid bool",
		Char => "invalid char",
		Unsigned | Signed | Float => "number out of range",
	}
}
