use super::{invalid_reason, IArchive, OArchive};
use crate::{
	header::{self, Header},
	streams::{InputStream, OutputStream},
	util::{encode_varint, MAX_VARINT_LEN},
	Config, Endian, Error, Format, Primitive, PrimitiveKind, Result,
};

/// Binary output archive.
///
/// Primitives are written fixed-width in the byte order flags select
/// (little-endian by default). Lengths are `u64`. With `COMPACT`, integers,
/// chars and lengths are written as LEB128 varints instead (signed integers
/// zigzag-encoded). Structs, tuples and enums add no framing.
pub struct BinaryOArchive<W: OutputStream, const F: u32> {
	stream: W,
}

impl<W: OutputStream, const F: u32> BinaryOArchive<W, F> {
	/// Create archive, writing header unless flags include `NO_HEADER`.
	pub fn new(mut stream: W) -> Result<Self> {
		if Config::<F>::HEADER {
			stream.write(&Header::for_flags::<F>().to_bytes());
		}
		Ok(Self { stream })
	}

	#[inline]
	fn write_fixed(&mut self, bits: u128, width: usize) {
		match Config::<F>::ENDIAN {
			Endian::Little => self.stream.write(&bits.to_le_bytes()[..width]),
			Endian::Big => self.stream.write(&bits.to_be_bytes()[16 - width..]),
		};
	}

	#[inline]
	fn write_varint(&mut self, value: u128) {
		let mut out = [0; MAX_VARINT_LEN];
		let len = encode_varint(value, &mut out);
		self.stream.write(&out[..len]);
	}

	#[inline]
	fn write_len(&mut self, len: usize) {
		if Config::<F>::COMPACT {
			self.write_varint(len as u128);
		} else {
			self.write_fixed(len as u128, 8);
		}
	}
}

impl<W: OutputStream, const F: u32> OArchive for BinaryOArchive<W, F> {
	const FORMAT: Format = Format::Binary;

	#[inline]
	fn write_primitive<P: Primitive>(&mut self, value: P) -> Result<()> {
		match P::KIND {
			PrimitiveKind::Unsigned | PrimitiveKind::Signed | PrimitiveKind::Char
				if Config::<F>::COMPACT =>
			{
				self.write_varint(value.to_varint())
			}
			_ => self.write_fixed(value.to_bits(), P::WIDTH),
		}
		Ok(())
	}

	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.write_len(bytes.len());
		self.stream.write(bytes);
		Ok(())
	}

	#[inline]
	fn write_str(&mut self, s: &str) -> Result<()> {
		self.write_bytes(s.as_bytes())
	}

	#[inline]
	fn begin_seq(&mut self, len: usize) -> Result<()> {
		self.write_len(len);
		Ok(())
	}

	#[inline]
	fn end_seq(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn begin_tuple(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn end_tuple(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn begin_struct(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn field(&mut self, _name: &'static str) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn end_struct(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn write_option(&mut self, present: bool) -> Result<()> {
		self.write_primitive(present)
	}

	#[inline]
	fn finish(self) -> Result<()> {
		Ok(())
	}
}

/// Binary input archive. Reads what [`BinaryOArchive`] with the same flags
/// writes.
pub struct BinaryIArchive<R: InputStream, const F: u32> {
	stream: R,
}

impl<R: InputStream, const F: u32> BinaryIArchive<R, F> {
	/// Create archive, reading and checking header unless flags include
	/// `NO_HEADER`.
	pub fn new(stream: R) -> Result<Self> {
		let mut archive = Self { stream };
		if Config::<F>::HEADER {
			let mut bytes = [0; header::BINARY_LEN];
			archive.read_exact(&mut bytes)?;
			Header::from_bytes(&bytes)?.verify::<F>()?;
		}
		Ok(archive)
	}

	/// Fill `out` from stream, or fail with `Error::Truncated`.
	fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
		let pos = self.stream.pos();
		let count = self.stream.read(out);
		if count < out.len() {
			return Err(Error::Truncated {
				pos,
				needed: out.len(),
				available: count,
			});
		}
		Ok(())
	}

	fn read_fixed(&mut self, width: usize) -> Result<u128> {
		let mut buf = [0; 16];
		match Config::<F>::ENDIAN {
			Endian::Little => {
				self.read_exact(&mut buf[..width])?;
				Ok(u128::from_le_bytes(buf))
			}
			Endian::Big => {
				self.read_exact(&mut buf[16 - width..])?;
				Ok(u128::from_be_bytes(buf))
			}
		}
	}

	fn read_varint(&mut self) -> Result<u128> {
		let pos = self.stream.pos();
		let mut value = 0u128;
		for index in 0..MAX_VARINT_LEN {
			let byte = self.stream.get().ok_or(Error::Truncated {
				pos,
				needed: index + 1,
				available: index,
			})?;
			let bits = (byte & 0x7f) as u128;
			let shift = index * 7;
			if shift + 7 > 128 && bits >> (128 - shift) != 0 {
				return Err(Error::InvalidValue {
					pos,
					reason: "varint overflow",
				});
			}
			value |= bits << shift;
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}
		Err(Error::InvalidValue {
			pos,
			reason: "varint too long",
		})
	}

	fn read_len(&mut self) -> Result<usize> {
		let pos = self.stream.pos();
		let len = if Config::<F>::COMPACT {
			self.read_varint()?
		} else {
			self.read_fixed(8)?
		};
		usize::try_from(len).map_err(|_| Error::InvalidValue {
			pos,
			reason: "length too large",
		})
	}
}

impl<R: InputStream, const F: u32> IArchive for BinaryIArchive<R, F> {
	const FORMAT: Format = Format::Binary;

	fn read_primitive<P: Primitive>(&mut self) -> Result<P> {
		let pos = self.stream.pos();
		let value = match P::KIND {
			PrimitiveKind::Unsigned | PrimitiveKind::Signed | PrimitiveKind::Char
				if Config::<F>::COMPACT =>
			{
				P::from_varint(self.read_varint()?)
			}
			_ => P::from_bits(self.read_fixed(P::WIDTH)?),
		};
		value.ok_or(Error::InvalidValue {
			pos,
			reason: invalid_reason::<P>(),
		})
	}

	fn read_bytes(&mut self) -> Result<Vec<u8>> {
		let len = self.read_len()?;
		let available = self.stream.remaining();
		if len > available {
			return Err(Error::Truncated {
				pos: self.stream.pos(),
				needed: len,
				available,
			});
		}
		let mut bytes = vec![0; len];
		self.read_exact(&mut bytes)?;
		Ok(bytes)
	}

	fn read_str(&mut self) -> Result<String> {
		let pos = self.stream.pos();
		String::from_utf8(self.read_bytes()?).map_err(|_| Error::InvalidValue {
			pos,
			reason: "invalid UTF-8",
		})
	}

	#[inline]
	fn begin_seq(&mut self) -> Result<Option<usize>> {
		self.read_len().map(Some)
	}

	#[inline]
	fn end_seq(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn begin_tuple(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn end_tuple(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn begin_struct(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn field(&mut self, _name: &'static str) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn end_struct(&mut self) -> Result<()> {
		Ok(())
	}

	#[inline]
	fn read_option(&mut self) -> Result<bool> {
		self.read_primitive()
	}

	#[inline]
	fn pos(&self) -> usize {
		self.stream.pos()
	}

	#[inline]
	fn remaining(&self) -> usize {
		self.stream.remaining()
	}

	#[inline]
	fn finish(self) -> Result<()> {
		Ok(())
	}
}
