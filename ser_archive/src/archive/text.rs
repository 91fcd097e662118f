use std::{fmt::Write as _, str};

use super::{invalid_reason, IArchive, OArchive};
use crate::{
	header::Header,
	streams::{FmtWriter, InputStream, OutputStream},
	Config, Error, Format, Primitive, PrimitiveKind, Result,
};

const SEPARATOR: u8 = b' ';
const LEN_TERMINATOR: u8 = b':';

/// Text output archive.
///
/// Writes a sequence of tokens separated by single spaces:
///
/// * integers and floats in decimal, `bool` as `true` / `false`
/// * `char` as its scalar value
/// * strings and byte buffers as `<len>:<raw bytes>`
/// * sequences as an element count, followed by the elements
/// * options as `true` / `false`, followed by the value if present
///
/// Structs and tuples add no framing.
///
/// ```
/// use ser_archive::{flags::{NO_HEADER, TEXT, VEC}, save};
///
/// let buf = save::<{ TEXT | NO_HEADER | VEC }>((&-5i32, &vec![1.5f32], &"hi")).unwrap();
/// assert_eq!(&*buf, b"-5 1 1.5 2:hi");
/// ```
pub struct TextOArchive<W: OutputStream, const F: u32> {
	stream: W,
	first: bool,
}

impl<W: OutputStream, const F: u32> TextOArchive<W, F> {
	/// Create archive, writing header token unless flags include `NO_HEADER`.
	pub fn new(stream: W) -> Result<Self> {
		let mut archive = Self {
			stream,
			first: true,
		};
		if Config::<F>::HEADER {
			archive.separate();
			archive.stream.write(&Header::for_flags::<F>().to_token());
		}
		Ok(archive)
	}

	/// Write separator, unless nothing written yet.
	#[inline]
	fn separate(&mut self) {
		if self.first {
			self.first = false;
		} else {
			self.stream.put(SEPARATOR);
		}
	}

	fn write_len(&mut self, len: usize) -> Result<()> {
		write!(FmtWriter(&mut self.stream), "{}", len)?;
		Ok(())
	}
}

impl<W: OutputStream, const F: u32> OArchive for TextOArchive<W, F> {
	const FORMAT: Format = Format::Text;

	fn write_primitive<P: Primitive>(&mut self, value: P) -> Result<()> {
		self.separate();
		let mut out = FmtWriter(&mut self.stream);
		match P::KIND {
			PrimitiveKind::Char => write!(out, "{}", value.to_bits())?,
			_ => write!(out, "{}", value)?,
		}
		Ok(())
	}

	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.separate();
		self.write_len(bytes.len())?;
		self.stream.put(LEN_TERMINATOR);
		self.stream.write(bytes);
		Ok(())
	}

	#[inline]
	fn write_str(&mut self, s: &str) -> Result<()> {
		self.write_bytes(s.as_bytes())
	}

	#[inline]
	fn begin_seq(&mut self, len: usize) -> Result<()> {
		self.separate();
		self.write_len(len)
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

/// Text input archive. Reads what [`TextOArchive`] with the same flags writes.
pub struct TextIArchive<R: InputStream, const F: u32> {
	stream: R,
	first: bool,
	scratch: Vec<u8>,
}

impl<R: InputStream, const F: u32> TextIArchive<R, F> {
	/// Create archive, reading and checking header token unless flags include
	/// `NO_HEADER`.
	pub fn new(stream: R) -> Result<Self> {
		let mut archive = Self {
			stream,
			first: true,
			scratch: Vec::new(),
		};
		if Config::<F>::HEADER {
			archive.next_token(|byte| byte == SEPARATOR)?;
			Header::from_token(&archive.scratch)?.verify::<F>()?;
		}
		Ok(archive)
	}

	/// Consume separator, unless nothing read yet.
	fn separate(&mut self) -> Result<()> {
		if self.first {
			self.first = false;
			return Ok(());
		}
		let pos = self.stream.pos();
		match self.stream.get() {
			Some(SEPARATOR) => Ok(()),
			Some(byte) => Err(Error::malformed(
				pos,
				format!("expected separator, found {:?}", byte as char),
			)),
			None => Err(Error::Truncated {
				pos,
				needed: 1,
				available: 0,
			}),
		}
	}

	/// Read bytes into scratch buffer until `is_end` matches a byte or input
	/// runs out. Terminating byte is left in stream.
	/// Returns position of token start.
	fn next_token(&mut self, is_end: impl Fn(u8) -> bool) -> Result<usize> {
		self.separate()?;
		let start = self.stream.pos();
		self.scratch.clear();
		while let Some(byte) = self.stream.get() {
			if is_end(byte) {
				self.stream.unget()?;
				break;
			}
			self.scratch.push(byte);
		}
		if self.scratch.is_empty() {
			return match self.stream.peek() {
				None => Err(Error::Truncated {
					pos: start,
					needed: 1,
					available: 0,
				}),
				Some(_) => Err(Error::malformed(start, "empty token")),
			};
		}
		Ok(start)
	}

	/// Read a whitespace-delimited token and parse it with `FromStr`.
	fn parse_token<T: str::FromStr>(&mut self, what: &str) -> Result<(T, usize)> {
		let pos = self.next_token(|byte| byte == SEPARATOR)?;
		str::from_utf8(&self.scratch)
			.ok()
			.and_then(|token| token.parse().ok())
			.map(|value| (value, pos))
			.ok_or_else(|| {
				Error::malformed(
					pos,
					format!("invalid {} `{}`", what, String::from_utf8_lossy(&self.scratch)),
				)
			})
	}

	fn read_len_prefixed(&mut self) -> Result<Vec<u8>> {
		let pos = self.next_token(|byte| byte == LEN_TERMINATOR || byte == SEPARATOR)?;
		let len = str::from_utf8(&self.scratch)
			.ok()
			.filter(|digits| digits.bytes().all(|byte| byte.is_ascii_digit()))
			.and_then(|digits| digits.parse::<usize>().ok())
			.ok_or_else(|| Error::malformed(pos, "invalid length"))?;

		let colon_pos = self.stream.pos();
		if self.stream.get() != Some(LEN_TERMINATOR) {
			return Err(Error::malformed(colon_pos, "expected `:` after length"));
		}

		let available = self.stream.remaining();
		if len > available {
			return Err(Error::Truncated {
				pos: self.stream.pos(),
				needed: len,
				available,
			});
		}
		let mut bytes = vec![0; len];
		self.stream.read(&mut bytes);
		Ok(bytes)
	}
}

impl<R: InputStream, const F: u32> IArchive for TextIArchive<R, F> {
	const FORMAT: Format = Format::Text;

	fn read_primitive<P: Primitive>(&mut self) -> Result<P> {
		match P::KIND {
			PrimitiveKind::Char => {
				let (scalar, pos) = self.parse_token::<u32>("char")?;
				P::from_bits(scalar as u128).ok_or(Error::InvalidValue {
					pos,
					reason: invalid_reason::<P>(),
				})
			}
			PrimitiveKind::Bool => Ok(self.parse_token::<P>("bool")?.0),
			_ => Ok(self.parse_token::<P>("number")?.0),
		}
	}

	#[inline]
	fn read_bytes(&mut self) -> Result<Vec<u8>> {
		self.read_len_prefixed()
	}

	fn read_str(&mut self) -> Result<String> {
		let pos = self.stream.pos();
		String::from_utf8(self.read_len_prefixed()?).map_err(|_| Error::InvalidValue {
			pos,
			reason: "invalid UTF-8",
		})
	}

	#[inline]
	fn begin_seq(&mut self) -> Result<Option<usize>> {
		Ok(Some(self.parse_token::<usize>("length")?.0))
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
