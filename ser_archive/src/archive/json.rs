use std::{fmt::Write as _, str};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::{invalid_reason, IArchive, OArchive};
use crate::{
	header::Header,
	streams::{FmtWriter, InputStream, IoWriter, OutputStream},
	Config, Error, Format, Primitive, PrimitiveKind, Result,
};

/// JSON output archive.
///
/// The archive is a single JSON array. Its first element is the header
/// string (unless flags include `NO_HEADER`), followed by one element per
/// value saved.
///
/// * integers and finite floats are numbers, `bool` is `true` / `false`
/// * `char` and strings are strings
/// * byte buffers are base64 strings
/// * sequences, tuples and enum variants are arrays
/// * structs are objects keyed by field name
/// * `None` is `null`, `Some(v)` is `[v]`
///
/// No whitespace is written. Strings are escaped by `serde_json`.
///
/// ```
/// use ser_archive::{flags::{JSON, NO_HEADER, VEC}, save};
///
/// let buf = save::<{ JSON | NO_HEADER | VEC }>((&1u8, &Some('x'), &None::<u8>, &[1u16, 2])).unwrap();
/// assert_eq!(&*buf, br#"[1,["x"],null,[1,2]]"#);
/// ```
pub struct JsonOArchive<W: OutputStream, const F: u32> {
	stream: W,
	need_comma: bool,
	scratch: String,
}

impl<W: OutputStream, const F: u32> JsonOArchive<W, F> {
	/// Create archive, opening the document array and writing header string
	/// unless flags include `NO_HEADER`.
	pub fn new(mut stream: W) -> Result<Self> {
		stream.put(b'[');
		let mut archive = Self {
			stream,
			need_comma: false,
			scratch: String::new(),
		};
		if Config::<F>::HEADER {
			archive.begin_value();
			archive.stream.put(b'"');
			archive.stream.write(&Header::for_flags::<F>().to_token());
			archive.stream.put(b'"');
			archive.need_comma = true;
		}
		Ok(archive)
	}

	/// Write comma if a value precedes this one in the current container.
	#[inline]
	fn begin_value(&mut self) {
		if self.need_comma {
			self.stream.put(b',');
		}
	}

	fn open(&mut self, bracket: u8) {
		self.begin_value();
		self.stream.put(bracket);
		self.need_comma = false;
	}

	fn close(&mut self, bracket: u8) {
		self.stream.put(bracket);
		self.need_comma = true;
	}

	/// Write `s` as a quoted, escaped JSON string.
	#[inline]
	fn write_string(stream: &mut W, s: &str) -> Result<()> {
		serde_json::to_writer(IoWriter(stream), s)?;
		Ok(())
	}
}

impl<W: OutputStream, const F: u32> OArchive for JsonOArchive<W, F> {
	const FORMAT: Format = Format::Json;

	fn write_primitive<P: Primitive>(&mut self, value: P) -> Result<()> {
		if !value.is_finite() {
			return Err(Error::Unrepresentable("JSON has no NaN or infinite numbers"));
		}
		self.begin_value();
		match P::KIND {
			PrimitiveKind::Char => {
				self.scratch.clear();
				write!(self.scratch, "{}", value)?;
				Self::write_string(&mut self.stream, &self.scratch)?;
			}
			_ => write!(FmtWriter(&mut self.stream), "{}", value)?,
		}
		self.need_comma = true;
		Ok(())
	}

	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.begin_value();
		self.scratch.clear();
		STANDARD.encode_string(bytes, &mut self.scratch);
		Self::write_string(&mut self.stream, &self.scratch)?;
		self.need_comma = true;
		Ok(())
	}

	fn write_str(&mut self, s: &str) -> Result<()> {
		self.begin_value();
		Self::write_string(&mut self.stream, s)?;
		self.need_comma = true;
		Ok(())
	}

	#[inline]
	fn begin_seq(&mut self, _len: usize) -> Result<()> {
		self.open(b'[');
		Ok(())
	}

	#[inline]
	fn end_seq(&mut self) -> Result<()> {
		self.close(b']');
		Ok(())
	}

	#[inline]
	fn begin_tuple(&mut self) -> Result<()> {
		self.open(b'[');
		Ok(())
	}

	#[inline]
	fn end_tuple(&mut self) -> Result<()> {
		self.close(b']');
		Ok(())
	}

	#[inline]
	fn begin_struct(&mut self) -> Result<()> {
		self.open(b'{');
		Ok(())
	}

	fn field(&mut self, name: &'static str) -> Result<()> {
		self.begin_value();
		Self::write_string(&mut self.stream, name)?;
		self.stream.put(b':');
		self.need_comma = false;
		Ok(())
	}

	#[inline]
	fn end_struct(&mut self) -> Result<()> {
		self.close(b'}');
		Ok(())
	}

	fn write_option(&mut self, present: bool) -> Result<()> {
		if present {
			self.open(b'[');
		} else {
			self.begin_value();
			self.stream.write(b"null");
			self.need_comma = true;
		}
		Ok(())
	}

	#[inline]
	fn end_option(&mut self) -> Result<()> {
		self.close(b']');
		Ok(())
	}

	fn finish(mut self) -> Result<()> {
		self.stream.put(b']');
		Ok(())
	}
}

/// JSON input archive. Reads what [`JsonOArchive`] with the same flags writes.
///
/// Whitespace between tokens is accepted. Struct fields must appear in
/// declaration order.
pub struct JsonIArchive<R: InputStream, const F: u32> {
	stream: R,
	need_comma: bool,
	scratch: Vec<u8>,
}

impl<R: InputStream, const F: u32> JsonIArchive<R, F> {
	/// Create archive, opening the document array and reading and checking
	/// header string unless flags include `NO_HEADER`.
	pub fn new(stream: R) -> Result<Self> {
		let mut archive = Self {
			stream,
			need_comma: false,
			scratch: Vec::new(),
		};
		archive.expect(b'[')?;
		if Config::<F>::HEADER {
			archive.skip_whitespace();
			if archive.stream.peek() != Some(b'"') {
				log::debug!("Rejecting JSON archive: first element is not a header string");
				return Err(Error::MissingHeader);
			}
			let (token, _) = archive.parse_string()?;
			Header::from_token(token.as_bytes())?.verify::<F>()?;
			archive.need_comma = true;
		}
		Ok(archive)
	}

	fn skip_whitespace(&mut self) {
		while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.stream.peek() {
			self.stream.get();
		}
	}

	fn truncated(&self) -> Error {
		Error::Truncated {
			pos: self.stream.pos(),
			needed: 1,
			available: 0,
		}
	}

	/// Consume `expected` byte, after any whitespace.
	fn expect(&mut self, expected: u8) -> Result<()> {
		self.skip_whitespace();
		let pos = self.stream.pos();
		match self.stream.get() {
			Some(byte) if byte == expected => Ok(()),
			Some(byte) => Err(Error::malformed(
				pos,
				format!("expected `{}`, found `{}`", expected as char, byte as char),
			)),
			None => Err(self.truncated()),
		}
	}

	/// Consume comma if a value precedes this one in the current container.
	/// Leaves stream at start of value.
	fn begin_value(&mut self) -> Result<()> {
		if self.need_comma {
			self.expect(b',')?;
			self.need_comma = false;
		}
		self.skip_whitespace();
		Ok(())
	}

	fn open(&mut self, bracket: u8) -> Result<()> {
		self.begin_value()?;
		self.expect(bracket)?;
		self.need_comma = false;
		Ok(())
	}

	fn close(&mut self, bracket: u8) -> Result<()> {
		self.expect(bracket)?;
		self.need_comma = true;
		Ok(())
	}

	/// Consume bytes while `accept` matches, into scratch buffer.
	/// Returns position of first byte.
	fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> Result<usize> {
		let start = self.stream.pos();
		self.scratch.clear();
		while let Some(byte) = self.stream.get() {
			if !accept(byte) {
				self.stream.unget()?;
				break;
			}
			self.scratch.push(byte);
		}
		if self.scratch.is_empty() {
			return match self.stream.peek() {
				Some(byte) => Err(Error::malformed(
					start,
					format!("unexpected `{}`", byte as char),
				)),
				None => Err(self.truncated()),
			};
		}
		Ok(start)
	}

	/// Scan a quoted string token into scratch buffer, then decode it.
	/// Returns string and position of opening quote.
	fn parse_string(&mut self) -> Result<(String, usize)> {
		self.skip_whitespace();
		let start = self.stream.pos();
		self.expect(b'"')?;
		self.scratch.clear();
		self.scratch.push(b'"');
		loop {
			match self.stream.get() {
				None => return Err(self.truncated()),
				Some(b'"') => break,
				Some(b'\\') => {
					self.scratch.push(b'\\');
					match self.stream.get() {
						Some(byte) => self.scratch.push(byte),
						None => return Err(self.truncated()),
					}
				}
				Some(byte) => self.scratch.push(byte),
			}
		}
		self.scratch.push(b'"');
		let s = serde_json::from_slice(&self.scratch).map_err(|err| syntax_error(start, err))?;
		Ok((s, start))
	}

	/// Read a string value.
	fn read_string(&mut self) -> Result<(String, usize)> {
		self.begin_value()?;
		let string = self.parse_string()?;
		self.need_comma = true;
		Ok(string)
	}

	/// Read a number token into scratch buffer, checking JSON number grammar.
	fn read_number(&mut self) -> Result<usize> {
		let pos = self.take_while(|byte| matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E'))?;
		serde_json::from_slice::<serde_json::Number>(&self.scratch)
			.map_err(|err| syntax_error(pos, err))?;
		Ok(pos)
	}
}

/// Report a token `serde_json` rejected, at `pos` in the archive.
fn syntax_error(pos: usize, err: serde_json::Error) -> Error {
	Error::malformed(pos, format!("invalid JSON token: {}", err))
}

impl<R: InputStream, const F: u32> IArchive for JsonIArchive<R, F> {
	const FORMAT: Format = Format::Json;

	fn read_primitive<P: Primitive>(&mut self) -> Result<P> {
		let value = match P::KIND {
			PrimitiveKind::Char => {
				let (s, pos) = self.read_string()?;
				let mut chars = s.chars();
				let value = match (chars.next(), chars.next()) {
					(Some(c), None) => P::from_bits(c as u128),
					_ => None,
				};
				return value.ok_or(Error::InvalidValue {
					pos,
					reason: "expected a single character",
				});
			}
			PrimitiveKind::Bool => {
				self.begin_value()?;
				let pos = self.take_while(|byte| byte.is_ascii_lowercase())?;
				(str::from_utf8(&self.scratch).ok().and_then(|s| s.parse().ok()), pos)
			}
			_ => {
				self.begin_value()?;
				let pos = self.read_number()?;
				(str::from_utf8(&self.scratch).ok().and_then(|s| s.parse().ok()), pos)
			}
		};
		self.need_comma = true;
		match value {
			(Some(value), _) => Ok(value),
			(None, pos) => Err(Error::InvalidValue {
				pos,
				reason: invalid_reason::<P>(),
			}),
		}
	}

	fn read_bytes(&mut self) -> Result<Vec<u8>> {
		let (encoded, pos) = self.read_string()?;
		STANDARD.decode(encoded).map_err(|_| Error::InvalidValue {
			pos,
			reason: "invalid base64",
		})
	}

	#[inline]
	fn read_str(&mut self) -> Result<String> {
		Ok(self.read_string()?.0)
	}

	#[inline]
	fn begin_seq(&mut self) -> Result<Option<usize>> {
		self.open(b'[')?;
		Ok(None)
	}

	fn has_next(&mut self) -> Result<bool> {
		self.skip_whitespace();
		match self.stream.peek() {
			Some(b']') => Ok(false),
			Some(_) => Ok(true),
			None => Err(self.truncated()),
		}
	}

	#[inline]
	fn end_seq(&mut self) -> Result<()> {
		self.close(b']')
	}

	#[inline]
	fn begin_tuple(&mut self) -> Result<()> {
		self.open(b'[')
	}

	#[inline]
	fn end_tuple(&mut self) -> Result<()> {
		self.close(b']')
	}

	#[inline]
	fn begin_struct(&mut self) -> Result<()> {
		self.open(b'{')
	}

	fn field(&mut self, name: &'static str) -> Result<()> {
		let (key, pos) = self.read_string()?;
		if key != name {
			return Err(Error::malformed(
				pos,
				format!("expected field `{}`, found `{}`", name, key),
			));
		}
		self.expect(b':')?;
		self.need_comma = false;
		Ok(())
	}

	#[inline]
	fn end_struct(&mut self) -> Result<()> {
		self.close(b'}')
	}

	fn read_option(&mut self) -> Result<bool> {
		self.begin_value()?;
		if self.stream.peek() != Some(b'n') {
			self.expect(b'[')?;
			return Ok(true);
		}
		let pos = self.take_while(|byte| byte.is_ascii_lowercase())?;
		if self.scratch != b"null" {
			return Err(Error::malformed(pos, "expected `null`"));
		}
		self.need_comma = true;
		Ok(false)
	}

	#[inline]
	fn end_option(&mut self) -> Result<()> {
		self.close(b']')
	}

	#[inline]
	fn pos(&self) -> usize {
		self.stream.pos()
	}

	#[inline]
	fn remaining(&self) -> usize {
		self.stream.remaining()
	}

	fn finish(mut self) -> Result<()> {
		self.expect(b']')?;
		self.skip_whitespace();
		Ok(())
	}
}
