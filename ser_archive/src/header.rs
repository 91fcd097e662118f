//! Archive header.
//!
//! A header is the magic `SAR`, a format letter (`B`, `T` or `J`) and an info
//! byte: bits 0-3 hold the version, bit 4 is set for big-endian binary
//! archives, bit 5 for compact binary archives.
//!
//! Binary archives store the info byte raw (5 bytes total). Text and JSON
//! archives write it as 2 uppercase hex digits, making a 6 character token
//! (e.g. `SART01`).

use crate::{Config, Endian, Error, Format, Result};

pub const MAGIC: &[u8; 3] = b"SAR";

/// Current archive version.
pub const VERSION: u8 = 1;

/// Length of binary header.
pub const BINARY_LEN: usize = 5;

/// Length of text/JSON header token.
pub const TOKEN_LEN: usize = 6;

const VERSION_MASK: u8 = 0x0f;
const BIG_ENDIAN_BIT: u8 = 1 << 4;
const COMPACT_BIT: u8 = 1 << 5;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Header {
	pub format: Format,
	pub version: u8,
	/// Byte order and compact bits.
	pub options: u8,
}

impl Header {
	/// Header an archive with flags `F` writes.
	pub const fn for_flags<const F: u32>() -> Self {
		let format = Config::<F>::FORMAT;
		let options = match format {
			Format::Binary => {
				let endian = match Config::<F>::ENDIAN {
					Endian::Big => BIG_ENDIAN_BIT,
					Endian::Little => 0,
				};
				let compact = if Config::<F>::COMPACT { COMPACT_BIT } else { 0 };
				endian | compact
			}
			Format::Text | Format::Json => 0,
		};
		Self {
			format,
			version: VERSION,
			options,
		}
	}

	#[inline]
	pub const fn info(&self) -> u8 {
		self.version | self.options
	}

	/// Encode as binary header.
	pub const fn to_bytes(&self) -> [u8; BINARY_LEN] {
		[MAGIC[0], MAGIC[1], MAGIC[2], self.format.letter(), self.info()]
	}

	/// Encode as text/JSON header token.
	pub const fn to_token(&self) -> [u8; TOKEN_LEN] {
		let info = self.info();
		[
			MAGIC[0],
			MAGIC[1],
			MAGIC[2],
			self.format.letter(),
			HEX_DIGITS[(info >> 4) as usize],
			HEX_DIGITS[(info & 0x0f) as usize],
		]
	}

	/// Decode binary header.
	pub fn from_bytes(bytes: &[u8; BINARY_LEN]) -> Result<Self> {
		let format = parse_tag(&bytes[..4])?;
		Ok(Self::from_info(format, bytes[4]))
	}

	/// Decode text/JSON header token.
	pub fn from_token(token: &[u8]) -> Result<Self> {
		let format = parse_tag(token)?;
		let info = match token {
			&[_, _, _, _, high, low] => hex_value(high).zip(hex_value(low)),
			_ => None,
		};
		match info {
			Some((high, low)) => Ok(Self::from_info(format, (high << 4) | low)),
			None => {
				log::debug!("Rejecting header token {:?}: bad info digits", String::from_utf8_lossy(token));
				Err(Error::MissingHeader)
			}
		}
	}

	fn from_info(format: Format, info: u8) -> Self {
		Self {
			format,
			version: info & VERSION_MASK,
			options: info & !VERSION_MASK,
		}
	}

	/// Check header was written by an archive compatible with one reading
	/// with flags `F`.
	pub fn verify<const F: u32>(&self) -> Result<()> {
		let expected = Self::for_flags::<F>();

		if self.format != expected.format {
			log::debug!("Rejecting header: format {:?}, expected {:?}", self.format, expected.format);
			return Err(Error::FormatMismatch {
				found: self.format,
				expected: expected.format,
			});
		}

		if self.version == 0 || self.version > VERSION {
			log::debug!("Rejecting header: version {}", self.version);
			return Err(Error::UnsupportedVersion {
				found: self.version,
				supported: VERSION,
			});
		}

		if self.options != expected.options {
			log::debug!(
				"Rejecting header: options {:#04x}, expected {:#04x}",
				self.options,
				expected.options
			);
			return Err(Error::OptionsMismatch {
				found: self.options,
				expected: expected.options,
			});
		}

		Ok(())
	}
}

/// Parse magic and format letter.
fn parse_tag(bytes: &[u8]) -> Result<Format> {
	let format = match bytes {
		[a, b, c, letter, ..] if [*a, *b, *c] == *MAGIC => Format::from_letter(*letter),
		_ => None,
	};
	format.ok_or_else(|| {
		log::debug!("Rejecting header: no magic found");
		Error::MissingHeader
	})
}

fn hex_value(digit: u8) -> Option<u8> {
	match digit {
		b'0'..=b'9' => Some(digit - b'0'),
		b'A'..=b'F' => Some(digit - b'A' + 10),
		_ => None,
	}
}
