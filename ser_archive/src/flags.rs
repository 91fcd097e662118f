//! Flags selecting format, storage and encoding options.
//!
//! Flags are combined with `|` into a single `u32`, passed to the entry points
//! as a const generic parameter:
//!
//! ```
//! use ser_archive::{flags::{BINARY, EBIG, NO_HEADER, VEC}, save};
//!
//! let buf = save::<{ BINARY | EBIG | NO_HEADER | VEC }>(&0x0102u16).unwrap();
//! assert_eq!(&*buf, &[1, 2]);
//! ```
//!
//! A flag set must name exactly one format, and exactly one storage kind
//! ([`saved_size`] stores nothing, so accepts none, but still at most one).
//! Sets breaking these rules fail to compile.
//!
//! ```compile_fail
//! use ser_archive::{flags::{BINARY, JSON, MEM}, save};
//!
//! let _ = save::<{ BINARY | JSON | MEM }>(&1u8);
//! ```
//!
//! ```compile_fail
//! use ser_archive::{flags::{BINARY, MEM, VEC}, saved_size};
//!
//! let _ = saved_size::<{ BINARY | MEM | VEC }>(&1u8);
//! ```
//!
//! A stream passed to [`save_to`] must be of the storage kind flags select.
//!
//! ```compile_fail
//! use ser_archive::{flags::{BINARY, MEM}, save_to, streams::VecOStream};
//!
//! let mut out = vec![];
//! let _ = save_to::<{ BINARY | MEM }>(&mut VecOStream::from_vec(&mut out), &1u8);
//! ```
//!
//! These compile:
//!
//! ```
//! use ser_archive::{flags::{BINARY, VEC}, save_to, saved_size, streams::VecOStream};
//!
//! assert_eq!(saved_size::<{ BINARY }>(&1u8).unwrap(), 6);
//! assert_eq!(saved_size::<{ BINARY | VEC }>(&1u8).unwrap(), 6);
//!
//! let mut out = vec![];
//! save_to::<{ BINARY | VEC }>(&mut VecOStream::from_vec(&mut out), &1u8).unwrap();
//! ```
//!
//! [`saved_size`]: crate::saved_size
//! [`save_to`]: crate::save_to

use std::marker::PhantomData;

use crate::streams::BufferedOutput;

// Format kinds
pub const BINARY: u32 = 1 << 0;
pub const TEXT: u32 = 1 << 1;
pub const JSON: u32 = 1 << 2;

/// Do not write (or expect) a header.
pub const NO_HEADER: u32 = 1 << 3;

// Byte order of binary archives. Little-endian if none set.
pub const ELITTLE: u32 = 1 << 4;
pub const EBIG: u32 = 1 << 5;
pub const EHOST: u32 = 1 << 6;

/// Binary archives only: encode integers, chars and lengths as varints.
pub const COMPACT: u32 = 1 << 7;

// Storage kinds
pub const MEM: u32 = 1 << 8;
pub const VEC: u32 = 1 << 9;

pub const FORMAT_MASK: u32 = BINARY | TEXT | JSON;
pub const ENDIAN_MASK: u32 = ELITTLE | EBIG | EHOST;
pub const STORAGE_MASK: u32 = MEM | VEC;
pub const ALL_FLAGS: u32 = FORMAT_MASK | NO_HEADER | ENDIAN_MASK | COMPACT | STORAGE_MASK;

/// Encoding scheme.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum Format {
	Binary = BINARY,
	Text = TEXT,
	Json = JSON,
}

impl Format {
	/// Letter identifying format in archive headers.
	pub const fn letter(self) -> u8 {
		match self {
			Format::Binary => b'B',
			Format::Text => b'T',
			Format::Json => b'J',
		}
	}

	pub const fn from_letter(letter: u8) -> Option<Self> {
		match letter {
			b'B' => Some(Format::Binary),
			b'T' => Some(Format::Text),
			b'J' => Some(Format::Json),
			_ => None,
		}
	}
}

/// Kind of container backing an output stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum Storage {
	/// [`MemOStream`](crate::streams::MemOStream)
	Mem = MEM,
	/// [`VecOStream`](crate::streams::VecOStream)
	Vec = VEC,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Endian {
	Little,
	Big,
}

impl Endian {
	/// Byte order of target.
	pub const HOST: Endian = if cfg!(target_endian = "big") {
		Endian::Big
	} else {
		Endian::Little
	};
}

/// Options decoded from a flag set.
///
/// Each constant is evaluated at compile time, and fails compilation if the
/// flag set is invalid for it. Entry points reference
/// [`ASSERT_FORMAT_VALID`](Config::ASSERT_FORMAT_VALID) and (where they touch
/// storage) [`ASSERT_STORAGE_VALID`](Config::ASSERT_STORAGE_VALID).
pub struct Config<const F: u32>;

impl<const F: u32> Config<F> {
	pub const FORMAT: Format = match F & FORMAT_MASK {
		BINARY => Format::Binary,
		TEXT => Format::Text,
		JSON => Format::Json,
		0 => panic!("flags must include a format: BINARY, TEXT or JSON"),
		_ => panic!("flags must include only one format"),
	};

	pub const STORAGE: Storage = match F & STORAGE_MASK {
		MEM => Storage::Mem,
		VEC => Storage::Vec,
		0 => panic!("flags must include a storage kind: MEM or VEC"),
		_ => panic!("flags must include only one storage kind"),
	};

	pub const ENDIAN: Endian = match F & ENDIAN_MASK {
		0 | ELITTLE => Endian::Little,
		EBIG => Endian::Big,
		EHOST => Endian::HOST,
		_ => panic!("flags must include at most one byte order"),
	};

	pub const HEADER: bool = F & NO_HEADER == 0;

	pub const COMPACT: bool = F & COMPACT != 0;

	/// Flag set must select exactly one format, at most one byte order,
	/// `COMPACT` only with `BINARY`, and contain no unknown bits.
	pub const ASSERT_FORMAT_VALID: () = {
		assert!(F & !ALL_FLAGS == 0, "flags contain unknown bits");
		let format = Self::FORMAT;
		let _ = Self::ENDIAN;
		assert!(
			!Self::COMPACT || matches!(format, Format::Binary),
			"COMPACT can only be used with BINARY"
		);
	};

	/// Flag set must select exactly one storage kind.
	pub const ASSERT_STORAGE_VALID: () = {
		let _ = Self::STORAGE;
	};

	/// Flag set must select no more than one storage kind.
	pub const ASSERT_STORAGE_AT_MOST_ONE: () = assert!(
		(F & STORAGE_MASK).count_ones() <= 1,
		"flags must include only one storage kind"
	);
}

/// Type for static assertion that an output stream implements the storage
/// kind a flag set selects.
pub(crate) struct StorageCheck<W: BufferedOutput, const F: u32> {
	_marker: PhantomData<W>,
}

impl<W: BufferedOutput, const F: u32> StorageCheck<W, F> {
	pub(crate) const ASSERT_STORAGE_MATCHES: () = assert!(
		W::STORAGE as u32 == Config::<F>::STORAGE as u32,
		"stream's storage kind differs from the one flags select"
	);
}
