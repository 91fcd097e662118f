use std::{fmt, result};

use thiserror::Error;

use crate::Format;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors raised while encoding or decoding an archive.
///
/// Writing to a memory stream never fails, so encoding errors are limited to
/// values a format cannot represent. Decoding errors distinguish truncated
/// input, header disagreement and malformed content.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Format(#[from] fmt::Error),
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	// Input errors
	#[error("Input truncated at offset {pos}: needed {needed} bytes, {available} available")]
	Truncated {
		pos: usize,
		needed: usize,
		available: usize,
	},
	#[error("Malformed input at offset {pos}: {reason}")]
	Malformed { pos: usize, reason: String },
	#[error("Invalid value at offset {pos}: {reason}")]
	InvalidValue { pos: usize, reason: &'static str },
	#[error("Length mismatch: expected {expected} elements, found {found}")]
	LengthMismatch { expected: usize, found: usize },
	#[error("Unknown enum variant index {index}")]
	UnknownVariant { index: u32 },

	// Header errors
	#[error("Archive header not found")]
	MissingHeader,
	#[error("Different format found: {found:?}, expected: {expected:?}")]
	FormatMismatch { found: Format, expected: Format },
	#[error("Unsupported archive version {found}, newest supported is {supported}")]
	UnsupportedVersion { found: u8, supported: u8 },
	#[error("Archive options differ: found {found:#04x}, expected {expected:#04x}")]
	OptionsMismatch { found: u8, expected: u8 },

	// Output errors
	#[error("Value cannot be represented in this format: {0}")]
	Unrepresentable(&'static str),

	#[error("`unget` must directly follow a successful `get`")]
	InvalidUnget,
}

impl Error {
	#[inline]
	pub(crate) fn malformed(pos: usize, reason: impl Into<String>) -> Self {
		Self::Malformed {
			pos,
			reason: reason.into(),
		}
	}

	/// Returns `true` if this error reports input ending before a value was
	/// complete.
	pub fn is_truncated(&self) -> bool {
		matches!(self, Self::Truncated { .. })
	}

	/// Returns `true` if this error came from header validation.
	pub fn is_header_mismatch(&self) -> bool {
		matches!(
			self,
			Self::MissingHeader
				| Self::FormatMismatch { .. }
				| Self::UnsupportedVersion { .. }
				| Self::OptionsMismatch { .. }
		)
	}
}
