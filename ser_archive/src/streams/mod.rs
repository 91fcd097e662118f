//! Byte streams archives read from and write to.
//!
//! Output streams: [`MemOStream`] (growable shared region), [`VecOStream`]
//! (appends to a `Vec<u8>`) and [`CountOStream`] (discards bytes, counts them).
//!
//! Input stream: [`MemIStream`], a cursor over borrowed bytes.

use std::{fmt, io};

use crate::{
	buffer::{IntrusiveBuffer, SharedBuffer},
	Result, Storage,
};

mod count;
pub use count::CountOStream;
mod mem;
pub use mem::{MemIStream, MemOStream, DEFAULT_GROWTH_FACTOR, DEFAULT_RESERVED};
mod vec;
pub use vec::VecOStream;

/// Sink for bytes.
///
/// Writes to in-memory streams cannot fail, so `write` and `put` return
/// nothing but the number of bytes written.
pub trait OutputStream {
	/// Append `bytes` to stream. Returns number of bytes written.
	fn write(&mut self, bytes: &[u8]) -> usize;

	/// Append a single byte.
	#[inline]
	fn put(&mut self, byte: u8) {
		self.write(&[byte]);
	}

	/// Number of bytes written so far.
	fn len(&self) -> usize;

	#[inline]
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Output stream which retains the bytes written to it.
pub trait BufferedOutput: OutputStream {
	/// Storage kind this stream implements.
	const STORAGE: Storage;

	/// Get an owning buffer over bytes written so far.
	///
	/// Later writes to the stream never alter the returned buffer's contents.
	fn get_shared_buffer(&self) -> SharedBuffer;

	/// Get a view of bytes written so far, valid until the stream is next
	/// mutated.
	fn get_intrusive_buffer(&self) -> IntrusiveBuffer<'_>;
}

/// Source of bytes.
pub trait InputStream {
	/// Copy up to `out.len()` bytes into `out`. Returns number of bytes copied,
	/// which is less than requested only when input is exhausted.
	fn read(&mut self, out: &mut [u8]) -> usize;

	/// Returns `true` if no bytes remain.
	#[inline]
	fn empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Look at next byte without consuming it.
	fn peek(&self) -> Option<u8>;

	/// Consume next byte.
	fn get(&mut self) -> Option<u8>;

	/// Step back over the byte returned by the immediately preceding `get`.
	///
	/// Only one step back is allowed, and only directly after a `get` which
	/// returned a byte. Anything else is [`Error::InvalidUnget`].
	///
	/// [`Error::InvalidUnget`]: crate::Error::InvalidUnget
	fn unget(&mut self) -> Result<()>;

	/// Bytes consumed so far.
	fn pos(&self) -> usize;

	/// Bytes not yet consumed.
	fn remaining(&self) -> usize;
}

/// Adapter for formatting values straight into an [`OutputStream`] with
/// `write!`.
pub(crate) struct FmtWriter<'s, S: OutputStream + ?Sized>(pub &'s mut S);

impl<S: OutputStream + ?Sized> fmt::Write for FmtWriter<'_, S> {
	#[inline]
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.0.write(s.as_bytes());
		Ok(())
	}
}

/// Adapter for encoders which write to an [`io::Write`].
pub(crate) struct IoWriter<'s, S: OutputStream + ?Sized>(pub &'s mut S);

impl<S: OutputStream + ?Sized> io::Write for IoWriter<'_, S> {
	#[inline]
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Ok(self.0.write(buf))
	}

	#[inline]
	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<S: OutputStream + ?Sized> OutputStream for &mut S {
	#[inline]
	fn write(&mut self, bytes: &[u8]) -> usize {
		(**self).write(bytes)
	}

	#[inline]
	fn put(&mut self, byte: u8) {
		(**self).put(byte)
	}

	#[inline]
	fn len(&self) -> usize {
		(**self).len()
	}
}

impl<S: InputStream + ?Sized> InputStream for &mut S {
	#[inline]
	fn read(&mut self, out: &mut [u8]) -> usize {
		(**self).read(out)
	}

	#[inline]
	fn peek(&self) -> Option<u8> {
		(**self).peek()
	}

	#[inline]
	fn get(&mut self) -> Option<u8> {
		(**self).get()
	}

	#[inline]
	fn unget(&mut self) -> Result<()> {
		(**self).unget()
	}

	#[inline]
	fn pos(&self) -> usize {
		(**self).pos()
	}

	#[inline]
	fn remaining(&self) -> usize {
		(**self).remaining()
	}
}
