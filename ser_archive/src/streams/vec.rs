use std::borrow::BorrowMut;

use super::{BufferedOutput, OutputStream};
use crate::{
	buffer::{IntrusiveBuffer, SharedBuffer},
	Storage,
};

/// Output stream appending to a `Vec<u8>`.
///
/// The `Vec` is either owned by the stream, or borrowed from the caller so
/// they keep access to it afterwards. Growth follows `Vec`'s own policy.
///
/// Bytes already in the `Vec` when the stream is created are kept, and count
/// towards [`len`](OutputStream::len).
///
/// # Example
///
/// ```
/// use ser_archive::streams::{OutputStream, VecOStream};
///
/// let mut out = vec![0xff];
/// let mut stream = VecOStream::from_vec(&mut out);
/// stream.write(&[1, 2]);
/// assert_eq!(out, vec![0xff, 1, 2]);
/// ```
pub struct VecOStream<BorrowedVec: BorrowMut<Vec<u8>>> {
	vec: BorrowedVec,
}

impl VecOStream<Vec<u8>> {
	/// Create new [`VecOStream`] owning an empty `Vec`.
	#[inline]
	pub fn new() -> Self {
		Self { vec: Vec::new() }
	}

	/// Create new [`VecOStream`] owning an empty `Vec` with `capacity`
	/// reserved.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			vec: Vec::with_capacity(capacity),
		}
	}
}

impl Default for VecOStream<Vec<u8>> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'v> VecOStream<&'v mut Vec<u8>> {
	/// Create new [`VecOStream`] appending to caller's `Vec`.
	#[inline]
	pub fn from_vec(vec: &'v mut Vec<u8>) -> Self {
		Self { vec }
	}
}

impl<BorrowedVec> VecOStream<BorrowedVec>
where BorrowedVec: BorrowMut<Vec<u8>>
{
	/// Consume stream and return the `Vec` (or the borrow of it).
	#[inline]
	pub fn into_inner(self) -> BorrowedVec {
		self.vec
	}

	#[inline]
	fn as_vec(&self) -> &Vec<u8> {
		self.vec.borrow()
	}
}

impl<BorrowedVec> OutputStream for VecOStream<BorrowedVec>
where BorrowedVec: BorrowMut<Vec<u8>>
{
	#[inline]
	fn write(&mut self, bytes: &[u8]) -> usize {
		self.vec.borrow_mut().extend_from_slice(bytes);
		bytes.len()
	}

	#[inline]
	fn put(&mut self, byte: u8) {
		self.vec.borrow_mut().push(byte);
	}

	#[inline]
	fn len(&self) -> usize {
		self.as_vec().len()
	}
}

impl<BorrowedVec> BufferedOutput for VecOStream<BorrowedVec>
where BorrowedVec: BorrowMut<Vec<u8>>
{
	const STORAGE: Storage = Storage::Vec;

	/// Copies content, since the `Vec` stays writable.
	fn get_shared_buffer(&self) -> SharedBuffer {
		SharedBuffer::from(self.as_vec().as_slice())
	}

	fn get_intrusive_buffer(&self) -> IntrusiveBuffer<'_> {
		IntrusiveBuffer::new(self.as_vec())
	}
}
