//! Buffer types.
//!
//! [`SharedBuffer`] owns its bytes through a reference count, so it can be
//! cloned cheaply and outlive the stream which produced it.
//! [`IntrusiveBuffer`] is a borrowed view, valid only as long as its owner.

use std::{fmt, iter, ops::Deref, sync::Arc};

/// Reference-counted, immutable-once-shared byte buffer.
///
/// Cloning a [`SharedBuffer`] shares the underlying region. Mutable access
/// via [`get_mut`](SharedBuffer::get_mut) is only granted while this handle
/// is the sole holder, so bytes other holders can see never change.
#[derive(Clone)]
pub struct SharedBuffer {
	data: Arc<[u8]>,
	len: usize,
}

impl SharedBuffer {
	/// Create an empty [`SharedBuffer`].
	pub fn empty() -> Self {
		Self::from_region(Arc::from(&[][..]), 0)
	}

	/// Create a zeroed [`SharedBuffer`] of `size` bytes.
	pub fn new(size: usize) -> Self {
		Self::from_region(alloc_region(&[], size), size)
	}

	/// Wrap first `len` bytes of a region.
	///
	/// `len` must not exceed `data.len()`.
	#[inline]
	pub(crate) fn from_region(data: Arc<[u8]>, len: usize) -> Self {
		debug_assert!(len <= data.len());
		Self { data, len }
	}

	/// Consume buffer and return the whole underlying region, including any
	/// bytes past `len()`.
	#[inline]
	pub(crate) fn into_region(self) -> Arc<[u8]> {
		self.data
	}

	/// Returns number of bytes in buffer.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if buffer contains no bytes.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the buffer's bytes.
	#[inline]
	pub fn as_slice(&self) -> &[u8] {
		&self.data[..self.len]
	}

	/// Get mutable access to the bytes, if no other [`SharedBuffer`] or stream
	/// shares them.
	pub fn get_mut(&mut self) -> Option<&mut [u8]> {
		let len = self.len;
		Arc::get_mut(&mut self.data).map(|data| &mut data[..len])
	}

	/// Returns `true` if `self` and `other` share the same region.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.data, &other.data)
	}

	/// Get a borrowed view of the buffer.
	#[inline]
	pub fn as_intrusive(&self) -> IntrusiveBuffer<'_> {
		IntrusiveBuffer::new(self.as_slice())
	}
}

impl Default for SharedBuffer {
	fn default() -> Self {
		Self::empty()
	}
}

impl Deref for SharedBuffer {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &[u8] {
		self.as_slice()
	}
}

impl AsRef<[u8]> for SharedBuffer {
	#[inline]
	fn as_ref(&self) -> &[u8] {
		self.as_slice()
	}
}

impl From<Vec<u8>> for SharedBuffer {
	fn from(vec: Vec<u8>) -> Self {
		let len = vec.len();
		Self::from_region(Arc::from(vec), len)
	}
}

impl From<&[u8]> for SharedBuffer {
	fn from(bytes: &[u8]) -> Self {
		Self::from_region(Arc::from(bytes), bytes.len())
	}
}

impl PartialEq for SharedBuffer {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl Eq for SharedBuffer {}

impl fmt::Debug for SharedBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedBuffer")
			.field("len", &self.len)
			.field("data", &self.as_slice())
			.finish()
	}
}

/// Non-owning view over bytes owned elsewhere.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct IntrusiveBuffer<'a> {
	data: &'a [u8],
}

impl<'a> IntrusiveBuffer<'a> {
	#[inline]
	pub fn new(data: &'a [u8]) -> Self {
		Self { data }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Returns the viewed bytes, with the owner's lifetime.
	#[inline]
	pub fn as_slice(&self) -> &'a [u8] {
		self.data
	}

	/// Copy viewed bytes into an owned [`SharedBuffer`].
	pub fn to_shared(&self) -> SharedBuffer {
		SharedBuffer::from(self.data)
	}
}

impl Deref for IntrusiveBuffer<'_> {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &[u8] {
		self.data
	}
}

impl AsRef<[u8]> for IntrusiveBuffer<'_> {
	#[inline]
	fn as_ref(&self) -> &[u8] {
		self.data
	}
}

/// Allocate a region of `capacity` bytes, starting with a copy of `prefix`.
/// Remainder is zeroed.
pub(crate) fn alloc_region(prefix: &[u8], capacity: usize) -> Arc<[u8]> {
	debug_assert!(prefix.len() <= capacity);
	prefix
		.iter()
		.copied()
		.chain(iter::repeat(0).take(capacity - prefix.len()))
		.collect()
}
