use std::{cmp, sync::Arc};

use super::{BufferedOutput, InputStream, OutputStream};
use crate::{
	buffer::{alloc_region, IntrusiveBuffer, SharedBuffer},
	Error, Result, Storage,
};

/// Bytes reserved by [`MemOStream::new`].
pub const DEFAULT_RESERVED: usize = 20 * 1024;

/// Default growth factor for [`MemOStream`]: `(1 + sqrt(5)) / 1.5`.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.157_378_651_666_526_7;

enum Region<'a> {
	/// Owned region. May be shared with [`SharedBuffer`]s handed out earlier.
	Owned(Arc<[u8]>),
	/// Caller-supplied memory. Cannot grow.
	Fixed(&'a mut [u8]),
}

/// Growable output stream over an owned memory region.
///
/// When a write does not fit, region is reallocated to
/// `size + written * growth_factor` bytes and existing content copied across.
///
/// Buffers obtained from [`get_shared_buffer`] share the stream's region.
/// The stream never writes to a region while it's shared; the next write
/// after sharing moves content to a fresh region first.
///
/// # Example
///
/// ```
/// use ser_archive::streams::{BufferedOutput, MemOStream, OutputStream};
///
/// let mut stream = MemOStream::new();
/// stream.write(b"abc");
/// let snapshot = stream.get_shared_buffer();
/// stream.write(b"def");
///
/// assert_eq!(&*snapshot, b"abc");
/// assert_eq!(&*stream.get_intrusive_buffer(), b"abcdef");
/// ```
///
/// [`get_shared_buffer`]: BufferedOutput::get_shared_buffer
pub struct MemOStream<'a> {
	region: Region<'a>,
	len: usize,
	growth_factor: f64,
}

impl<'a> MemOStream<'a> {
	/// Create new [`MemOStream`] with [`DEFAULT_RESERVED`] bytes reserved.
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_RESERVED)
	}

	/// Create new [`MemOStream`] with `capacity` bytes reserved.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			region: Region::Owned(alloc_region(&[], capacity)),
			len: 0,
			growth_factor: DEFAULT_GROWTH_FACTOR,
		}
	}

	/// Set growth factor used for reallocations.
	///
	/// # Panics
	///
	/// Panics if `growth_factor` is not greater than 1.
	pub fn with_growth_factor(mut self, growth_factor: f64) -> Self {
		assert!(growth_factor > 1.0, "growth factor must be greater than 1");
		self.growth_factor = growth_factor;
		self
	}

	/// Create new [`MemOStream`] which writes into `buffer`'s region,
	/// overwriting its content.
	///
	/// The region is only written in place if `buffer` was its last holder.
	/// Otherwise the first write moves to a fresh region.
	pub fn from_shared(buffer: SharedBuffer) -> Self {
		Self {
			region: Region::Owned(buffer.into_region()),
			len: 0,
			growth_factor: DEFAULT_GROWTH_FACTOR,
		}
	}

	/// Create new [`MemOStream`] writing into caller-supplied fixed memory.
	///
	/// Stream cannot grow. Writing more than `slice.len()` bytes panics.
	pub fn from_slice(slice: &'a mut [u8]) -> Self {
		Self {
			region: Region::Fixed(slice),
			len: 0,
			growth_factor: DEFAULT_GROWTH_FACTOR,
		}
	}

	/// Current capacity.
	pub fn capacity(&self) -> usize {
		match &self.region {
			Region::Owned(data) => data.len(),
			Region::Fixed(slice) => slice.len(),
		}
	}

	/// Returns `true` if stream writes into caller-supplied fixed memory.
	pub fn is_fixed(&self) -> bool {
		matches!(self.region, Region::Fixed(_))
	}

	/// Discard written bytes. Capacity is retained.
	pub fn clear(&mut self) {
		self.len = 0;
	}

	/// Consume stream and return written bytes as a [`SharedBuffer`],
	/// without copying (unless stream is over fixed memory).
	pub fn into_shared_buffer(self) -> SharedBuffer {
		match self.region {
			Region::Owned(data) => SharedBuffer::from_region(data, self.len),
			Region::Fixed(slice) => SharedBuffer::from(&slice[..self.len]),
		}
	}

	/// Get writable region with space for at least `additional` more bytes.
	fn reserve(&mut self, additional: usize) -> &mut [u8] {
		let needed = self.len + additional;
		match &mut self.region {
			Region::Fixed(slice) => {
				assert!(
					needed <= slice.len(),
					"fixed-size output overflow: {} bytes needed, capacity is {}",
					needed,
					slice.len()
				);
				&mut **slice
			}
			Region::Owned(data) => {
				let shared = Arc::strong_count(data) > 1;
				if needed > data.len() || shared {
					let capacity = if needed > data.len() {
						additional + (self.len as f64 * self.growth_factor) as usize
					} else {
						data.len()
					};
					let capacity = cmp::max(capacity, needed);
					log::trace!(
						"MemOStream: reallocating {} -> {} bytes (shared: {})",
						data.len(),
						capacity,
						shared
					);
					*data = alloc_region(&data[..self.len], capacity);
				}
				match Arc::get_mut(data) {
					Some(data) => data,
					None => unreachable!("freshly allocated region is unique"),
				}
			}
		}
	}
}

impl Default for MemOStream<'_> {
	fn default() -> Self {
		Self::new()
	}
}

impl OutputStream for MemOStream<'_> {
	fn write(&mut self, bytes: &[u8]) -> usize {
		if bytes.is_empty() {
			return 0;
		}
		let pos = self.len;
		let region = self.reserve(bytes.len());
		region[pos..pos + bytes.len()].copy_from_slice(bytes);
		self.len = pos + bytes.len();
		bytes.len()
	}

	#[inline]
	fn put(&mut self, byte: u8) {
		let pos = self.len;
		self.reserve(1)[pos] = byte;
		self.len = pos + 1;
	}

	#[inline]
	fn len(&self) -> usize {
		self.len
	}
}

impl BufferedOutput for MemOStream<'_> {
	const STORAGE: Storage = Storage::Mem;

	fn get_shared_buffer(&self) -> SharedBuffer {
		match &self.region {
			Region::Owned(data) => SharedBuffer::from_region(data.clone(), self.len),
			Region::Fixed(slice) => SharedBuffer::from(&slice[..self.len]),
		}
	}

	fn get_intrusive_buffer(&self) -> IntrusiveBuffer<'_> {
		let bytes = match &self.region {
			Region::Owned(data) => &data[..self.len],
			Region::Fixed(slice) => &slice[..self.len],
		};
		IntrusiveBuffer::new(bytes)
	}
}

/// Input stream over borrowed bytes.
///
/// ```
/// use ser_archive::streams::{InputStream, MemIStream};
///
/// let mut stream = MemIStream::new(b"xy");
/// assert_eq!(stream.get(), Some(b'x'));
/// stream.unget().unwrap();
/// assert!(stream.unget().is_err());
///
/// let mut out = [0; 4];
/// assert_eq!(stream.read(&mut out), 2);
/// assert!(stream.empty());
/// ```
#[derive(Clone, Debug)]
pub struct MemIStream<'de> {
	data: &'de [u8],
	pos: usize,
	can_unget: bool,
}

impl<'de> MemIStream<'de> {
	pub fn new(data: &'de [u8]) -> Self {
		Self {
			data,
			pos: 0,
			can_unget: false,
		}
	}

	/// Get an owning copy of the unread bytes.
	pub fn get_shared_buffer(&self) -> SharedBuffer {
		SharedBuffer::from(&self.data[self.pos..])
	}

	/// Get a view of the unread bytes.
	pub fn get_intrusive_buffer(&self) -> IntrusiveBuffer<'de> {
		IntrusiveBuffer::new(&self.data[self.pos..])
	}
}

impl InputStream for MemIStream<'_> {
	fn read(&mut self, out: &mut [u8]) -> usize {
		let count = cmp::min(out.len(), self.remaining());
		out[..count].copy_from_slice(&self.data[self.pos..self.pos + count]);
		self.pos += count;
		self.can_unget = false;
		count
	}

	#[inline]
	fn peek(&self) -> Option<u8> {
		self.data.get(self.pos).copied()
	}

	#[inline]
	fn get(&mut self) -> Option<u8> {
		let byte = self.peek();
		if byte.is_some() {
			self.pos += 1;
		}
		self.can_unget = byte.is_some();
		byte
	}

	fn unget(&mut self) -> Result<()> {
		if !self.can_unget {
			return Err(Error::InvalidUnget);
		}
		self.pos -= 1;
		self.can_unget = false;
		Ok(())
	}

	#[inline]
	fn pos(&self) -> usize {
		self.pos
	}

	#[inline]
	fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}
}

impl<'de> From<&'de [u8]> for MemIStream<'de> {
	fn from(data: &'de [u8]) -> Self {
		Self::new(data)
	}
}

impl<'de, const N: usize> From<&'de [u8; N]> for MemIStream<'de> {
	fn from(data: &'de [u8; N]) -> Self {
		Self::new(data)
	}
}

impl<'de> From<&'de Vec<u8>> for MemIStream<'de> {
	fn from(data: &'de Vec<u8>) -> Self {
		Self::new(data)
	}
}

impl<'de> From<&'de SharedBuffer> for MemIStream<'de> {
	fn from(buffer: &'de SharedBuffer) -> Self {
		Self::new(buffer.as_slice())
	}
}

impl<'de> From<IntrusiveBuffer<'de>> for MemIStream<'de> {
	fn from(buffer: IntrusiveBuffer<'de>) -> Self {
		Self::new(buffer.as_slice())
	}
}
