use super::OutputStream;

/// Output stream which stores nothing, only counting bytes written to it.
///
/// Used by [`saved_size`](crate::saved_size).
#[derive(Clone, Copy, Default, Debug)]
pub struct CountOStream {
	total: usize,
}

impl CountOStream {
	#[inline]
	pub fn new() -> Self {
		Self { total: 0 }
	}

	/// Total bytes written.
	#[inline]
	pub fn total_size(&self) -> usize {
		self.total
	}
}

impl OutputStream for CountOStream {
	#[inline]
	fn write(&mut self, bytes: &[u8]) -> usize {
		self.total += bytes.len();
		bytes.len()
	}

	#[inline]
	fn put(&mut self, _byte: u8) {
		self.total += 1;
	}

	#[inline]
	fn len(&self) -> usize {
		self.total
	}
}
