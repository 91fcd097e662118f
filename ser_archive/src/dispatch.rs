use crate::{
	archive::{
		BinaryIArchive, BinaryOArchive, IArchive, JsonIArchive, JsonOArchive, OArchive, TextIArchive,
		TextOArchive,
	},
	flags::StorageCheck,
	streams::{BufferedOutput, CountOStream, InputStream, MemIStream, MemOStream, OutputStream, VecOStream},
	Config, Error, Format, LoadArgs, Result, SaveArgs, SharedBuffer, Storage,
};

/// Save values into a new buffer.
///
/// `F` selects format and storage kind (see [`flags`](crate::flags)).
/// `args` is `&value` or a tuple `(&a, &b, ...)`.
///
/// ```
/// use ser_archive::{flags::{JSON, MEM}, save};
///
/// let buf = save::<{ JSON | MEM }>((&1u8, &"two")).unwrap();
/// assert_eq!(&*buf, br#"["SARJ01",1,"two"]"#);
/// ```
pub fn save<const F: u32>(args: impl SaveArgs) -> Result<SharedBuffer> {
	let _ = Config::<F>::ASSERT_FORMAT_VALID;
	let _ = Config::<F>::ASSERT_STORAGE_VALID;

	match Config::<F>::STORAGE {
		Storage::Mem => {
			let mut stream = MemOStream::new();
			encode::<_, F>(&mut stream, args)?;
			Ok(stream.into_shared_buffer())
		}
		Storage::Vec => {
			let mut stream = VecOStream::new();
			encode::<_, F>(&mut stream, args)?;
			Ok(SharedBuffer::from(stream.into_inner()))
		}
	}
}

/// Save values to an existing output stream, appending to anything already
/// written to it.
///
/// Stream's storage kind must be the one `F` selects, checked at compile time.
///
/// ```
/// use ser_archive::{flags::{BINARY, NO_HEADER, VEC}, save_to, streams::VecOStream};
///
/// let mut out = vec![];
/// save_to::<{ BINARY | NO_HEADER | VEC }>(&mut VecOStream::from_vec(&mut out), &7u16).unwrap();
/// assert_eq!(out, vec![7, 0]);
/// ```
pub fn save_to<const F: u32>(stream: &mut impl BufferedOutput, args: impl SaveArgs) -> Result<()> {
	let _ = Config::<F>::ASSERT_FORMAT_VALID;
	let _ = Config::<F>::ASSERT_STORAGE_VALID;
	assert_storage::<F, _>(stream);

	encode::<_, F>(stream, args)
}

/// Get number of bytes [`save`] would produce for `args`, without storing
/// them.
///
/// Storage flags are ignored, but may name at most one storage kind.
pub fn saved_size<const F: u32>(args: impl SaveArgs) -> Result<usize> {
	let _ = Config::<F>::ASSERT_FORMAT_VALID;
	let _ = Config::<F>::ASSERT_STORAGE_AT_MOST_ONE;

	let mut stream = CountOStream::new();
	encode::<_, F>(&mut stream, args)?;
	Ok(stream.total_size())
}

/// Load values from bytes produced by [`save`] with the same flags.
///
/// `args` is `&mut value` or a tuple `(&mut a, &mut b, ...)`, matching what
/// was saved. All of `source` must be consumed.
pub fn load<const F: u32>(source: &(impl AsRef<[u8]> + ?Sized), args: impl LoadArgs) -> Result<()> {
	let _ = Config::<F>::ASSERT_FORMAT_VALID;
	let _ = Config::<F>::ASSERT_STORAGE_VALID;

	let mut stream = MemIStream::new(source.as_ref());
	decode::<_, F>(&mut stream, args)?;
	if !stream.empty() {
		return Err(Error::malformed(stream.pos(), "trailing data after archive"));
	}
	Ok(())
}

/// Load values from an input stream. Stream is left positioned after the
/// archive, so further archives can follow.
pub fn load_from<const F: u32>(stream: &mut impl InputStream, args: impl LoadArgs) -> Result<()> {
	let _ = Config::<F>::ASSERT_FORMAT_VALID;
	let _ = Config::<F>::ASSERT_STORAGE_VALID;

	decode::<_, F>(stream, args)
}

/// Run the archive for `F`'s format over `stream`.
fn encode<W: OutputStream, const F: u32>(stream: &mut W, args: impl SaveArgs) -> Result<()> {
	match Config::<F>::FORMAT {
		Format::Binary => write_archive(BinaryOArchive::<_, F>::new(stream)?, args),
		Format::Text => write_archive(TextOArchive::<_, F>::new(stream)?, args),
		Format::Json => write_archive(JsonOArchive::<_, F>::new(stream)?, args),
	}
}

fn decode<R: InputStream, const F: u32>(stream: &mut R, args: impl LoadArgs) -> Result<()> {
	match Config::<F>::FORMAT {
		Format::Binary => read_archive(BinaryIArchive::<_, F>::new(stream)?, args),
		Format::Text => read_archive(TextIArchive::<_, F>::new(stream)?, args),
		Format::Json => read_archive(JsonIArchive::<_, F>::new(stream)?, args),
	}
}

#[inline]
fn write_archive<A: OArchive>(mut ar: A, args: impl SaveArgs) -> Result<()> {
	args.save_all(&mut ar)?;
	ar.finish()
}

#[inline]
fn read_archive<A: IArchive>(mut ar: A, args: impl LoadArgs) -> Result<()> {
	args.load_all(&mut ar)?;
	ar.finish()
}

/// Ensure (at compile time) that `W`'s storage kind is the one `F` selects.
#[inline(always)]
fn assert_storage<const F: u32, W: BufferedOutput>(_stream: &W) {
	let _ = StorageCheck::<W, F>::ASSERT_STORAGE_MATCHES;
}
