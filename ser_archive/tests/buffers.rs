use ser_archive::{
	flags::{BINARY, MEM, VEC},
	load_from, save_to,
	streams::{BufferedOutput, InputStream, MemIStream, MemOStream, OutputStream, VecOStream},
	SharedBuffer,
};

#[test]
fn view_and_owned_buffer_agree() {
	let mut stream = MemOStream::new();
	stream.write(b"hello world");

	let view = stream.get_intrusive_buffer().to_vec();
	let owned = stream.get_shared_buffer();
	assert_eq!(&view[..], &*owned);
	assert_eq!(&*owned, b"hello world");
}

#[test]
fn owned_buffer_survives_further_writes() {
	let mut stream = MemOStream::with_capacity(64);
	stream.write(b"first");
	let owned = stream.get_shared_buffer();

	// Fits in existing capacity, but region is shared so must not be written in place
	stream.write(b" second");
	stream.clear();
	stream.write(b"XXXXXXXXXXXX");

	assert_eq!(&*owned, b"first");
	assert_eq!(&*stream.get_intrusive_buffer(), b"XXXXXXXXXXXX");
}

#[test]
fn owned_buffer_survives_stream_drop() {
	let owned = {
		let mut stream = MemOStream::new();
		stream.write(&[7; 100]);
		stream.get_shared_buffer()
	};
	assert_eq!(owned.len(), 100);
	assert!(owned.iter().all(|&byte| byte == 7));
}

#[test]
fn detached_buffers_are_independent() {
	let mut stream = MemOStream::new();
	stream.write(b"ab");
	let first = stream.get_shared_buffer();
	stream.write(b"cd");
	let second = stream.get_shared_buffer();
	let last = stream.into_shared_buffer();

	assert_eq!(&*first, b"ab");
	assert_eq!(&*second, b"abcd");
	assert_eq!(&*last, b"abcd");
	assert!(!first.ptr_eq(&second));
	assert!(second.ptr_eq(&last));
}

#[test]
fn shared_buffer_clones_share_bytes() {
	let buffer = SharedBuffer::from(vec![1, 2, 3]);
	let clone = buffer.clone();
	assert!(buffer.ptr_eq(&clone));
	assert_eq!(buffer, clone);

	let mut unique = SharedBuffer::from(&[4u8, 5][..]);
	unique.get_mut().unwrap()[0] = 9;
	assert_eq!(&*unique, &[9, 5]);

	let mut shared = unique.clone();
	assert!(shared.get_mut().is_none());
	drop(unique);
	assert!(shared.get_mut().is_some());
}

#[test]
fn reuse_region_of_detached_buffer() {
	let buffer = SharedBuffer::from(vec![0; 32]);
	let mut stream = MemOStream::from_shared(buffer);
	stream.write(b"recycled");
	assert_eq!(&*stream.into_shared_buffer(), b"recycled");
}

#[test]
fn fixed_memory_stream() {
	let mut memory = [0u8; 8];
	let mut stream = MemOStream::from_slice(&mut memory);
	assert!(stream.is_fixed());
	stream.write(b"abc");
	let owned = stream.get_shared_buffer();
	stream.write(b"de");
	assert_eq!(&*owned, b"abc");
	drop(stream);
	assert_eq!(&memory[..5], b"abcde");
}

#[test]
#[should_panic(expected = "fixed-size output overflow")]
fn fixed_memory_stream_overflow() {
	let mut memory = [0u8; 4];
	let mut stream = MemOStream::from_slice(&mut memory);
	stream.write(b"abcde");
}

#[test]
fn vec_stream_appends_to_caller_vec() {
	let mut out = b"prefix".to_vec();
	save_to::<{ BINARY | VEC }>(&mut VecOStream::from_vec(&mut out), &0x01020304u32).unwrap();
	assert_eq!(&out[..6], b"prefix");
	assert_eq!(&out[6..], b"SARB\x01\x04\x03\x02\x01");

	let mut stream = VecOStream::from_vec(&mut out);
	assert_eq!(&*stream.get_shared_buffer(), &stream.get_intrusive_buffer()[..]);
	stream.put(0);
	assert_eq!(out.len(), 16);
}

#[test]
fn input_stream_views() {
	let mut stream = MemOStream::new();
	save_to::<{ BINARY | MEM }>(&mut stream, (&1u8, &2u8)).unwrap();
	let buffer = stream.into_shared_buffer();

	let mut input = MemIStream::from(&buffer);
	let mut first = 0u8;
	// One archive holding two values: reading just one leaves the second behind
	load_from::<{ BINARY | MEM }>(&mut input, &mut first).unwrap();
	assert_eq!(first, 1);
	assert_eq!(input.remaining(), 1);
	assert_eq!(&*input.get_intrusive_buffer(), &[2]);
	assert_eq!(&*input.get_shared_buffer(), &[2]);
}
