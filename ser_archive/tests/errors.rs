use ser_archive::{
	archive::MAX_ZERO_WIDTH_LEN,
	flags::{BINARY, COMPACT, EBIG, JSON, MEM, NO_HEADER, TEXT, VEC},
	header::{self, Header},
	load, save, Error, Format,
};

fn save_triple() -> Vec<u8> {
	save::<{ BINARY | MEM }>((&7u32, &true, &vec![1u16, 2, 3])).unwrap().to_vec()
}

#[test]
fn triple_round_trip() {
	let buf = save_triple();
	assert_eq!(buf.len(), header::BINARY_LEN + 4 + 1 + 8 + 3 * 2);
	assert_eq!(buf.len(), 24);

	let (mut a, mut b, mut c) = (0u32, false, Vec::<u16>::new());
	load::<{ BINARY | MEM }>(&buf, (&mut a, &mut b, &mut c)).unwrap();
	assert_eq!((a, b, c), (7, true, vec![1, 2, 3]));
}

#[test]
fn triple_corrupt_last_byte() {
	let mut buf = save_triple();
	*buf.last_mut().unwrap() ^= 0xff;

	let (mut a, mut b, mut c) = (0u32, false, Vec::<u16>::new());
	load::<{ BINARY | MEM }>(&buf, (&mut a, &mut b, &mut c)).unwrap();
	assert_eq!((a, b), (7, true));
	assert_ne!(c, vec![1, 2, 3]);
}

#[test]
fn truncated_input_at_every_length() {
	let buf = save_triple();
	for len in 0..buf.len() {
		let (mut a, mut b, mut c) = (0u32, false, Vec::<u16>::new());
		let err = load::<{ BINARY | MEM }>(&buf[..len], (&mut a, &mut b, &mut c)).unwrap_err();
		assert!(err.is_truncated(), "len {}: {:?}", len, err);
	}
}

#[test]
fn truncated_text_and_json() {
	let text = save::<{ TEXT | VEC }>((&12345u32, &"abcdef")).unwrap();
	let json = save::<{ JSON | VEC }>((&12345u32, &"abcdef")).unwrap();

	let (mut num, mut s) = (0u32, String::new());
	let err = load::<{ TEXT | VEC }>(&text[..text.len() - 2], (&mut num, &mut s)).unwrap_err();
	assert!(err.is_truncated(), "{:?}", err);

	let err = load::<{ JSON | VEC }>(&json[..json.len() - 1], (&mut num, &mut s)).unwrap_err();
	assert!(err.is_truncated(), "{:?}", err);
}

#[test]
fn huge_length_prefix_is_truncation() {
	let mut buf = save::<{ BINARY | NO_HEADER | MEM }>(&vec![1u8, 2]).unwrap().to_vec();
	buf[..8].copy_from_slice(&u64::MAX.to_le_bytes());
	let mut value = Vec::<u8>::new();
	assert!(load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut value).unwrap_err().is_truncated());

	let mut value = String::new();
	assert!(load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut value).unwrap_err().is_truncated());
}

#[test]
fn huge_zero_width_sequence() {
	let buf = (1u64 << 40).to_le_bytes();
	let mut value = Vec::<()>::new();
	assert!(matches!(
		load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut value),
		Err(Error::Malformed { pos: 8, .. })
	));

	let buf = ((MAX_ZERO_WIDTH_LEN + 1) as u64).to_le_bytes();
	assert!(load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut value).is_err());

	// Up to the limit still loads
	let buf = save::<{ BINARY | NO_HEADER | MEM }>(&vec![(); 1000]).unwrap();
	load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut value).unwrap();
	assert_eq!(value.len(), 1000);
}

#[test]
fn header_format_mismatch() {
	let buf = save::<{ TEXT | MEM }>(&1u8).unwrap();
	let mut value = 0u8;
	assert!(matches!(
		load::<{ BINARY | MEM }>(&buf, &mut value),
		Err(Error::FormatMismatch {
			found: Format::Text,
			expected: Format::Binary,
		})
	));

	assert!(matches!(
		load::<{ TEXT | MEM }>(b"SARJ01 1", &mut value),
		Err(Error::FormatMismatch {
			found: Format::Json,
			expected: Format::Text,
		})
	));

	let buf = save::<{ BINARY | MEM }>(&1u8).unwrap();
	let err = load::<{ TEXT | MEM }>(&buf, &mut value).unwrap_err();
	assert!(err.is_header_mismatch(), "{:?}", err);
}

#[test]
fn header_version_mismatch() {
	let mut buf = save::<{ BINARY | MEM }>(&1u8).unwrap().to_vec();
	buf[4] = (buf[4] & 0xf0) | (header::VERSION + 1);
	let mut value = 0u8;
	assert!(matches!(
		load::<{ BINARY | MEM }>(&buf, &mut value),
		Err(Error::UnsupportedVersion { found: 2, supported: 1 })
	));

	let mut buf = save::<{ JSON | MEM }>(&1u8).unwrap().to_vec();
	buf[7] = b'9';
	assert!(matches!(
		load::<{ JSON | MEM }>(&buf, &mut value),
		Err(Error::UnsupportedVersion { found: 9, .. })
	));
}

#[test]
fn header_options_mismatch() {
	let buf = save::<{ BINARY | EBIG | MEM }>(&1u32).unwrap();
	let mut value = 0u32;
	assert!(matches!(
		load::<{ BINARY | MEM }>(&buf, &mut value),
		Err(Error::OptionsMismatch { .. })
	));

	let buf = save::<{ BINARY | MEM }>(&1u32).unwrap();
	assert!(matches!(
		load::<{ BINARY | COMPACT | MEM }>(&buf, &mut value),
		Err(Error::OptionsMismatch { .. })
	));
}

#[test]
fn header_missing() {
	let mut value = 0u8;
	assert!(matches!(
		load::<{ BINARY | MEM }>(b"XYZB\x01\x05", &mut value),
		Err(Error::MissingHeader)
	));
	assert!(matches!(load::<{ TEXT | MEM }>(b"5", &mut value), Err(Error::MissingHeader)));

	// Headerless archive loaded with header expected
	let buf = save::<{ JSON | NO_HEADER | MEM }>(&5u8).unwrap();
	assert!(load::<{ JSON | MEM }>(&buf, &mut value).unwrap_err().is_header_mismatch());
}

#[test]
fn header_tokens() {
	let header = Header::for_flags::<{ TEXT | MEM }>();
	assert_eq!(&header.to_token(), b"SART01");
	assert_eq!(Header::from_token(b"SART01").unwrap(), header);

	let header = Header::for_flags::<{ BINARY | EBIG | COMPACT | VEC }>();
	assert_eq!(header.to_bytes(), *b"SARB\x31");
	assert_eq!(Header::from_bytes(&header.to_bytes()).unwrap(), header);
}

#[test]
fn invalid_values() {
	let mut flag = false;
	assert!(matches!(
		load::<{ BINARY | NO_HEADER | MEM }>(&[2u8], &mut flag),
		Err(Error::InvalidValue { pos: 0, .. })
	));

	let mut c = ' ';
	assert!(matches!(
		load::<{ BINARY | NO_HEADER | MEM }>(&0xd800u32.to_le_bytes(), &mut c),
		Err(Error::InvalidValue { .. })
	));

	let mut s = String::new();
	let mut buf = 2u64.to_le_bytes().to_vec();
	buf.extend_from_slice(&[0xc3, 0x28]);
	assert!(matches!(
		load::<{ BINARY | NO_HEADER | MEM }>(&buf, &mut s),
		Err(Error::InvalidValue { .. })
	));

	let mut n = std::num::NonZeroU16::MIN;
	assert!(matches!(
		load::<{ BINARY | NO_HEADER | MEM }>(&[0u8, 0], &mut n),
		Err(Error::InvalidValue { .. })
	));
}

#[test]
fn array_length_mismatch() {
	let buf = save::<{ JSON | MEM }>(&vec![1u8, 2, 3]).unwrap();
	let mut array = [0u8; 2];
	assert!(matches!(
		load::<{ JSON | MEM }>(&buf, &mut array),
		Err(Error::LengthMismatch {
			expected: 2,
			found: 3,
		})
	));

	let buf = save::<{ BINARY | MEM }>(&[1u8]).unwrap();
	assert!(matches!(
		load::<{ BINARY | MEM }>(&buf, &mut array),
		Err(Error::LengthMismatch {
			expected: 2,
			found: 1,
		})
	));
}

#[test]
fn malformed_json() {
	let (mut num, mut s) = (0u8, String::new());
	for input in [
		&br#"["SARJ01" 1,"a"]"#[..],
		br#"["SARJ01",1,"a",]"#,
		br#"["SARJ01",01,"a"]"#,
		br#"["SARJ01",1,'a']"#,
		br#"["SARJ01",1,"a\q"]"#,
	] {
		let err = load::<{ JSON | MEM }>(input, (&mut num, &mut s)).unwrap_err();
		assert!(matches!(err, Error::Malformed { .. }), "{:?}", err);
	}
}

#[test]
fn json_unknown_variant() {
	#[derive(ser_archive::Serialize, ser_archive::Deserialize, Default, Debug, PartialEq)]
	enum Foo {
		#[default]
		A,
		B(u8),
	}

	let mut value = Foo::A;
	load::<{ JSON | MEM }>(br#"["SARJ01",[1,9]]"#, &mut value).unwrap();
	assert_eq!(value, Foo::B(9));

	assert!(matches!(
		load::<{ JSON | MEM }>(br#"["SARJ01",[2]]"#, &mut value),
		Err(Error::UnknownVariant { index: 2 })
	));
}
