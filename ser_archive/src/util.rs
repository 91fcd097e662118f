/// Maximum number of bytes a LEB128-encoded `u128` can occupy.
pub const MAX_VARINT_LEN: usize = 19;

/// Bit mask covering the low `width` bytes of a `u128`.
///
/// `width` must be between 1 and 16.
pub const fn width_mask(width: usize) -> u128 {
	debug_assert!(width > 0 && width <= 16);
	if width == 16 {
		u128::MAX
	} else {
		(1 << (width * 8)) - 1
	}
}

/// Interpret the low `width` bytes of `bits` as a two's complement integer.
pub const fn sign_extend(bits: u128, width: usize) -> i128 {
	let shift = 128 - width as u32 * 8;
	((bits << shift) as i128) >> shift
}

/// Map signed integers onto unsigned ones so small magnitudes stay small.
/// `0 => 0, -1 => 1, 1 => 2, -2 => 3...`
pub const fn zigzag(value: i128) -> u128 {
	((value << 1) ^ (value >> 127)) as u128
}

/// Inverse of [`zigzag`].
pub const fn unzigzag(value: u128) -> i128 {
	((value >> 1) as i128) ^ -((value & 1) as i128)
}

/// Encode `value` as LEB128 into `out`. Returns number of bytes used.
pub fn encode_varint(mut value: u128, out: &mut [u8; MAX_VARINT_LEN]) -> usize {
	let mut len = 0;
	loop {
		let byte = (value & 0x7f) as u8;
		value >>= 7;
		if value == 0 {
			out[len] = byte;
			return len + 1;
		}
		out[len] = byte | 0x80;
		len += 1;
	}
}
