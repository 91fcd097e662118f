use num_bigint::{BigInt, BigUint, Sign};

use crate::{Deserialize, Error, Format, IArchive, OArchive, Result, Serialize};

// Binary archives store magnitude as little-endian bytes.
// Text and JSON archives store decimal strings, so JSON output stays readable
// and has no precision limits.

impl Serialize for BigUint {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		match A::FORMAT {
			Format::Binary => ar.write_bytes(&self.to_bytes_le()),
			Format::Text | Format::Json => ar.write_str(&self.to_string()),
		}
	}
}

impl Deserialize for BigUint {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		*self = match A::FORMAT {
			Format::Binary => BigUint::from_bytes_le(&ar.read_bytes()?),
			Format::Text | Format::Json => parse_decimal(ar)?,
		};
		Ok(())
	}
}

impl Serialize for BigInt {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		match A::FORMAT {
			Format::Binary => {
				let sign: i8 = match self.sign() {
					Sign::Minus => -1,
					Sign::NoSign => 0,
					Sign::Plus => 1,
				};
				ar.begin_tuple()?;
				ar.write_primitive(sign)?;
				self.magnitude().serialize(ar)?;
				ar.end_tuple()
			}
			Format::Text | Format::Json => ar.write_str(&self.to_string()),
		}
	}
}

impl Deserialize for BigInt {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		*self = match A::FORMAT {
			Format::Binary => {
				ar.begin_tuple()?;
				let pos = ar.pos();
				let sign = match ar.read_primitive::<i8>()? {
					-1 => Sign::Minus,
					0 => Sign::NoSign,
					1 => Sign::Plus,
					_ => {
						return Err(Error::InvalidValue {
							pos,
							reason: "invalid BigInt sign",
						})
					}
				};
				let mut magnitude = BigUint::default();
				magnitude.deserialize(ar)?;
				ar.end_tuple()?;
				BigInt::from_biguint(sign, magnitude)
			}
			Format::Text | Format::Json => parse_decimal(ar)?,
		};
		Ok(())
	}
}

fn parse_decimal<T: std::str::FromStr, A: IArchive>(ar: &mut A) -> Result<T> {
	let pos = ar.pos();
	let digits = ar.read_str()?;
	digits.parse().map_err(|_| Error::InvalidValue {
		pos,
		reason: "invalid big integer",
	})
}
