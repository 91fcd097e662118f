use crate::{Bytes, Deserialize, IArchive, OArchive, Result, Serialize, SharedBuffer};

impl Serialize for str {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.write_str(self)
	}
}

impl Serialize for String {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.write_str(self)
	}
}

impl Deserialize for String {
	#[inline]
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		*self = ar.read_str()?;
		Ok(())
	}
}

impl Serialize for Bytes {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.write_bytes(&self.0)
	}
}

impl Deserialize for Bytes {
	#[inline]
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		self.0 = ar.read_bytes()?;
		Ok(())
	}
}

impl Serialize for SharedBuffer {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.write_bytes(self)
	}
}

// Loads into a fresh region. Other holders of the old region are unaffected.
impl Deserialize for SharedBuffer {
	#[inline]
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		*self = SharedBuffer::from(ar.read_bytes()?);
		Ok(())
	}
}
