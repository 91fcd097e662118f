use std::{
	collections::{BTreeMap, HashMap, VecDeque},
	hash::{BuildHasher, Hash},
};

use crate::{Deserialize, Error, IArchive, OArchive, Result, Serialize};

impl<T: Serialize + ?Sized> Serialize for &T {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		(**self).serialize(ar)
	}
}

impl<T: Serialize + ?Sized> Serialize for Box<T> {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		(**self).serialize(ar)
	}
}

impl<T: Deserialize + ?Sized> Deserialize for Box<T> {
	#[inline]
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		(**self).deserialize(ar)
	}
}

impl<T: Serialize> Serialize for [T] {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.begin_seq(self.len())?;
		for value in self {
			value.serialize(ar)?;
		}
		ar.end_seq()
	}
}

impl<T: Serialize> Serialize for Vec<T> {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		self.as_slice().serialize(ar)
	}
}

impl<T: Deserialize + Default> Deserialize for Vec<T> {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		self.clear();
		ar.read_seq(|ar, _| {
			let mut value = T::default();
			value.deserialize(ar)?;
			self.push(value);
			Ok(())
		})?;
		Ok(())
	}
}

impl<T: Serialize> Serialize for VecDeque<T> {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.begin_seq(self.len())?;
		for value in self {
			value.serialize(ar)?;
		}
		ar.end_seq()
	}
}

impl<T: Deserialize + Default> Deserialize for VecDeque<T> {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		self.clear();
		ar.read_seq(|ar, _| {
			let mut value = T::default();
			value.deserialize(ar)?;
			self.push_back(value);
			Ok(())
		})?;
		Ok(())
	}
}

impl<T: Serialize, const N: usize> Serialize for [T; N] {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		self.as_slice().serialize(ar)
	}
}

// Stored with its length, like a slice. Loading checks the length matches.
impl<T: Deserialize, const N: usize> Deserialize for [T; N] {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		match ar.begin_seq()? {
			Some(len) => {
				if len != N {
					return Err(Error::LengthMismatch {
						expected: N,
						found: len,
					});
				}
				for value in self.iter_mut() {
					value.deserialize(ar)?;
				}
			}
			None => {
				for (index, value) in self.iter_mut().enumerate() {
					if !ar.has_next()? {
						return Err(Error::LengthMismatch {
							expected: N,
							found: index,
						});
					}
					value.deserialize(ar)?;
				}
				if ar.has_next()? {
					return Err(Error::LengthMismatch {
						expected: N,
						found: N + 1,
					});
				}
			}
		}
		ar.end_seq()
	}
}

/// Write map as a sequence of `(key, value)` tuples.
fn serialize_entries<'a, K, V, A>(
	len: usize,
	entries: impl Iterator<Item = (&'a K, &'a V)>,
	ar: &mut A,
) -> Result<()>
where
	K: Serialize + 'a,
	V: Serialize + 'a,
	A: OArchive,
{
	ar.begin_seq(len)?;
	for (key, value) in entries {
		ar.begin_tuple()?;
		key.serialize(ar)?;
		value.serialize(ar)?;
		ar.end_tuple()?;
	}
	ar.end_seq()
}

/// Read a sequence of `(key, value)` tuples, passing each to `insert`.
fn deserialize_entries<K, V, A>(ar: &mut A, mut insert: impl FnMut(K, V)) -> Result<()>
where
	K: Deserialize + Default,
	V: Deserialize + Default,
	A: IArchive,
{
	ar.read_seq(|ar, _| {
		let (mut key, mut value) = (K::default(), V::default());
		ar.begin_tuple()?;
		key.deserialize(ar)?;
		value.deserialize(ar)?;
		ar.end_tuple()?;
		insert(key, value);
		Ok(())
	})?;
	Ok(())
}

impl<K: Serialize, V: Serialize> Serialize for BTreeMap<K, V> {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		serialize_entries(self.len(), self.iter(), ar)
	}
}

impl<K, V> Deserialize for BTreeMap<K, V>
where
	K: Deserialize + Default + Ord,
	V: Deserialize + Default,
{
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		self.clear();
		deserialize_entries(ar, |key, value| {
			self.insert(key, value);
		})
	}
}

impl<K: Serialize, V: Serialize, S> Serialize for HashMap<K, V, S> {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		serialize_entries(self.len(), self.iter(), ar)
	}
}

impl<K, V, S> Deserialize for HashMap<K, V, S>
where
	K: Deserialize + Default + Eq + Hash,
	V: Deserialize + Default,
	S: BuildHasher,
{
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		self.clear();
		deserialize_entries(ar, |key, value| {
			self.insert(key, value);
		})
	}
}
