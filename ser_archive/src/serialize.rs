use crate::{IArchive, OArchive, Result};

/// Trait for types which can be saved to an archive.
///
/// Implemented for primitives, strings, buffers and common containers.
/// For your own types, use `#[derive(Serialize)]`, or implement it by driving
/// the archive's shape methods:
///
/// ```
/// use ser_archive::{flags::{BINARY, MEM}, save, OArchive, Result, Serialize};
///
/// struct Point {
/// 	x: i32,
/// 	y: i32,
/// }
///
/// impl Serialize for Point {
/// 	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
/// 		ar.begin_struct()?;
/// 		ar.field("x")?;
/// 		ar.save(&self.x)?;
/// 		ar.field("y")?;
/// 		ar.save(&self.y)?;
/// 		ar.end_struct()
/// 	}
/// }
///
/// let buf = save::<{ BINARY | MEM }>(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buf.len(), 5 + 8);
/// ```
pub trait Serialize {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()>;
}

/// Trait for types which can be loaded from an archive.
///
/// Loading happens in place: `deserialize` overwrites `self`.
pub trait Deserialize {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()>;
}

/// Trait for use with `#[ser_with]`.
///
/// Implement on a proxy type to (de)serialize fields of type `T` which do not
/// implement [`Serialize`] / [`Deserialize`] themselves.
pub trait SerializeWith<T: ?Sized> {
	fn serialize_with<A: OArchive>(value: &T, ar: &mut A) -> Result<()>;

	fn deserialize_with<A: IArchive>(value: &mut T, ar: &mut A) -> Result<()>;
}

/// Byte buffer, (de)serialized as a single buffer rather than a sequence of
/// `u8`s.
///
/// Binary and text archives write it raw with a length prefix, JSON as a
/// base64 string.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
	fn from(vec: Vec<u8>) -> Self {
		Self(vec)
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

/// Values passed to [`save`](crate::save), [`save_to`](crate::save_to) and
/// [`saved_size`](crate::saved_size).
///
/// Either a single reference `&value`, or a tuple of references
/// `(&a, &b, ...)` (up to 12). Values are saved in order.
pub trait SaveArgs {
	fn save_all<A: OArchive>(self, ar: &mut A) -> Result<()>;
}

/// Values passed to [`load`](crate::load) and [`load_from`](crate::load_from).
///
/// Either a single reference `&mut value`, or a tuple of references
/// `(&mut a, &mut b, ...)` (up to 12). Values are loaded in order.
pub trait LoadArgs {
	fn load_all<A: IArchive>(self, ar: &mut A) -> Result<()>;
}

impl<T: Serialize + ?Sized> SaveArgs for &T {
	#[inline]
	fn save_all<A: OArchive>(self, ar: &mut A) -> Result<()> {
		ar.save(self)?;
		Ok(())
	}
}

impl<T: Deserialize + ?Sized> LoadArgs for &mut T {
	#[inline]
	fn load_all<A: IArchive>(self, ar: &mut A) -> Result<()> {
		ar.load(self)?;
		Ok(())
	}
}

macro_rules! impl_args {
	($($name:ident : $ty:ident),+) => {
		impl<$($ty: Serialize + ?Sized),+> SaveArgs for ($(&$ty,)+) {
			#[inline]
			fn save_all<A: OArchive>(self, ar: &mut A) -> Result<()> {
				let ($($name,)+) = self;
				$(ar.save($name)?;)+
				Ok(())
			}
		}

		impl<$($ty: Deserialize + ?Sized),+> LoadArgs for ($(&mut $ty,)+) {
			#[inline]
			fn load_all<A: IArchive>(self, ar: &mut A) -> Result<()> {
				let ($($name,)+) = self;
				$(ar.load($name)?;)+
				Ok(())
			}
		}
	};
}

impl_args!(a: A0);
impl_args!(a: A0, b: A1);
impl_args!(a: A0, b: A1, c: A2);
impl_args!(a: A0, b: A1, c: A2, d: A3);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6, h: A7);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6, h: A7, i: A8);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6, h: A7, i: A8, j: A9);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6, h: A7, i: A8, j: A9, k: A10);
impl_args!(a: A0, b: A1, c: A2, d: A3, e: A4, f: A5, g: A6, h: A7, i: A8, j: A9, k: A10, l: A11);
