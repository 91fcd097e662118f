use crate::{Deserialize, IArchive, OArchive, Result, Serialize};

impl<T: Serialize> Serialize for Option<T> {
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.write_option(self.is_some())?;
		if let Some(value) = self {
			value.serialize(ar)?;
			ar.end_option()?;
		}
		Ok(())
	}
}

impl<T: Deserialize + Default> Deserialize for Option<T> {
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		if !ar.read_option()? {
			*self = None;
			return Ok(());
		}
		// Load into existing value if there is one
		self.get_or_insert_with(T::default).deserialize(ar)?;
		ar.end_option()
	}
}

impl Serialize for () {
	#[inline]
	fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
		ar.begin_tuple()?;
		ar.end_tuple()
	}
}

impl Deserialize for () {
	#[inline]
	fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
		ar.begin_tuple()?;
		ar.end_tuple()
	}
}

macro_rules! impl_tuple {
	($($ty:ident . $index:tt),+) => {
		impl<$($ty: Serialize),+> Serialize for ($($ty,)+) {
			fn serialize<A: OArchive>(&self, ar: &mut A) -> Result<()> {
				ar.begin_tuple()?;
				$(self.$index.serialize(ar)?;)+
				ar.end_tuple()
			}
		}

		impl<$($ty: Deserialize),+> Deserialize for ($($ty,)+) {
			fn deserialize<A: IArchive>(&mut self, ar: &mut A) -> Result<()> {
				ar.begin_tuple()?;
				$(self.$index.deserialize(ar)?;)+
				ar.end_tuple()
			}
		}
	};
}

impl_tuple!(T0.0);
impl_tuple!(T0.0, T1.1);
impl_tuple!(T0.0, T1.1, T2.2);
impl_tuple!(T0.0, T1.1, T2.2, T3.3);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6, T7.7);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6, T7.7, T8.8);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6, T7.7, T8.8, T9.9);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6, T7.7, T8.8, T9.9, T10.10);
impl_tuple!(T0.0, T1.1, T2.2, T3.3, T4.4, T5.5, T6.6, T7.7, T8.8, T9.9, T10.10, T11.11);
