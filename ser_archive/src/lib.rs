//! Serialize values into binary, text or JSON archives, backed by growable
//! memory streams.
//!
//! The entry points are [`save`], [`save_to`], [`load`], [`load_from`] and
//! [`saved_size`]. Each is parameterized by a `u32` flag set built from the
//! constants in [`flags`], selecting one format and one storage kind:
//!
//! ```
//! use ser_archive::{flags::{BINARY, MEM}, load, save, saved_size};
//!
//! let buf = save::<{ BINARY | MEM }>((&7u32, &true, &vec![1u16, 2, 3])).unwrap();
//! assert_eq!(buf.len(), saved_size::<{ BINARY | MEM }>((&7u32, &true, &vec![1u16, 2, 3])).unwrap());
//!
//! let (mut a, mut b, mut c) = (0u32, false, Vec::<u16>::new());
//! load::<{ BINARY | MEM }>(&buf, (&mut a, &mut b, &mut c)).unwrap();
//! assert_eq!((a, b, c), (7, true, vec![1, 2, 3]));
//! ```
//!
//! Invalid flag sets (no format, two formats, two storage kinds...) are
//! rejected at compile time.

#[cfg(feature = "derive")]
pub use ser_archive_derive::{Deserialize, Serialize};

mod error;
pub use error::{Error, Result};

pub mod archive;
pub use archive::{IArchive, OArchive};

pub mod buffer;
pub use buffer::{IntrusiveBuffer, SharedBuffer};

mod dispatch;
pub use dispatch::{load, load_from, save, save_to, saved_size};

pub mod flags;
pub use flags::{Config, Endian, Format, Storage};

pub mod header;

mod primitives;
pub use primitives::{Primitive, PrimitiveKind};

mod serialize;
pub use serialize::{Bytes, Deserialize, LoadArgs, SaveArgs, Serialize, SerializeWith};

mod serialize_impls;

pub mod streams;

mod util;
