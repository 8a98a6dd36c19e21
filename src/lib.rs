//! Owned NBT values with a pluggable kind registry, a big- and
//! little-endian binary codec, and a selective streaming decoder that
//! extracts only the fields a caller names.
//!
//! ```
//! use nbt_select::{Kind, NamedTag, SelectionTree, Selector, from_slice_be, select_slice_be, to_vec_be};
//!
//! let mut root = NamedTag::compound("hello world");
//! root.as_compound_mut().unwrap().insert("name", "Bananrama");
//! root.as_compound_mut().unwrap().insert("score", 42i32);
//!
//! let bytes = to_vec_be(&root).unwrap();
//! assert_eq!(from_slice_be(&bytes).unwrap(), root);
//!
//! let tree = SelectionTree::new([Selector::root("score", Kind::Int)]);
//! let picked = select_slice_be(&bytes, &tree).unwrap().unwrap();
//! assert_eq!(picked.value().get("score").and_then(|v| v.as_::<nbt_select::tag::Int>()), Some(&42));
//! assert!(picked.value().get("name").is_none());
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

mod config;
mod error;
mod index;
mod io;
mod nbt;
mod read;
mod registry;
mod select;
mod selection;
#[cfg(feature = "serde")]
mod ser;
mod util;
mod value;
mod write;

pub use config::*;
pub use error::*;
pub use index::*;
pub use io::*;
pub use nbt::tag::TagType;
pub use nbt::{Kind, tag};
pub use read::{
    from_reader_be, from_reader_le, from_slice, from_slice_be, from_slice_le, from_slice_with,
    read, read_with,
};
pub use registry::*;
pub use select::*;
pub use selection::*;
pub use util::*;
pub use value::*;
pub use write::{to_vec, to_vec_be, to_vec_le, to_writer_be, to_writer_le, write, write_with};
