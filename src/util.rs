#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

/// Byte order of every fixed-width field on the wire.
///
/// Implemented for all [`zerocopy::ByteOrder`] types, so [`BigEndian`](crate::BigEndian)
/// (Java edition, canonical) and [`LittleEndian`](crate::LittleEndian) (Bedrock edition)
/// both work.
pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}
