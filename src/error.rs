//! Error types for NBT decoding, encoding and kind registration.
//!
//! This module contains the [`Error`] type which represents all possible errors
//! that can occur when reading or writing NBT data or mutating a
//! [`KindRegistry`](crate::KindRegistry). Every variant belongs to one
//! [`ErrorKind`], the coarse category callers usually branch on.
//!
//! # Example
//!
//! ```
//! use nbt_select::{Error, ErrorKind, Result, from_slice_be};
//!
//! fn try_parse(data: &[u8]) -> Result<()> {
//!     match from_slice_be(data) {
//!         Ok(_) => Ok(()),
//!         Err(e) if e.kind() == ErrorKind::MalformedStream => {
//!             println!("corrupt stream at {:?}", e.offset());
//!             Err(e)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//!
//! assert!(try_parse(&[10, 0, 0]).is_err());
//! ```

use std::fmt::{self, Display};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// Truncated input, negative or impossible lengths, misplaced End tags,
    /// invalid text, repeated entry names, nesting beyond the configured
    /// limit, trailing bytes.
    MalformedStream,
    /// A kind id that is neither built-in nor registered.
    UnknownKind,
    /// A value whose kind disagrees with its container.
    TypeMismatch,
    /// A registration collided with a built-in or registered id.
    AlreadyRegistered,
    /// The underlying reader or writer failed.
    Io,
    /// A value too large for its length prefix.
    Oversized,
    /// A failure reported by a custom kind.
    Custom,
}

/// This type represents all possible errors that can occur when reading or
/// writing NBT data.
///
/// Offsets are byte positions relative to where the reader or writer
/// started.
#[derive(Debug)]
pub enum Error {
    Message(String),

    /// An I/O error occurred.
    ///
    /// This happens when the [`std::io::Read`] or [`std::io::Write`]
    /// implementation fails for any reason other than running out of input.
    IO(std::io::Error),

    /// The input ended unexpectedly at the given offset.
    EndOfFile(u64),

    /// Extra bytes remain after the root tag of a slice.
    TrailingData(usize),

    /// A length or count prefix was negative.
    NegativeLength { length: i32, offset: u64 },

    /// An End tag appeared where a value was required: as the document root,
    /// or as the element kind of a non-empty list.
    UnexpectedEnd(u64),

    /// A name or string was not valid text in the configured encoding.
    InvalidString(u64),

    /// Nesting exceeded the configured `max_depth`.
    DepthLimitExceeded { limit: usize, offset: u64 },

    /// A compound repeated an entry name. The offset is that of the second
    /// occurrence's name.
    DuplicateName { name: String, offset: u64 },

    /// A kind id that is neither built-in nor registered. The offset is
    /// present when the id was read from a stream.
    UnknownKind { id: u8, offset: Option<u64> },

    /// The kind id is already taken by a built-in or a registered kind.
    AlreadyRegistered(u8),

    /// A value of kind `actual` was offered where `expected` is required.
    TagMismatch(u8, u8),

    /// A name or string exceeds 65535 encoded bytes.
    StringTooLong(usize),

    /// An array or list exceeds `i32::MAX` elements.
    ListTooLong(usize),
}

impl Error {
    /// Creates an error carrying a free-form message, for custom kinds.
    pub fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Message(_) => ErrorKind::Custom,
            Error::IO(_) => ErrorKind::Io,
            Error::EndOfFile(_)
            | Error::TrailingData(_)
            | Error::NegativeLength { .. }
            | Error::UnexpectedEnd(_)
            | Error::InvalidString(_)
            | Error::DepthLimitExceeded { .. }
            | Error::DuplicateName { .. } => ErrorKind::MalformedStream,
            Error::UnknownKind { .. } => ErrorKind::UnknownKind,
            Error::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            Error::TagMismatch(_, _) => ErrorKind::TypeMismatch,
            Error::StringTooLong(_) | Error::ListTooLong(_) => ErrorKind::Oversized,
        }
    }

    /// The byte offset at which the failure was detected, where known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::EndOfFile(offset)
            | Error::UnexpectedEnd(offset)
            | Error::InvalidString(offset)
            | Error::NegativeLength { offset, .. }
            | Error::DepthLimitExceeded { offset, .. }
            | Error::DuplicateName { offset, .. } => Some(*offset),
            Error::UnknownKind { offset, .. } => *offset,
            _ => None,
        }
    }

    /// Returns `true` if the stream that produced this error cannot be trusted
    /// any further.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedStream | ErrorKind::UnknownKind | ErrorKind::Io
        )
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile(offset) => {
                write!(formatter, "unexpected end of input at offset {offset}")
            }
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            ),
            Error::NegativeLength { length, offset } => {
                write!(formatter, "negative length {length} at offset {offset}")
            }
            Error::UnexpectedEnd(offset) => {
                write!(formatter, "unexpected End tag at offset {offset}")
            }
            Error::InvalidString(offset) => {
                write!(formatter, "invalid string data at offset {offset}")
            }
            Error::DepthLimitExceeded { limit, offset } => write!(
                formatter,
                "nesting deeper than {limit} levels at offset {offset}"
            ),
            Error::DuplicateName { name, offset } => {
                write!(formatter, "duplicate compound entry {name:?} at offset {offset}")
            }
            Error::UnknownKind { id, offset: Some(offset) } => {
                write!(formatter, "unknown NBT tag type {id:#04x} at offset {offset}")
            }
            Error::UnknownKind { id, offset: None } => {
                write!(formatter, "unknown NBT tag type {id:#04x}")
            }
            Error::AlreadyRegistered(id) => {
                write!(formatter, "tag type {id:#04x} is already registered")
            }
            Error::TagMismatch(expected, actual) => write!(
                formatter,
                "tag in list mismatch: expected {expected:#04x}, got {actual:#04x}"
            ),
            Error::StringTooLong(len) => write!(formatter, "string too long: {len} bytes"),
            Error::ListTooLong(len) => write!(formatter, "list length too long: {len}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}
