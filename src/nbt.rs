use std::fmt;

pub mod tag;

/// The discriminant of a tag: one of the twelve built-in kinds, or a
/// registry-resolved custom kind.
///
/// Built-in kinds occupy the fixed wire ids `0..=11`. Every other id is a
/// [`Kind::Custom`] and is only decodable once registered with a
/// [`KindRegistry`](crate::KindRegistry).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Kind {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    Custom(u8),
}

impl Kind {
    /// Highest id reserved for a built-in kind.
    pub const MAX_BUILTIN_ID: u8 = 11;

    /// Maps a wire id onto a kind. Ids above [`Kind::MAX_BUILTIN_ID`] become
    /// [`Kind::Custom`]; whether they resolve is up to the registry.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_select::Kind;
    ///
    /// assert_eq!(Kind::from_id(3), Kind::Int);
    /// assert_eq!(Kind::from_id(100), Kind::Custom(100));
    /// ```
    pub const fn from_id(id: u8) -> Self {
        match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            other => Self::Custom(other),
        }
    }

    /// The wire id of this kind.
    pub const fn id(self) -> u8 {
        match self {
            Self::End => 0,
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 3,
            Self::Long => 4,
            Self::Float => 5,
            Self::Double => 6,
            Self::ByteArray => 7,
            Self::String => 8,
            Self::List => 9,
            Self::Compound => 10,
            Self::IntArray => 11,
            Self::Custom(id) => id,
        }
    }

    /// Returns `true` if `id` belongs to a built-in kind.
    #[inline]
    pub const fn is_builtin_id(id: u8) -> bool {
        id <= Self::MAX_BUILTIN_ID
    }

    /// Returns `true` for every kind except [`Kind::Custom`].
    ///
    /// A `Custom` holding a built-in id is never produced by
    /// [`Kind::from_id`], but can be built by hand; it is not built-in.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Returns `true` if this is a fixed-width scalar kind.
    ///
    /// Primitive kinds are: Byte, Short, Int, Long, Float, Double.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_select::Kind;
    ///
    /// assert!(Kind::Int.is_primitive());
    /// assert!(Kind::Double.is_primitive());
    /// assert!(!Kind::List.is_primitive());
    /// assert!(!Kind::ByteArray.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns `true` if this is an array kind (ByteArray, IntArray).
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray)
    }

    /// Returns `true` if this kind contains other tags (List, Compound).
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Payload width in bytes for fixed-width kinds, `Some(0)` for End and
    /// `None` for everything whose payload length is data-dependent.
    pub const fn payload_size(self) -> Option<usize> {
        match self {
            Self::End => Some(0),
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
            Self::Custom(_) => "Custom",
        }
    }
}

impl From<u8> for Kind {
    #[inline]
    fn from(id: u8) -> Self {
        Self::from_id(id)
    }
}

impl From<Kind> for u8 {
    #[inline]
    fn from(kind: Kind) -> Self {
        kind.id()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(id) => write!(f, "Custom({id})"),
            other => f.write_str(other.name()),
        }
    }
}
