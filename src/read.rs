//! Full materializing decoder.
//!
//! ```
//! use nbt_select::{Value, from_slice_be};
//!
//! // Compound "" { Int "int": 0xdead }
//! let bytes = [10, 0, 0, 3, 0, 3, b'i', b'n', b't', 0, 0, 0xde, 0xad, 0];
//! let root = from_slice_be(&bytes).unwrap();
//!
//! assert_eq!(root.name(), "");
//! assert_eq!(root.value().get("int"), Some(&Value::Int(0xdead)));
//! ```

use std::{io::Read, sync::Arc};

use zerocopy::{BigEndian, LittleEndian};

use crate::{
    ByteOrder, CodecOptions, Compound, CustomKind, CustomValue, Error, Kind, KindRegistry, List,
    NamedTag, PrimitiveRead, Reader, Result, Value, cold_path,
};

/// Recursive-descent decoder over one stream. Shared by [`read_with`] and
/// the selective decoder, which delegates every payload it keeps or skips.
pub(crate) struct Decoder<'r, R> {
    pub(crate) input: R,
    registry: &'r KindRegistry,
    options: CodecOptions,
}

impl<'r, R: PrimitiveRead> Decoder<'r, R> {
    pub(crate) fn new(input: R, registry: &'r KindRegistry, options: CodecOptions) -> Self {
        Self {
            input,
            registry,
            options,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.input.position()
    }

    #[inline]
    pub(crate) fn read_kind(&mut self) -> Result<Kind> {
        Ok(Kind::from_id(self.input.read_u8()?))
    }

    pub(crate) fn read_name(&mut self) -> Result<String> {
        let offset = self.input.position();
        let len = self.input.read_u16()? as usize;
        let bytes = self.input.read_vec(len)?;
        self.options.text.decode(bytes).ok_or_else(|| {
            cold_path();
            Error::InvalidString(offset)
        })
    }

    fn skip_name(&mut self) -> Result<()> {
        let len = self.input.read_u16()?;
        self.input.skip(len as u64)
    }

    /// Reads a signed 32-bit length or count prefix.
    fn read_len(&mut self) -> Result<usize> {
        let offset = self.input.position();
        let length = self.input.read_i32()?;
        if length < 0 {
            cold_path();
            return Err(Error::NegativeLength { length, offset });
        }
        Ok(length as usize)
    }

    /// Descends one container level below `depth`, enforcing `max_depth`.
    #[inline]
    pub(crate) fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
                offset: self.input.position(),
            });
        }
        Ok(depth)
    }

    fn strategy(&self, id: u8, offset: u64) -> Result<Arc<dyn CustomKind>> {
        self.registry.strategy(id).map_err(|e| match e {
            Error::UnknownKind { id, .. } => Error::UnknownKind {
                id,
                offset: Some(offset),
            },
            other => other,
        })
    }

    /// Reads a standalone tag: kind, name, payload. End is not a value here.
    pub(crate) fn read_root(&mut self) -> Result<NamedTag> {
        let offset = self.input.position();
        let kind = self.read_kind()?;
        if kind == Kind::End {
            cold_path();
            return Err(Error::UnexpectedEnd(offset));
        }
        let name = self.read_name()?;
        let value = self.read_payload(kind, 0)?;
        Ok(NamedTag::new(name, value))
    }

    /// Reads the payload of `kind`. `depth` is the nesting level of the
    /// container holding it.
    pub(crate) fn read_payload(&mut self, kind: Kind, depth: usize) -> Result<Value> {
        Ok(match kind {
            Kind::End => {
                cold_path();
                return Err(Error::UnexpectedEnd(self.input.position()));
            }
            Kind::Byte => Value::Byte(self.input.read_i8()?),
            Kind::Short => Value::Short(self.input.read_i16()?),
            Kind::Int => Value::Int(self.input.read_i32()?),
            Kind::Long => Value::Long(self.input.read_i64()?),
            Kind::Float => Value::Float(self.input.read_f32()?),
            Kind::Double => Value::Double(self.input.read_f64()?),
            Kind::ByteArray => {
                let len = self.read_len()?;
                let bytes = self.input.read_vec(len)?;
                Value::ByteArray(bytes.into_iter().map(|b| b as i8).collect())
            }
            Kind::String => {
                let offset = self.input.position();
                let len = self.input.read_u16()? as usize;
                let bytes = self.input.read_vec(len)?;
                match self.options.text.decode(bytes) {
                    Some(text) => Value::String(text),
                    None => {
                        cold_path();
                        return Err(Error::InvalidString(offset));
                    }
                }
            }
            Kind::List => Value::List(self.read_list(depth)?),
            Kind::Compound => Value::Compound(self.read_compound(depth)?),
            Kind::IntArray => {
                let len = self.read_len()?;
                Value::IntArray(self.input.read_i32_array(len)?)
            }
            Kind::Custom(id) => {
                let offset = self.input.position();
                let strategy = self.strategy(id, offset)?;
                let payload = strategy.decode(&mut self.input)?;
                Value::Custom(CustomValue::new(id, strategy, payload))
            }
        })
    }

    pub(crate) fn read_compound(&mut self, depth: usize) -> Result<Compound> {
        let depth = self.enter(depth)?;
        let mut compound = Compound::new();
        loop {
            let kind = self.read_kind()?;
            if kind == Kind::End {
                return Ok(compound);
            }
            let offset = self.input.position();
            let name = self.read_name()?;
            if compound.contains_key(&name) {
                cold_path();
                return Err(Error::DuplicateName { name, offset });
            }
            let value = self.read_payload(kind, depth)?;
            compound.insert(name, value);
        }
    }

    fn read_list(&mut self, depth: usize) -> Result<List> {
        let depth = self.enter(depth)?;
        let offset = self.input.position();
        let element = self.read_kind()?;
        let len = self.read_len()?;
        if element == Kind::End {
            if len > 0 {
                cold_path();
                return Err(Error::UnexpectedEnd(offset));
            }
            return Ok(List::default());
        }
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(self.read_payload(element, depth)?);
        }
        Ok(List::from_decoded(element, items))
    }

    /// Consumes the payload of `kind` without building a value.
    pub(crate) fn skip_payload(&mut self, kind: Kind, depth: usize) -> Result<()> {
        match kind {
            Kind::End => {
                cold_path();
                Err(Error::UnexpectedEnd(self.input.position()))
            }
            Kind::Byte => self.input.skip(1),
            Kind::Short => self.input.skip(2),
            Kind::Int | Kind::Float => self.input.skip(4),
            Kind::Long | Kind::Double => self.input.skip(8),
            Kind::ByteArray => {
                let len = self.read_len()?;
                self.input.skip(len as u64)
            }
            Kind::String => self.skip_name(),
            Kind::IntArray => {
                let len = self.read_len()?;
                self.input.skip(len as u64 * 4)
            }
            Kind::List => {
                let depth = self.enter(depth)?;
                let offset = self.input.position();
                let element = self.read_kind()?;
                let len = self.read_len()?;
                if element == Kind::End {
                    if len > 0 {
                        cold_path();
                        return Err(Error::UnexpectedEnd(offset));
                    }
                    return Ok(());
                }
                if let Some(size) = element.payload_size() {
                    return self.input.skip(len as u64 * size as u64);
                }
                for _ in 0..len {
                    self.skip_payload(element, depth)?;
                }
                Ok(())
            }
            Kind::Compound => {
                let depth = self.enter(depth)?;
                self.skip_compound_rest(depth)
            }
            Kind::Custom(id) => {
                let offset = self.input.position();
                let strategy = self.strategy(id, offset)?;
                strategy.decode(&mut self.input).map(drop)
            }
        }
    }

    /// Skips the remaining entries of a compound already entered at `depth`,
    /// including its End terminator.
    pub(crate) fn skip_compound_rest(&mut self, depth: usize) -> Result<()> {
        loop {
            let kind = self.read_kind()?;
            if kind == Kind::End {
                return Ok(());
            }
            self.skip_name()?;
            self.skip_payload(kind, depth)?;
        }
    }
}

/// Reads one document from `reader` in byte order `O`, resolving custom
/// kinds through [`KindRegistry::global`].
pub fn read<O: ByteOrder>(reader: impl Read) -> Result<NamedTag> {
    read_with::<O>(reader, KindRegistry::global(), &CodecOptions::default())
}

/// Reads one document from `reader` with an explicit registry and options.
///
/// Bytes after the root tag are left unread.
pub fn read_with<O: ByteOrder>(
    reader: impl Read,
    registry: &KindRegistry,
    options: &CodecOptions,
) -> Result<NamedTag> {
    Decoder::new(Reader::<_, O>::new(reader), registry, *options).read_root()
}

/// Decodes a whole slice, failing with [`Error::TrailingData`] if bytes
/// remain after the root tag.
pub fn from_slice<O: ByteOrder>(source: &[u8]) -> Result<NamedTag> {
    from_slice_with::<O>(source, KindRegistry::global(), &CodecOptions::default())
}

pub fn from_slice_with<O: ByteOrder>(
    source: &[u8],
    registry: &KindRegistry,
    options: &CodecOptions,
) -> Result<NamedTag> {
    let mut decoder = Decoder::new(Reader::<_, O>::new(source), registry, *options);
    let root = decoder.read_root()?;
    let remaining = decoder.input.get_ref().len();
    if remaining != 0 {
        cold_path();
        return Err(Error::TrailingData(remaining));
    }
    Ok(root)
}

/// Decodes a big-endian (Java edition) slice.
#[inline]
pub fn from_slice_be(source: &[u8]) -> Result<NamedTag> {
    from_slice::<BigEndian>(source)
}

/// Decodes a little-endian (Bedrock edition) slice.
#[inline]
pub fn from_slice_le(source: &[u8]) -> Result<NamedTag> {
    from_slice::<LittleEndian>(source)
}

#[inline]
pub fn from_reader_be(reader: impl Read) -> Result<NamedTag> {
    read::<BigEndian>(reader)
}

#[inline]
pub fn from_reader_le(reader: impl Read) -> Result<NamedTag> {
    read::<LittleEndian>(reader)
}
