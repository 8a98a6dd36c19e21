//! Encoder, the structural inverse of [`read`](crate::read()).

use std::io::Write;

use zerocopy::{BigEndian, LittleEndian};

use crate::{
    ByteOrder, CodecOptions, Compound, Error, Kind, List, NamedTag, PrimitiveWrite, Result, Value,
    Writer, cold_path,
};

pub(crate) struct Encoder<W> {
    output: W,
    options: CodecOptions,
}

impl<W: PrimitiveWrite> Encoder<W> {
    pub(crate) fn new(output: W, options: CodecOptions) -> Self {
        Self { output, options }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let encoded = self.options.text.encode(text);
        let len = u16::try_from(encoded.len()).map_err(|_| {
            cold_path();
            Error::StringTooLong(encoded.len())
        })?;
        self.output.write_u16(len)?;
        self.output.write_bytes(&encoded)
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| {
            cold_path();
            Error::ListTooLong(len)
        })?;
        self.output.write_i32(len)
    }

    /// Writes a standalone tag: kind, name, payload.
    pub(crate) fn write_root(&mut self, tag: &NamedTag) -> Result<()> {
        self.write_entry(tag.name(), tag.value())
    }

    fn write_entry(&mut self, name: &str, value: &Value) -> Result<()> {
        if let Value::End = value {
            cold_path();
            return Err(Error::UnexpectedEnd(self.output.position()));
        }
        self.output.write_u8(value.kind().id())?;
        self.write_text(name)?;
        self.write_payload(value)
    }

    fn write_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::End => {
                cold_path();
                Err(Error::UnexpectedEnd(self.output.position()))
            }
            Value::Byte(v) => self.output.write_i8(*v),
            Value::Short(v) => self.output.write_i16(*v),
            Value::Int(v) => self.output.write_i32(*v),
            Value::Long(v) => self.output.write_i64(*v),
            Value::Float(v) => self.output.write_f32(*v),
            Value::Double(v) => self.output.write_f64(*v),
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                let bytes: Vec<u8> = v.iter().map(|b| *b as u8).collect();
                self.output.write_bytes(&bytes)
            }
            Value::String(v) => self.write_text(v),
            Value::List(v) => self.write_list(v),
            Value::Compound(v) => self.write_compound(v),
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.output.write_i32(*i)?;
                }
                Ok(())
            }
            Value::Custom(v) => v.encode(&mut self.output),
        }
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        self.output.write_u8(list.element_kind().id())?;
        self.write_len(list.len())?;
        for item in list {
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, value) in compound {
            self.write_entry(name, value)?;
        }
        self.output.write_u8(Kind::End.id())
    }
}

/// Writes `tag` to `writer` in byte order `O`.
pub fn write<O: ByteOrder>(tag: &NamedTag, writer: impl Write) -> Result<()> {
    write_with::<O>(tag, writer, &CodecOptions::default())
}

pub fn write_with<O: ByteOrder>(
    tag: &NamedTag,
    writer: impl Write,
    options: &CodecOptions,
) -> Result<()> {
    let mut encoder = Encoder::new(Writer::<_, O>::new(writer), *options);
    encoder.write_root(tag)?;
    encoder.output.flush()
}

pub fn to_vec<O: ByteOrder>(tag: &NamedTag) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    write::<O>(tag, &mut buf)?;
    Ok(buf)
}

/// Encodes `tag` big-endian (Java edition).
#[inline]
pub fn to_vec_be(tag: &NamedTag) -> Result<Vec<u8>> {
    to_vec::<BigEndian>(tag)
}

/// Encodes `tag` little-endian (Bedrock edition).
#[inline]
pub fn to_vec_le(tag: &NamedTag) -> Result<Vec<u8>> {
    to_vec::<LittleEndian>(tag)
}

#[inline]
pub fn to_writer_be(tag: &NamedTag, writer: impl Write) -> Result<()> {
    write::<BigEndian>(tag, writer)
}

#[inline]
pub fn to_writer_le(tag: &NamedTag, writer: impl Write) -> Result<()> {
    write::<LittleEndian>(tag, writer)
}
