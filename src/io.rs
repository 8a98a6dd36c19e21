//! Primitive stream readers and writers.
//!
//! [`Reader`] and [`Writer`] wrap any [`std::io::Read`] / [`std::io::Write`],
//! encode fixed-width fields in the byte order `O`, and count the bytes they
//! have consumed or produced. The object-safe [`PrimitiveRead`] and
//! [`PrimitiveWrite`] traits hand the same capability to custom kinds.

use std::{
    io::{self, Read, Write},
    marker::PhantomData,
};

use zerocopy::byteorder;

use crate::{ByteOrder, Error, Result, cold_path};

/// Fixed-width reads in a configured byte order.
pub trait PrimitiveRead {
    /// Bytes consumed since the reader was created.
    fn position(&self) -> u64;

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Reads exactly `len` bytes into a fresh vector. The allocation grows
    /// with the data actually read, so a corrupt length cannot reserve
    /// unbounded memory up front.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Discards exactly `len` bytes.
    fn skip(&mut self, len: u64) -> Result<()>;

    fn read_u8(&mut self) -> Result<u8>;
    fn read_i8(&mut self) -> Result<i8>;
    fn read_i16(&mut self) -> Result<i16>;
    fn read_u16(&mut self) -> Result<u16>;
    fn read_i32(&mut self) -> Result<i32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;

    /// Reads `len` consecutive 32-bit integers.
    fn read_i32_array(&mut self, len: usize) -> Result<Vec<i32>>;
}

/// Fixed-width writes in a configured byte order.
pub trait PrimitiveWrite {
    /// Bytes written since the writer was created.
    fn position(&self) -> u64;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    fn write_u8(&mut self, value: u8) -> Result<()>;
    fn write_i8(&mut self, value: i8) -> Result<()>;
    fn write_i16(&mut self, value: i16) -> Result<()>;
    fn write_u16(&mut self, value: u16) -> Result<()>;
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_f32(&mut self, value: f32) -> Result<()>;
    fn write_f64(&mut self, value: f64) -> Result<()>;
}

/// Byte-order aware reader over any [`Read`].
pub struct Reader<R, O: ByteOrder> {
    inner: R,
    position: u64,
    _marker: PhantomData<O>,
}

impl<R: Read, O: ByteOrder> Reader<R, O> {
    #[inline]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read, O: ByteOrder> PrimitiveRead for Reader<R, O> {
    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                cold_path();
                Err(Error::EndOfFile(self.position))
            }
            Err(e) => Err(Error::IO(e)),
        }
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(4096));
        let read = (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(Error::IO)?;
        self.position += read as u64;
        if read < len {
            cold_path();
            return Err(Error::EndOfFile(self.position));
        }
        Ok(buf)
    }

    fn skip(&mut self, len: u64) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())
            .map_err(Error::IO)?;
        self.position += skipped;
        if skipped < len {
            cold_path();
            return Err(Error::EndOfFile(self.position));
        }
        Ok(())
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_array::<1>()?[0] as i8)
    }

    #[inline]
    fn read_i16(&mut self) -> Result<i16> {
        Ok(byteorder::I16::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16> {
        Ok(byteorder::U16::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_i32(&mut self) -> Result<i32> {
        Ok(byteorder::I32::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_i64(&mut self) -> Result<i64> {
        Ok(byteorder::I64::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_f32(&mut self) -> Result<f32> {
        Ok(byteorder::F32::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_f64(&mut self) -> Result<f64> {
        Ok(byteorder::F64::<O>::from_bytes(self.read_array()?).get())
    }

    fn read_i32_array(&mut self, len: usize) -> Result<Vec<i32>> {
        let bytes = self.read_vec(len.saturating_mul(4))?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| byteorder::I32::<O>::from_bytes([c[0], c[1], c[2], c[3]]).get())
            .collect())
    }
}

/// Byte-order aware writer over any [`Write`].
pub struct Writer<W, O: ByteOrder> {
    inner: W,
    position: u64,
    _marker: PhantomData<O>,
}

impl<W: Write, O: ByteOrder> Writer<W, O> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            position: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::IO)
    }
}

impl<W: Write, O: ByteOrder> PrimitiveWrite for Writer<W, O> {
    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(Error::IO)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    #[inline]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    #[inline]
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_bytes(&[value as u8])
    }

    #[inline]
    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_bytes(&byteorder::I16::<O>::new(value).to_bytes())
    }

    #[inline]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&byteorder::U16::<O>::new(value).to_bytes())
    }

    #[inline]
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&byteorder::I32::<O>::new(value).to_bytes())
    }

    #[inline]
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_bytes(&byteorder::I64::<O>::new(value).to_bytes())
    }

    #[inline]
    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_bytes(&byteorder::F32::<O>::new(value).to_bytes())
    }

    #[inline]
    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_bytes(&byteorder::F64::<O>::new(value).to_bytes())
    }
}
