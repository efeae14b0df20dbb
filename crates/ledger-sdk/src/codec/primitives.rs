//! XDR primitive encoding/decoding (RFC 4506).
//!
//! Every item is big-endian and padded to a multiple of four bytes.

use crate::error::DecodeError;
use crate::model::{AccountId, PublicKey};

const ALIGN: usize = 4;

#[inline]
fn padding(len: usize) -> usize {
    (ALIGN - len % ALIGN) % ALIGN
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding XDR data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes, without padding.
    #[inline]
    fn read_raw(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_raw(N, context)?);
        Ok(out)
    }

    /// Reads an unsigned 32-bit integer.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a signed 32-bit integer.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array(context)?))
    }

    /// Reads an unsigned 64-bit integer (XDR unsigned hyper).
    #[inline]
    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a signed 64-bit integer (XDR hyper).
    #[inline]
    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a bool, which must be encoded as 0 or 1.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        match self.read_u32(context)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { context, value }),
        }
    }

    /// Reads fixed-length opaque data and checks that its padding is zero.
    pub fn read_fixed_opaque<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let out = self.read_array::<N>(context)?;
        let pad = self.read_raw(padding(N), context)?;
        if pad.iter().any(|b| *b != 0) {
            return Err(DecodeError::NonZeroPadding { context });
        }
        Ok(out)
    }

    /// Reads the presence flag of an optional item.
    pub fn read_option_flag(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        self.read_bool(context)
    }

    /// Reads the element count of a variable-length array, bounded by `max`.
    pub fn read_array_len(&mut self, max: usize, field: &'static str) -> Result<usize, DecodeError> {
        let len = self.read_u32(field)? as usize;
        if len > max {
            return Err(DecodeError::LengthExceedsLimit { field, len, max });
        }
        Ok(len)
    }

    /// Reads a 32-byte public key.
    #[inline]
    pub fn read_public_key(&mut self, context: &'static str) -> Result<PublicKey, DecodeError> {
        self.read_fixed_opaque::<32>(context)
    }

    /// Reads an account id (a bare public key on the wire).
    pub fn read_account_id(&mut self, context: &'static str) -> Result<AccountId, DecodeError> {
        Ok(AccountId::from_public_key(self.read_public_key(context)?))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding XDR data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(value as u32);
    }

    /// Writes fixed-length opaque data followed by zero padding.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.buf.extend(std::iter::repeat_n(0u8, padding(bytes.len())));
    }

    /// Writes the presence flag of an optional item.
    pub fn write_option_flag(&mut self, present: bool) {
        self.write_bool(present);
    }

    #[inline]
    pub fn write_public_key(&mut self, key: &PublicKey) {
        self.write_fixed_opaque(key);
    }

    pub fn write_account_id(&mut self, id: &AccountId) {
        self.write_public_key(id.public_key());
    }
}
