use bytes::BufMut;
use tracing::trace;

use crate::error::{ImageError, Result, SectionError};
use crate::section_type::SectionType;

/// Hap Image file signature.
pub const SIGNATURE: [u8; 4] = [0x88, 0x48, 0x61, 0x70];

/// Compact header: length (3) + type (1).
pub const COMPACT_HEADER_SIZE: usize = 4;

/// Extended header: zero (3) + type (1) + length (4).
pub const EXTENDED_HEADER_SIZE: usize = 8;

/// Largest body length a compact header can carry.
pub const MAX_COMPACT_BODY: u32 = 0x00FF_FFFF;

/// Decoded section header.
///
/// Wire format (all integers little-endian):
/// ```text
/// compact:  ┌────────────────┬──────────┐
///           │ Length (3B)    │ Type (1B)│              Length != 0
///           └────────────────┴──────────┘
/// extended: ┌────────────────┬──────────┬─────────────┐
///           │ 00 00 00       │ Type (1B)│ Length (4B) │
///           └────────────────┴──────────┴─────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    header_length: usize,
    body_length: u32,
    section_type: SectionType,
}

impl SectionHeader {
    /// Header for a body of `body_length` bytes, using the compact form when
    /// the length allows it.
    pub fn for_body(body_length: u32, section_type: SectionType) -> Self {
        match Self::compact(body_length, section_type) {
            Ok(header) => header,
            Err(_) => Self::extended(body_length, section_type),
        }
    }

    /// Compact 4-byte header. Fails for a zero length, which is reserved as the
    /// extended-form marker, and for lengths above [`MAX_COMPACT_BODY`].
    pub fn compact(
        body_length: u32,
        section_type: SectionType,
    ) -> std::result::Result<Self, SectionError> {
        if body_length == 0 || body_length > MAX_COMPACT_BODY {
            return Err(SectionError::LengthOutOfRange {
                length: u64::from(body_length),
                header_length: COMPACT_HEADER_SIZE,
            });
        }
        Ok(Self {
            header_length: COMPACT_HEADER_SIZE,
            body_length,
            section_type,
        })
    }

    /// Extended 8-byte header.
    pub fn extended(body_length: u32, section_type: SectionType) -> Self {
        Self {
            header_length: EXTENDED_HEADER_SIZE,
            body_length,
            section_type,
        }
    }

    /// Decode the header at the start of `buf`.
    ///
    /// The whole section (header and body) must lie within `buf`.
    pub fn decode(buf: &[u8]) -> std::result::Result<Self, SectionError> {
        decode_at(buf, 0)
    }

    /// Header size in bytes: 4 or 8.
    pub fn header_length(&self) -> usize {
        self.header_length
    }

    pub fn body_length(&self) -> u32 {
        self.body_length
    }

    pub fn section_type(&self) -> SectionType {
        self.section_type
    }

    pub fn is_extended(&self) -> bool {
        self.header_length == EXTENDED_HEADER_SIZE
    }

    /// Header plus body, in bytes.
    pub fn section_length(&self) -> u64 {
        self.header_length as u64 + u64::from(self.body_length)
    }

    /// Append the encoded header to `dst`.
    ///
    /// Panics if `dst` has less than [`header_length`](Self::header_length)
    /// bytes of remaining capacity; use [`encode_into`](Self::encode_into) for
    /// fixed buffers.
    pub fn put<B: BufMut>(&self, dst: &mut B) {
        if self.is_extended() {
            dst.put_uint_le(0, 3);
            dst.put_u8(self.section_type.as_u8());
            dst.put_u32_le(self.body_length);
        } else {
            dst.put_uint_le(u64::from(self.body_length), 3);
            dst.put_u8(self.section_type.as_u8());
        }
    }

    /// Write the header to the start of `out`, returning the bytes written.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        if out.len() < self.header_length {
            return Err(ImageError::BufferTooSmall {
                needed: self.header_length,
                available: out.len(),
            });
        }
        let mut dst = &mut out[..self.header_length];
        self.put(&mut dst);
        Ok(self.header_length)
    }
}

/// One section within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Offset of the section header from the start of the walked buffer.
    pub offset: usize,
    pub header: SectionHeader,
    /// Header and body.
    pub bytes: &'a [u8],
}

impl<'a> Section<'a> {
    pub fn section_type(&self) -> SectionType {
        self.header.section_type()
    }

    pub fn body(&self) -> &'a [u8] {
        &self.bytes[self.header.header_length()..]
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }
}

/// Iterates the sections in a buffer.
///
/// Stops at the end of the buffer. After the first malformed header the error
/// is yielded once and iteration ends.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Sections<'a> {
    /// Walk `data` from its first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Self::starting_at(data, 0)
    }

    /// Walk `data` from `offset`. Reported offsets stay relative to `data`.
    pub fn starting_at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            pos: offset,
            done: false,
        }
    }

    /// Bytes not yet walked.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = std::result::Result<Section<'a>, SectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining() == 0 {
            return None;
        }

        match decode_at(self.data, self.pos) {
            Ok(header) => {
                // decode_at has checked the section fits, so this cannot truncate.
                let end = self.pos + header.section_length() as usize;
                let section = Section {
                    offset: self.pos,
                    header,
                    bytes: &self.data[self.pos..end],
                };
                trace!(
                    offset = self.pos,
                    section_type = %header.section_type(),
                    header_length = header.header_length(),
                    body_length = header.body_length(),
                    "section"
                );
                self.pos = end;
                Some(Ok(section))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Sections<'_> {}

fn decode_at(data: &[u8], offset: usize) -> std::result::Result<SectionHeader, SectionError> {
    let buf = data.get(offset..).unwrap_or(&[]);

    if buf.len() < COMPACT_HEADER_SIZE {
        return Err(SectionError::Truncated {
            needed: COMPACT_HEADER_SIZE,
            available: buf.len(),
        });
    }

    let mut header_length = COMPACT_HEADER_SIZE;
    let mut body_length = read_u24_le(buf);
    if body_length == 0 {
        if buf.len() < EXTENDED_HEADER_SIZE {
            return Err(SectionError::Truncated {
                needed: EXTENDED_HEADER_SIZE,
                available: buf.len(),
            });
        }
        body_length = read_u32_le(&buf[4..]);
        header_length = EXTENDED_HEADER_SIZE;
    }

    let header = SectionHeader {
        header_length,
        body_length,
        section_type: SectionType(buf[3]),
    };

    let section_end = header.section_length();
    if section_end > buf.len() as u64 {
        return Err(SectionError::Overrun {
            offset,
            section_end: offset as u64 + section_end,
            available: data.len(),
        });
    }

    Ok(header)
}

// Little-endian regardless of host order. Callers check the length.
fn read_u24_le(buf: &[u8]) -> u32 {
    u32::from(buf[0]) | u32::from(buf[1]) << 8 | u32::from(buf[2]) << 16
}

pub(crate) fn read_u32_le(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}
