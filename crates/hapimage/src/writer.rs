use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::error::{ImageError, Result};
use crate::reader::DIMENSIONS_BODY_SIZE;
use crate::section::{SectionHeader, COMPACT_HEADER_SIZE, SIGNATURE};
use crate::section_type::SectionType;

/// Bytes produced by [`write_image_header`]: signature (4) + dimensions
/// section header (4) + width (4) + height (4).
///
/// Readers must not assume headers from other producers have this length.
pub const IMAGE_HEADER_SIZE: usize = SIGNATURE.len() + COMPACT_HEADER_SIZE + DIMENSIONS_BODY_SIZE;

/// Write a Hap Image header to the start of `out`.
///
/// The header must be followed immediately by a frame section produced by a
/// Hap frame encoder. Returns the number of bytes written. If `out` is too
/// small nothing is written.
pub fn write_image_header(width: u32, height: u32, out: &mut [u8]) -> Result<usize> {
    if out.len() < IMAGE_HEADER_SIZE {
        return Err(ImageError::BufferTooSmall {
            needed: IMAGE_HEADER_SIZE,
            available: out.len(),
        });
    }

    let mut dst = &mut out[..IMAGE_HEADER_SIZE];
    put_image_header(width, height, &mut dst);
    debug!(width, height, "wrote image header");
    Ok(IMAGE_HEADER_SIZE)
}

/// Append a Hap Image header to `dst`.
pub fn encode_image_header(width: u32, height: u32, dst: &mut BytesMut) {
    dst.reserve(IMAGE_HEADER_SIZE);
    put_image_header(width, height, dst);
}

fn put_image_header<B: BufMut>(width: u32, height: u32, dst: &mut B) {
    dst.put_slice(&SIGNATURE);
    // Compact form is always valid for an 8-byte body.
    SectionHeader::for_body(DIMENSIONS_BODY_SIZE as u32, SectionType::DIMENSIONS).put(dst);
    dst.put_u32_le(width);
    dst.put_u32_le(height);
}
