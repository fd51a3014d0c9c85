use std::ops::Range;

use tracing::debug;

use crate::error::{BadImage, Result};
use crate::section::{read_u32_le, Section, Sections, SIGNATURE};
use crate::section_type::SectionType;

/// Size of a dimensions section body: width (4) + height (4).
pub const DIMENSIONS_BODY_SIZE: usize = 8;

/// A parsed Hap Image header.
///
/// `frame` borrows the input and covers the whole frame section, header
/// included, ready to be handed to a Hap frame decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader<'a> {
    pub width: u32,
    pub height: u32,
    pub frame: &'a [u8],
    /// Offset of `frame` from the start of the input.
    pub frame_offset: usize,
    pub frame_type: SectionType,
}

impl ImageHeader<'_> {
    /// Position of the frame section within the input.
    pub fn frame_range(&self) -> Range<usize> {
        self.frame_offset..self.frame_offset + self.frame.len()
    }
}

/// Parse the header of a Hap Image.
///
/// Sections following the signature are walked in order. The first
/// dimensions section and the first top-level section win; sections of any
/// other type are skipped. Walking stops as soon as both are found.
pub fn read_image_header(input: &[u8]) -> Result<ImageHeader<'_>> {
    if input.len() < SIGNATURE.len() || input[..SIGNATURE.len()] != SIGNATURE {
        return Err(BadImage::InvalidSignature.into());
    }

    let mut dimensions: Option<Section<'_>> = None;
    let mut frame: Option<Section<'_>> = None;

    for section in Sections::starting_at(input, SIGNATURE.len()) {
        let section = section?;
        let section_type = section.section_type();

        if section_type.is_dimensions() {
            if dimensions.is_none() {
                dimensions = Some(section);
            } else {
                debug!(offset = section.offset, "ignoring duplicate dimensions section");
            }
        } else if section_type.is_top_level() {
            if frame.is_none() {
                frame = Some(section);
            } else {
                debug!(offset = section.offset, "ignoring additional frame section");
            }
        }

        if dimensions.is_some() && frame.is_some() {
            break;
        }
    }

    let Some(dimensions) = dimensions else {
        debug!(input_len = input.len(), "no dimensions section");
        return Err(BadImage::MissingDimensions.into());
    };
    let Some(frame) = frame else {
        debug!(input_len = input.len(), "no frame section");
        return Err(BadImage::MissingFrame.into());
    };

    let body = dimensions.body();
    if body.len() < DIMENSIONS_BODY_SIZE {
        return Err(BadImage::DimensionsTooShort { length: body.len() }.into());
    }

    let header = ImageHeader {
        width: read_u32_le(&body[0..4]),
        height: read_u32_le(&body[4..8]),
        frame: frame.bytes,
        frame_offset: frame.offset,
        frame_type: frame.section_type(),
    };
    debug!(
        width = header.width,
        height = header.height,
        frame_offset = header.frame_offset,
        frame_len = header.frame.len(),
        frame_type = %header.frame_type,
        "read image header"
    );
    Ok(header)
}
