//! Section type tags.
//!
//! A frame section's type byte carries the compressor in its high nibble and
//! the pixel format in its low nibble. Two whole-byte values are reserved for
//! the dimensions section and the multiple-images wrapper.

use std::fmt;

/// Tag of the section holding width and height.
pub const DIMENSIONS: u8 = 0x05;

/// Tag of a section wrapping multiple images.
pub const MULTIPLE_IMAGES: u8 = 0x0D;

/// Compressor applied to a frame section's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Compressor {
    None = 0xA,
    Snappy = 0xB,
    Complex = 0xC,
}

impl Compressor {
    pub const ALL: [Compressor; 3] = [Compressor::None, Compressor::Snappy, Compressor::Complex];

    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0xA => Some(Compressor::None),
            0xB => Some(Compressor::Snappy),
            0xC => Some(Compressor::Complex),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Compressor::None => "none",
            Compressor::Snappy => "snappy",
            Compressor::Complex => "complex",
        }
    }
}

/// Texture format of a frame section's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    RgbDxt1 = 0xB,
    RgbaDxt5 = 0xE,
    YCoCgDxt5 = 0xF,
    AlphaRgtc1 = 0x1,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::RgbDxt1,
        PixelFormat::RgbaDxt5,
        PixelFormat::YCoCgDxt5,
        PixelFormat::AlphaRgtc1,
    ];

    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0xB => Some(PixelFormat::RgbDxt1),
            0xE => Some(PixelFormat::RgbaDxt5),
            0xF => Some(PixelFormat::YCoCgDxt5),
            0x1 => Some(PixelFormat::AlphaRgtc1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::RgbDxt1 => "RGB DXT1",
            PixelFormat::RgbaDxt5 => "RGBA DXT5",
            PixelFormat::YCoCgDxt5 => "YCoCg DXT5",
            PixelFormat::AlphaRgtc1 => "Alpha RGTC1",
        }
    }
}

/// An 8-bit section type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionType(pub u8);

impl SectionType {
    pub const DIMENSIONS: SectionType = SectionType(DIMENSIONS);
    pub const MULTIPLE_IMAGES: SectionType = SectionType(MULTIPLE_IMAGES);

    /// Tag for a frame section with the given compressor and pixel format.
    pub const fn frame(compressor: Compressor, format: PixelFormat) -> Self {
        SectionType(((compressor as u8) << 4) | format as u8)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Compressor named by the high nibble, if it is a known one.
    pub fn compressor(self) -> Option<Compressor> {
        Compressor::from_nibble(self.0 >> 4)
    }

    /// Pixel format named by the low nibble, if it is a known one.
    pub fn pixel_format(self) -> Option<PixelFormat> {
        PixelFormat::from_nibble(self.0 & 0x0F)
    }

    pub fn is_dimensions(self) -> bool {
        self.0 == DIMENSIONS
    }

    pub fn is_multiple_images(self) -> bool {
        self.0 == MULTIPLE_IMAGES
    }

    /// Returns true for sections that hold an image: an encoded frame or a
    /// multiple-images wrapper.
    pub fn is_top_level(self) -> bool {
        is_top_level(self.0)
    }

    /// Returns a human-readable name for the tag.
    pub fn name(self) -> &'static str {
        if self.is_dimensions() {
            return "DIMENSIONS";
        }
        if self.is_multiple_images() {
            return "MULTIPLE_IMAGES";
        }
        match (self.compressor(), self.pixel_format()) {
            (Some(_), Some(_)) => "FRAME",
            _ => "UNKNOWN",
        }
    }
}

impl From<u8> for SectionType {
    fn from(value: u8) -> Self {
        SectionType(value)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.compressor(), self.pixel_format()) {
            (Some(c), Some(p)) => {
                write!(f, "0x{:02X} (FRAME {}, {})", self.0, p.name(), c.name())
            }
            _ => write!(f, "0x{:02X} ({})", self.0, self.name()),
        }
    }
}

/// Returns true if `section_type` tags a top-level section.
///
/// Defined for every byte value.
pub fn is_top_level(section_type: u8) -> bool {
    if section_type == MULTIPLE_IMAGES {
        return true;
    }
    Compressor::from_nibble(section_type >> 4).is_some()
        && PixelFormat::from_nibble(section_type & 0x0F).is_some()
}
