//! Reader and writer for the Hap Image container header.
//!
//! A Hap Image is a 4-byte signature followed by length-prefixed, typed
//! sections:
//! - a dimensions section holding width and height
//! - a top-level section holding one Hap frame (or a multiple-images wrapper)
//!
//! Reading locates both without copying; the frame is returned as a slice of
//! the input for a Hap frame decoder. Writing produces the signature and the
//! dimensions section; the caller appends an encoded frame.
//!
//! [`read_image_header`] and [`write_image_header`] work on caller-owned
//! buffers and never allocate. No function here performs I/O or looks at
//! pixel data.

pub mod error;
pub mod reader;
pub mod section;
pub mod section_type;
pub mod writer;

pub use error::{BadImage, ErrorKind, ImageError, Result, SectionError};
pub use reader::{read_image_header, ImageHeader, DIMENSIONS_BODY_SIZE};
pub use section::{
    Section, SectionHeader, Sections, COMPACT_HEADER_SIZE, EXTENDED_HEADER_SIZE,
    MAX_COMPACT_BODY, SIGNATURE,
};
pub use section_type::{is_top_level, Compressor, PixelFormat, SectionType};
pub use writer::{encode_image_header, write_image_header, IMAGE_HEADER_SIZE};
