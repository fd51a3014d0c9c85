/// Errors produced while decoding a single section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Fewer bytes remain than the header itself needs.
    #[error("truncated section header (need {needed} bytes, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// The header is complete but its body runs past the end of the buffer.
    #[error("section at offset {offset} ends at {section_end}, past the end of the buffer ({available} bytes)")]
    Overrun {
        offset: usize,
        section_end: u64,
        available: usize,
    },

    /// A body length that cannot be expressed by the requested header form.
    #[error("section body length {length} does not fit a {header_length}-byte header")]
    LengthOutOfRange { length: u64, header_length: usize },
}

/// Why an input was rejected as a Hap Image.
///
/// All of these are the same [`ErrorKind::BadImage`]; the variants only carry
/// detail for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BadImage {
    /// The first four bytes are not `88 48 61 70`.
    #[error("missing Hap Image signature")]
    InvalidSignature,

    #[error(transparent)]
    Section(#[from] SectionError),

    /// The dimensions section body cannot hold a width and a height.
    #[error("dimensions section body is {length} bytes, expected at least 8")]
    DimensionsTooShort { length: usize },

    #[error("no dimensions section found")]
    MissingDimensions,

    #[error("no frame section found")]
    MissingFrame,
}

/// Errors returned by the image reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// A required argument was absent.
    #[error("invalid arguments: {0}")]
    InvalidArguments(&'static str),

    /// The output buffer cannot hold the header. Nothing was written.
    #[error("buffer too small ({available} bytes, need {needed})")]
    BufferTooSmall { needed: usize, available: usize },

    /// The input is not a well-formed Hap Image.
    #[error("bad image: {0}")]
    BadImage(#[from] BadImage),

    /// An unreachable state was reached. Always a defect in this crate.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Coarse classification of an [`ImageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArguments,
    BufferTooSmall,
    BadImage,
    Internal,
}

impl ImageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            ImageError::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            ImageError::BadImage(_) => ErrorKind::BadImage,
            ImageError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<SectionError> for ImageError {
    fn from(err: SectionError) -> Self {
        ImageError::BadImage(BadImage::Section(err))
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
