#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapImageResult {
    Ok = 0,
    BadArguments = 1,
    BufferTooSmall = 2,
    BadImage = 3,
    Internal = 4,
}

#[allow(dead_code)]
pub const HAPIMAGE_OK: HapImageResult = HapImageResult::Ok;
#[allow(dead_code)]
pub const HAPIMAGE_ERR_BAD_ARGUMENTS: HapImageResult = HapImageResult::BadArguments;
#[allow(dead_code)]
pub const HAPIMAGE_ERR_BUFFER_TOO_SMALL: HapImageResult = HapImageResult::BufferTooSmall;
#[allow(dead_code)]
pub const HAPIMAGE_ERR_BAD_IMAGE: HapImageResult = HapImageResult::BadImage;
#[allow(dead_code)]
pub const HAPIMAGE_ERR_INTERNAL: HapImageResult = HapImageResult::Internal;

/// Bytes written by `hapimage_write`.
pub const HAPIMAGE_HEADER_SIZE: usize = hapimage::IMAGE_HEADER_SIZE;
