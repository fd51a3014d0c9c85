use crate::error;
use crate::types::HapImageResult;

/// Convert an input pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
unsafe fn input_arg<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        let _ = error::set_bad_arguments("input cannot be null when input_len > 0");
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Parse a Hap Image header.
///
/// On success `*width`, `*height`, `*frame` and `*frame_len` are set; `*frame`
/// points into `input` at the frame section (header included), which may be
/// passed on to a Hap frame decoder. Out-pointers are left untouched on
/// failure.
///
/// # Safety
/// If `input_len > 0`, `input` must be readable for `input_len` bytes. Every
/// out-pointer must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn hapimage_read(
    input: *const u8,
    input_len: usize,
    width: *mut u32,
    height: *mut u32,
    frame: *mut *const u8,
    frame_len: *mut usize,
) -> HapImageResult {
    crate::ffi_boundary(HapImageResult::Internal, || {
        error::clear_error_state();

        if width.is_null() || height.is_null() || frame.is_null() || frame_len.is_null() {
            return error::set_bad_arguments("output pointers cannot be null");
        }

        let input = {
            // SAFETY: We validate pointer/length pairing in helper.
            match unsafe { input_arg(input, input_len) } {
                Some(v) => v,
                None => return HapImageResult::BadArguments,
            }
        };

        match hapimage::read_image_header(input) {
            Ok(header) => {
                // SAFETY: All out-pointers were checked for null; validity is guaranteed by the caller.
                unsafe {
                    *width = header.width;
                    *height = header.height;
                    *frame = header.frame.as_ptr();
                    *frame_len = header.frame.len();
                }
                HapImageResult::Ok
            }
            Err(err) => error::map_image_error(&err),
        }
    })
}

/// Write a Hap Image header to `output`.
///
/// `output` must have room for at least `HAPIMAGE_HEADER_SIZE` bytes. The
/// header must be followed immediately by a frame from a Hap frame encoder.
///
/// # Safety
/// If non-null, `output` must be writable for `output_len` bytes and
/// `bytes_used` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn hapimage_write(
    width: u32,
    height: u32,
    output: *mut u8,
    output_len: usize,
    bytes_used: *mut usize,
) -> HapImageResult {
    crate::ffi_boundary(HapImageResult::Internal, || {
        error::clear_error_state();

        if output.is_null() {
            return error::set_bad_arguments("output cannot be null");
        }
        if bytes_used.is_null() {
            return error::set_bad_arguments("bytes_used cannot be null");
        }

        let output = {
            // SAFETY: Pointer is non-null; length and validity are guaranteed by the caller.
            unsafe { std::slice::from_raw_parts_mut(output, output_len) }
        };

        match hapimage::write_image_header(width, height, output) {
            Ok(used) => {
                // SAFETY: Checked for null above.
                unsafe { *bytes_used = used };
                HapImageResult::Ok
            }
            Err(err) => error::map_image_error(&err),
        }
    })
}
