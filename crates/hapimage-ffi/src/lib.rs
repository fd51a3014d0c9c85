//! hapimage-ffi: C-ABI exports for the Hap Image header reader and writer.

mod error;
mod image;
mod types;

use std::panic::AssertUnwindSafe;

pub use image::{hapimage_read, hapimage_write};
pub use types::{
    HapImageResult, HAPIMAGE_ERR_BAD_ARGUMENTS, HAPIMAGE_ERR_BAD_IMAGE,
    HAPIMAGE_ERR_BUFFER_TOO_SMALL, HAPIMAGE_ERR_INTERNAL, HAPIMAGE_HEADER_SIZE, HAPIMAGE_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

/// Reset the calling thread's last error message.
#[no_mangle]
pub extern "C" fn hapimage_clear_error() {
    ffi_boundary((), error::clear_error_state);
}

/// Message describing the last failure on the calling thread.
///
/// The pointer stays valid until the next `hapimage_*` call on this thread.
/// Empty when the last call succeeded.
#[no_mangle]
pub extern "C" fn hapimage_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    #[test]
    fn last_error_starts_empty() {
        hapimage_clear_error();
        let ptr = hapimage_last_error();
        assert!(!ptr.is_null());

        // SAFETY: hapimage_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(ptr).to_str().unwrap() };
        assert!(text.is_empty());
    }

    #[test]
    fn failed_call_sets_last_error() {
        let mut buf = [0u8; 4];
        let mut used = 0usize;
        // SAFETY: buf is writable for its full length.
        let result = unsafe { hapimage_write(1, 1, buf.as_mut_ptr(), buf.len(), &mut used) };
        assert_eq!(result, HAPIMAGE_ERR_BUFFER_TOO_SMALL);

        // SAFETY: hapimage_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(hapimage_last_error()).to_str().unwrap() };
        assert_eq!(text, "buffer too small (4 bytes, need 16)");
    }
}
