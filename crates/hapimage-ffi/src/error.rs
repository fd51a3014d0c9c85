use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use hapimage::{ErrorKind, ImageError};

use crate::types::HapImageResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let message = message.into();
    let sanitized = message.replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_bad_arguments(message: impl Into<String>) -> HapImageResult {
    set_error_message(message);
    HapImageResult::BadArguments
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_image_error(err: &ImageError) -> HapImageResult {
    set_error_message(err.to_string());
    match err.kind() {
        ErrorKind::InvalidArguments => HapImageResult::BadArguments,
        ErrorKind::BufferTooSmall => HapImageResult::BufferTooSmall,
        ErrorKind::BadImage => HapImageResult::BadImage,
        ErrorKind::Internal => {
            tracing::error!(error = %err, "internal error in hapimage");
            HapImageResult::Internal
        }
    }
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
