//! C API for emailtype
//!
//! This module provides a stable C ABI that a database host binds its type
//! input/output, binary send/receive and operator functions to. It is a thin
//! adapter: every call converts pointers, delegates to the Rust API and maps
//! the outcome to a status code or a plain value.
//!
//! Memory returned by this API is owned by the caller and must be released
//! with the matching `email_free*` function.

use crate::address::Address;
use crate::error::EmailError;
use crate::parser::AddressParser;
use crate::wire;
use log::{debug, warn};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

pub mod operators;

// ============================================================================
// STATUS CODES
// ============================================================================

/// Success code
pub const EMAIL_SUCCESS: i32 = 0;
/// Input failed the address grammar
pub const EMAIL_ERROR_INVALID_SYNTAX: i32 = -1;
/// Input longer than EMAIL_MAX_LENGTH
pub const EMAIL_ERROR_LENGTH_EXCEEDED: i32 = -2;
/// Invalid parameter error
pub const EMAIL_ERROR_INVALID_PARAM: i32 = -3;
/// Malformed binary payload
pub const EMAIL_ERROR_INVALID_FORMAT: i32 = -4;

/// Longest canonical address the host stores, in bytes
pub const EMAIL_MAX_LENGTH: usize = 256;

// ============================================================================
// OPAQUE HANDLE
// ============================================================================

/// Opaque email value handle
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct email_t {
    _private: [u8; 0],
}

struct EmailInternal {
    address: Address,
}

impl email_t {
    fn from_address(address: Address) -> *mut Self {
        Box::into_raw(Box::new(EmailInternal { address })) as *mut Self
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<EmailInternal> {
        Box::from_raw(ptr as *mut EmailInternal)
    }

    /// # Safety
    /// Pointer must be non-NULL and come from this API
    unsafe fn as_address<'a>(ptr: *const Self) -> &'a Address {
        &(*(ptr as *const EmailInternal)).address
    }
}

fn host_parser() -> AddressParser {
    AddressParser::builder().max_length(EMAIL_MAX_LENGTH).build()
}

fn status_for(err: &EmailError) -> i32 {
    match err {
        EmailError::Syntax(_) | EmailError::Precondition(_) => EMAIL_ERROR_INVALID_SYNTAX,
        EmailError::LengthExceeded { .. } => EMAIL_ERROR_LENGTH_EXCEEDED,
        EmailError::Format(_) => EMAIL_ERROR_INVALID_FORMAT,
    }
}

// ============================================================================
// TEXT INPUT / OUTPUT
// ============================================================================

/// Parse a textual address
///
/// # Parameters
/// * `input` - Address text (null-terminated C string)
///
/// # Returns
/// * Non-null handle on success (free with email_free)
/// * NULL if `input` is NULL, too long, or not a valid address
///
/// # Safety
/// * `input` must be NULL or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn email_in(input: *const c_char) -> *mut email_t {
    let mut out: *mut email_t = ptr::null_mut();
    email_parse(input, &mut out, ptr::null_mut());
    out
}

/// Parse a textual address, reporting why it was rejected
///
/// # Parameters
/// * `input` - Address text (null-terminated C string, must not be NULL)
/// * `out` - Receives the new handle on success (must not be NULL)
/// * `error_message` - Receives a message on failure (may be NULL); free it
///   with email_free_string
///
/// # Returns
/// * EMAIL_SUCCESS (0) on success
/// * EMAIL_ERROR_INVALID_SYNTAX, EMAIL_ERROR_LENGTH_EXCEEDED or
///   EMAIL_ERROR_INVALID_PARAM on failure
///
/// # Safety
/// * `input` must be a valid null-terminated C string
/// * `out` must be a valid pointer
///
/// # Example
/// ```c
/// email_t *email = NULL;
/// char *error = NULL;
/// if (email_parse("User@Example.com", &email, &error) != EMAIL_SUCCESS) {
///     fprintf(stderr, "%s\n", error ? error : "invalid email");
///     email_free_string(error);
///     return 1;
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn email_parse(
    input: *const c_char,
    out: *mut *mut email_t,
    error_message: *mut *mut c_char,
) -> i32 {
    if !error_message.is_null() {
        *error_message = ptr::null_mut();
    }
    if input.is_null() || out.is_null() {
        warn!("email_parse called with NULL argument");
        return EMAIL_ERROR_INVALID_PARAM;
    }
    *out = ptr::null_mut();

    let raw = CStr::from_ptr(input).to_bytes();
    match host_parser().parse_bytes(raw) {
        Ok(address) => {
            *out = email_t::from_address(address);
            EMAIL_SUCCESS
        }
        Err(err) => {
            if !error_message.is_null() {
                if let Ok(c_str) = CString::new(err.to_string()) {
                    *error_message = c_str.into_raw();
                }
            }
            status_for(&err)
        }
    }
}

/// Render the canonical `local@domain` text
///
/// # Returns
/// * Newly allocated string (free with email_free_string)
/// * NULL if `email` is NULL
///
/// # Safety
/// * `email` must be NULL or a handle from this API
#[no_mangle]
pub unsafe extern "C" fn email_out(email: *const email_t) -> *mut c_char {
    if email.is_null() {
        warn!("email_out called with NULL handle");
        return ptr::null_mut();
    }

    // Validated input never contains NUL
    match CString::new(email_t::as_address(email).canonical()) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a handle
///
/// # Safety
/// * `email` must be NULL or a handle from this API
/// * Must not be called twice on the same handle
#[no_mangle]
pub unsafe extern "C" fn email_free(email: *mut email_t) {
    if !email.is_null() {
        drop(email_t::into_internal(email));
    }
}

/// Free a string returned by this API
///
/// # Safety
/// * `string` must be NULL or a pointer returned by this API
/// * Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn email_free_string(string: *mut c_char) {
    if !string.is_null() {
        drop(CString::from_raw(string));
    }
}

// ============================================================================
// BINARY SEND / RECEIVE
// ============================================================================

/// Encode a value for binary transmission
///
/// # Parameters
/// * `email` - Handle (must not be NULL)
/// * `size` - Receives the payload length (must not be NULL)
///
/// # Returns
/// * Newly allocated payload (free with email_free_bytes and the same size)
/// * NULL on invalid parameters
///
/// # Safety
/// * `email` must be a handle from this API
/// * `size` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn email_send(email: *const email_t, size: *mut usize) -> *mut u8 {
    if email.is_null() || size.is_null() {
        if !size.is_null() {
            *size = 0;
        }
        warn!("email_send called with NULL argument");
        return ptr::null_mut();
    }

    match wire::encode(email_t::as_address(email)) {
        Ok(bytes) => {
            let boxed = bytes.into_boxed_slice();
            *size = boxed.len();
            Box::into_raw(boxed) as *mut u8
        }
        Err(err) => {
            debug!("email_send failed: {}", err);
            *size = 0;
            ptr::null_mut()
        }
    }
}

/// Free a payload returned by email_send
///
/// # Safety
/// * `bytes` must be NULL or a pointer returned by email_send
/// * `size` must be the length email_send reported for it
#[no_mangle]
pub unsafe extern "C" fn email_free_bytes(bytes: *mut u8, size: usize) {
    if !bytes.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(bytes, size)));
    }
}

/// Decode a binary payload
///
/// # Returns
/// * Non-null handle on success (free with email_free)
/// * NULL if the payload is malformed, invalid, or longer than EMAIL_MAX_LENGTH
///
/// # Safety
/// * `buffer` must be valid for reads of `size` bytes
#[no_mangle]
pub unsafe extern "C" fn email_recv(buffer: *const u8, size: usize) -> *mut email_t {
    if buffer.is_null() {
        warn!("email_recv called with NULL buffer");
        return ptr::null_mut();
    }

    let bytes = slice::from_raw_parts(buffer, size);
    match wire::decode(bytes) {
        Ok(address) => {
            let length = address.local().len() + 1 + address.domain().len();
            if length > EMAIL_MAX_LENGTH {
                debug!("email_recv rejected {} byte address", length);
                return ptr::null_mut();
            }
            email_t::from_address(address)
        }
        Err(err) => {
            debug!("email_recv rejected payload: {}", err);
            ptr::null_mut()
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check whether a string is a valid address
///
/// Length is not limited here; only the grammar is checked.
///
/// # Safety
/// * `input` must be NULL or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn email_validate(input: *const c_char) -> bool {
    !input.is_null() && crate::grammar::check_bytes(CStr::from_ptr(input).to_bytes()).is_ok()
}

/// Report which grammar rule a string breaks
///
/// # Returns
/// * 0 if the string is valid
/// * Rule number 1-7 of the first violated rule
/// * EMAIL_ERROR_INVALID_PARAM if `input` is NULL
///
/// # Safety
/// * `input` must be NULL or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn email_check(input: *const c_char) -> i32 {
    if input.is_null() {
        return EMAIL_ERROR_INVALID_PARAM;
    }

    match crate::grammar::check_bytes(CStr::from_ptr(input).to_bytes()) {
        Ok(()) => 0,
        Err(violation) => i32::from(violation.rule()),
    }
}

/// Get library version string
///
/// # Returns
/// * Version string (e.g., "0.1.0")
/// * Pointer is valid for program lifetime, do not free
#[no_mangle]
pub extern "C" fn email_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
