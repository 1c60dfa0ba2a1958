//! Tests for the C ABI host adapter
//!
//! These call the exported functions the way a host would: NUL-terminated
//! strings in, opaque handles and caller-freed buffers out.

use emailtype::c_api::operators::*;
use emailtype::c_api::*;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

fn email(raw: &str) -> *mut email_t {
    let c = CString::new(raw).unwrap();
    let handle = unsafe { email_in(c.as_ptr()) };
    assert!(!handle.is_null(), "{} should be accepted", raw);
    handle
}

fn render(handle: *const email_t) -> String {
    unsafe {
        let out = email_out(handle);
        assert!(!out.is_null());
        let text = CStr::from_ptr(out).to_str().unwrap().to_string();
        email_free_string(out);
        text
    }
}

#[test]
fn test_in_out_canonicalizes() {
    let handle = email("Jane.Doe@Example.COM");
    assert_eq!(render(handle), "jane.doe@example.com");
    unsafe { email_free(handle) };
}

#[test]
fn test_in_rejects_invalid_and_null() {
    let bad = CString::new("haha@ad").unwrap();
    unsafe {
        assert!(email_in(bad.as_ptr()).is_null());
        assert!(email_in(ptr::null()).is_null());
    }
}

#[test]
fn test_parse_reports_status_and_message() {
    let bad = CString::new("1haha@abc.com").unwrap();
    let mut out: *mut email_t = ptr::null_mut();
    let mut message: *mut c_char = ptr::null_mut();

    let status = unsafe { email_parse(bad.as_ptr(), &mut out, &mut message) };
    assert_eq!(status, EMAIL_ERROR_INVALID_SYNTAX);
    assert!(out.is_null());
    assert!(!message.is_null());

    let text = unsafe { CStr::from_ptr(message) }.to_str().unwrap().to_string();
    assert!(text.contains("must start with a letter"), "got: {}", text);
    unsafe { email_free_string(message) };
}

#[test]
fn test_parse_enforces_host_length_limit() {
    let long = CString::new(format!("{}@mail.com", "a".repeat(EMAIL_MAX_LENGTH))).unwrap();
    let mut out: *mut email_t = ptr::null_mut();

    let status = unsafe { email_parse(long.as_ptr(), &mut out, ptr::null_mut()) };
    assert_eq!(status, EMAIL_ERROR_LENGTH_EXCEEDED);
    assert!(out.is_null());

    let status = unsafe { email_parse(ptr::null(), &mut out, ptr::null_mut()) };
    assert_eq!(status, EMAIL_ERROR_INVALID_PARAM);
}

#[test]
fn test_send_recv() {
    let handle = email("Ann@Mail.com");
    unsafe {
        let mut size = 0usize;
        let bytes = email_send(handle, &mut size);
        assert!(!bytes.is_null());
        assert_eq!(size, 9 + "ann".len() + "mail.com".len());

        let received = email_recv(bytes, size);
        assert!(!received.is_null());
        assert!(email_eq(handle, received));
        assert_eq!(render(received), "ann@mail.com");

        // Truncated payload
        assert!(email_recv(bytes, size - 1).is_null());

        email_free_bytes(bytes, size);
        email_free(received);
        email_free(handle);
    }
}

#[test]
fn test_validate_and_check() {
    let good = CString::new("a-b@c-d.com").unwrap();
    let hyphen = CString::new("abc-@def.com").unwrap();
    let two = CString::new("a@b@c.com").unwrap();
    unsafe {
        assert!(email_validate(good.as_ptr()));
        assert!(!email_validate(hyphen.as_ptr()));
        assert!(!email_validate(ptr::null()));

        assert_eq!(email_check(good.as_ptr()), 0);
        assert_eq!(email_check(hyphen.as_ptr()), 6);
        assert_eq!(email_check(two.as_ptr()), 1);
        assert_eq!(email_check(ptr::null()), EMAIL_ERROR_INVALID_PARAM);
    }
}

#[test]
fn test_operators() {
    let za = email("z@a.com");
    let ab = email("a@b.com");
    let ab_upper = email("A@B.COM");
    let cb = email("c@b.com");

    unsafe {
        assert!(email_lt(za, ab));
        assert!(email_le(za, ab));
        assert!(!email_gt(za, ab));
        assert!(!email_ge(za, ab));
        assert_eq!(email_cmp(za, ab), -1);
        assert_eq!(email_cmp(ab, za), 1);

        assert!(email_eq(ab, ab_upper));
        assert!(!email_neq(ab, ab_upper));
        assert!(email_le(ab, ab_upper) && email_ge(ab, ab_upper));
        assert_eq!(email_cmp(ab, ab_upper), 0);
        assert_eq!(email_hash(ab), email_hash(ab_upper));

        assert!(email_sd(ab, cb));
        assert!(!email_nsd(ab, cb));
        assert!(email_nsd(za, cb));

        for handle in [za, ab, ab_upper, cb] {
            email_free(handle);
        }
    }
}

#[test]
fn test_operators_with_null_handles() {
    let handle = email("ann@mail.com");
    unsafe {
        assert!(!email_eq(handle, ptr::null()));
        assert!(!email_lt(ptr::null(), handle));
        assert_eq!(email_cmp(handle, ptr::null()), 0);
        assert_eq!(email_hash(ptr::null()), 0);
        assert!(email_out(ptr::null()).is_null());
        email_free(ptr::null_mut());
        email_free(handle);
    }
}

#[test]
fn test_version() {
    let version = unsafe { CStr::from_ptr(email_version()) };
    assert_eq!(version.to_str().unwrap(), emailtype::VERSION);
}
