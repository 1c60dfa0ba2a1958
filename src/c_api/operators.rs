//! Comparison operators for host operator classes
//!
//! B-tree support binds `email_cmp` and the five relational predicates, hash
//! indexes bind `email_eq` and `email_hash`. `email_sd`/`email_nsd` are the
//! same-domain operators.
//!
//! A NULL handle is a caller bug. It is logged, predicates answer `false`
//! and `email_cmp`/`email_hash` answer `0`.

use super::email_t;
use crate::address::Address;
use log::warn;

/// Borrow both operands, or `None` if either is NULL
unsafe fn operands<'a>(
    name: &str,
    a: *const email_t,
    b: *const email_t,
) -> Option<(&'a Address, &'a Address)> {
    if a.is_null() || b.is_null() {
        warn!("{} called with NULL handle", name);
        return None;
    }
    Some((email_t::as_address(a), email_t::as_address(b)))
}

unsafe fn predicate(
    name: &str,
    a: *const email_t,
    b: *const email_t,
    op: fn(&Address, &Address) -> bool,
) -> bool {
    operands(name, a, b).is_some_and(|(a, b)| op(a, b))
}

/// `a = b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_eq(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_eq", a, b, Address::equals)
}

/// `a <> b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_neq(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_neq", a, b, Address::not_equals)
}

/// `a < b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_lt(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_lt", a, b, Address::less_than)
}

/// `a <= b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_le(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_le", a, b, Address::less_or_equal)
}

/// `a > b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_gt(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_gt", a, b, Address::greater_than)
}

/// `a >= b`
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_ge(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_ge", a, b, Address::greater_or_equal)
}

/// Same domain
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_sd(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_sd", a, b, Address::same_domain)
}

/// Different domain
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_nsd(a: *const email_t, b: *const email_t) -> bool {
    predicate("email_nsd", a, b, Address::not_same_domain)
}

/// Three-way comparison: -1, 0 or 1 (domain first, then local part)
///
/// # Safety
/// * `a` and `b` must be NULL or handles from this API
#[no_mangle]
pub unsafe extern "C" fn email_cmp(a: *const email_t, b: *const email_t) -> i32 {
    operands("email_cmp", a, b).map_or(0, |(a, b)| a.compare(b))
}

/// Stable 64-bit hash of the canonical form
///
/// # Safety
/// * `email` must be NULL or a handle from this API
#[no_mangle]
pub unsafe extern "C" fn email_hash(email: *const email_t) -> u64 {
    if email.is_null() {
        warn!("email_hash called with NULL handle");
        return 0;
    }
    email_t::as_address(email).hash_value()
}
