//! Canonical email address value type
//!
//! An [`Address`] is the lowercase `local` and `domain` halves of a validated
//! address. Canonicalization happens once, when the value is built, so every
//! comparison below is a plain byte comparison.
//!
//! Ordering is domain first, then local part. [`Address::compare`] is the
//! single source of truth; every relational predicate is derived from it, and
//! the `Ord` impl agrees with it.
//!
//! ```rust
//! use emailtype::Address;
//!
//! let a: Address = "z@a.com".parse()?;
//! let b: Address = "a@b.com".parse()?;
//! assert!(a < b);
//! assert!(!a.same_domain(&b));
//! assert_eq!("Foo@Bar.com".parse::<Address>()?, "foo@bar.com".parse::<Address>()?);
//! # Ok::<(), emailtype::EmailError>(())
//! ```

use crate::error::{EmailError, Result};
use crate::parser::AddressParser;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use xxhash_rust::xxh64::Xxh64;

/// Seed for [`Address::hash_value`]; changing it invalidates host hash indexes
pub const HASH_SEED: u64 = 0;

/// Email address in canonical (lowercase) form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    local: String,
    domain: String,
}

impl Address {
    /// Validate and canonicalize `raw`
    pub fn new(raw: &str) -> Result<Self> {
        AddressParser::new().parse(raw)
    }

    /// Split and canonicalize input that has already been validated
    ///
    /// No grammar rules are checked here. Input without an `@` or with an
    /// empty side is reported as [`EmailError::Precondition`]; anything else
    /// that would fail validation produces an address that does not satisfy
    /// the grammar.
    pub fn parse(raw: &str) -> Result<Self> {
        let at = memchr::memchr(b'@', raw.as_bytes()).ok_or_else(|| {
            EmailError::Precondition(format!("no '@' in \"{}\"", raw))
        })?;

        let (local, domain) = (&raw[..at], &raw[at + 1..]);
        if local.is_empty() || domain.is_empty() {
            return Err(EmailError::Precondition(format!(
                "empty local part or domain in \"{}\"",
                raw
            )));
        }

        Ok(Self {
            local: local.to_ascii_lowercase(),
            domain: domain.to_ascii_lowercase(),
        })
    }

    /// Local part (before the `@`)
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Domain part (after the `@`)
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Canonical `local@domain` rendering
    pub fn canonical(&self) -> String {
        let mut out = String::with_capacity(self.local.len() + 1 + self.domain.len());
        out.push_str(&self.local);
        out.push('@');
        out.push_str(&self.domain);
        out
    }

    /// Three-way comparison: `-1`, `0` or `1`
    pub fn compare(&self, other: &Self) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Same local part and domain
    pub fn equals(&self, other: &Self) -> bool {
        self.compare(other) == 0
    }

    /// Negation of [`equals`](Self::equals)
    pub fn not_equals(&self, other: &Self) -> bool {
        !self.equals(other)
    }

    /// Sorts strictly before `other`
    pub fn less_than(&self, other: &Self) -> bool {
        self.compare(other) < 0
    }

    /// Sorts before or equal to `other`
    pub fn less_or_equal(&self, other: &Self) -> bool {
        !self.greater_than(other)
    }

    /// Sorts strictly after `other`
    pub fn greater_than(&self, other: &Self) -> bool {
        self.compare(other) > 0
    }

    /// Sorts after or equal to `other`
    pub fn greater_or_equal(&self, other: &Self) -> bool {
        !self.less_than(other)
    }

    /// Both addresses share a domain
    pub fn same_domain(&self, other: &Self) -> bool {
        self.domain == other.domain
    }

    /// Negation of [`same_domain`](Self::same_domain)
    pub fn not_same_domain(&self, other: &Self) -> bool {
        !self.same_domain(other)
    }

    /// XXH64 of the canonical form
    ///
    /// Stable across processes and platforms, so it can back a persistent
    /// hash index. Equal addresses always hash equally.
    pub fn hash_value(&self) -> u64 {
        let mut hasher = Xxh64::new(HASH_SEED);
        hasher.update(self.local.as_bytes());
        hasher.update(b"@");
        hasher.update(self.domain.as_bytes());
        hasher.digest()
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.domain
            .as_bytes()
            .cmp(other.domain.as_bytes())
            .then_with(|| self.local.as_bytes().cmp(other.local.as_bytes()))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl FromStr for Address {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self> {
        Address::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self> {
        Address::new(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.canonical()
    }
}
