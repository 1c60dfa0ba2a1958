//! emailtype - Email Address Value Type for Database Hosts
//!
//! emailtype provides an email address value type with a strict, word-based
//! grammar, lowercase canonicalization and a total order suitable for sorting
//! and indexing. A stable C ABI lets a database host register it as a custom
//! column type with text and binary I/O, comparison operators and hashing.
//!
//! # Quick Start
//!
//! ```rust
//! use emailtype::{grammar, Address};
//!
//! // Validate without building anything
//! assert!(grammar::validate("Jane.Doe@Example.com"));
//! assert!(!grammar::validate("jane..doe@example.com"));
//!
//! // Parse into canonical form
//! let jane: Address = "Jane.Doe@Example.com".parse()?;
//! assert_eq!(jane.to_string(), "jane.doe@example.com");
//!
//! // Domain sorts first, then local part
//! let bob: Address = "bob@example.com".parse()?;
//! let zed: Address = "zed@alpha.org".parse()?;
//! let mut all = vec![jane.clone(), bob.clone(), zed.clone()];
//! all.sort();
//! assert_eq!(all, vec![zed, bob, jane]);
//! # Ok::<(), emailtype::EmailError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Host (C ABI: c_api)                 │
//! ├──────────────────────────────────────┤
//! │  AddressParser (length limit)        │
//! │    → grammar::check (rules 1-7)      │
//! │    → Address::parse (lowercase)      │
//! ├──────────────────────────────────────┤
//! │  Address: compare / same_domain /    │
//! │  hash_value, wire encode/decode      │
//! └──────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Canonical address value type and operators
pub mod address;
/// Error types for email operations
pub mod error;
pub mod grammar;
/// Configurable parser
pub mod parser;
pub mod wire;

// Public C API
pub mod c_api;

// Re-exports for Rust consumers
pub use crate::address::Address;
pub use crate::error::{EmailError, Result};
pub use crate::grammar::{Part, SyntaxViolation};
pub use crate::parser::{AddressParser, AddressParserBuilder};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version
pub const VERSION_MAJOR: u32 = 0;

/// Library minor version
pub const VERSION_MINOR: u32 = 1;

/// Library patch version
pub const VERSION_PATCH: u32 = 0;
