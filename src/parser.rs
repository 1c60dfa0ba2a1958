//! Configurable validate-then-parse entry point

use crate::address::Address;
use crate::error::{EmailError, Result};
use crate::grammar;
use log::debug;

/// Builder for [`AddressParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressParserBuilder {
    max_length: Option<usize>,
}

impl AddressParserBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inputs longer than `max` bytes
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Accept inputs of any length (the default)
    pub fn unbounded(mut self) -> Self {
        self.max_length = None;
        self
    }

    /// Build the AddressParser
    pub fn build(self) -> AddressParser {
        AddressParser {
            max_length: self.max_length,
        }
    }
}

/// Validates raw input and turns it into an [`Address`]
///
/// ```rust
/// use emailtype::{AddressParser, EmailError};
///
/// let parser = AddressParser::builder().max_length(16).build();
/// assert_eq!(parser.parse("Ann@Mail.com")?.to_string(), "ann@mail.com");
/// assert!(matches!(
///     parser.parse("someone.long@example.com"),
///     Err(EmailError::LengthExceeded { length: 24, max: 16 })
/// ));
/// # Ok::<(), EmailError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressParser {
    max_length: Option<usize>,
}

impl AddressParser {
    /// Parser with no length limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AddressParserBuilder {
        AddressParserBuilder::new()
    }

    /// Configured length limit, if any
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Check length and grammar, then canonicalize
    pub fn parse(&self, raw: &str) -> Result<Address> {
        if let Some(max) = self.max_length {
            if raw.len() > max {
                debug!("rejected email input: {} bytes exceeds {}", raw.len(), max);
                return Err(EmailError::LengthExceeded {
                    length: raw.len(),
                    max,
                });
            }
        }

        if let Err(violation) = grammar::check(raw) {
            debug!("rejected email input: rule {}: {}", violation.rule(), violation);
            return Err(violation.into());
        }

        Address::parse(raw)
    }

    /// Like [`parse`](Self::parse) but for bytes that may not be UTF-8
    pub fn parse_bytes(&self, raw: &[u8]) -> Result<Address> {
        if let Some(max) = self.max_length {
            if raw.len() > max {
                return Err(EmailError::LengthExceeded {
                    length: raw.len(),
                    max,
                });
            }
        }

        // Grammar first so non-ASCII is reported as a rule violation
        grammar::check_bytes(raw)?;
        let raw = std::str::from_utf8(raw)
            .map_err(|e| EmailError::Format(format!("invalid UTF-8: {}", e)))?;
        Address::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Part, SyntaxViolation};

    #[test]
    fn test_builder() {
        let parser = AddressParser::builder().max_length(256).build();
        assert_eq!(parser.max_length(), Some(256));

        let parser = AddressParser::builder().max_length(10).unbounded().build();
        assert_eq!(parser.max_length(), None);
        assert_eq!(AddressParser::new().max_length(), None);
    }

    #[test]
    fn test_length_checked_before_grammar() {
        let parser = AddressParser::builder().max_length(4).build();
        assert_eq!(
            parser.parse("@@@@@"),
            Err(EmailError::LengthExceeded { length: 5, max: 4 })
        );
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let parser = AddressParser::builder().max_length(5).build();
        assert!(parser.parse("a@b.c").is_ok());
    }

    #[test]
    fn test_unbounded_accepts_long_input() {
        let local = "a".repeat(10_000);
        let raw = format!("{}@example.com", local);
        let address = AddressParser::new().parse(&raw).unwrap();
        assert_eq!(address.local().len(), 10_000);
    }

    #[test]
    fn test_parse_reports_rule() {
        assert_eq!(
            AddressParser::new().parse("haha@1bc.com"),
            Err(EmailError::Syntax(SyntaxViolation::WordStart {
                part: Part::Domain,
                position: 5,
            }))
        );
    }

    #[test]
    fn test_parse_bytes() {
        let parser = AddressParser::new();
        assert_eq!(
            parser.parse_bytes(b"Ann@Mail.com").unwrap().to_string(),
            "ann@mail.com"
        );
        assert_eq!(
            parser.parse_bytes(b"a\xffb@mail.com"),
            Err(EmailError::Syntax(SyntaxViolation::NonAscii { position: 1 }))
        );
    }
}
