//! Word grammar for email addresses
//!
//! An address is accepted when it splits on a single `@` into a local part and
//! a domain part, and both parts are made of well-formed dot-separated words:
//!
//! - no empty words (no leading, trailing or doubled `.`)
//! - the local part holds at least one letter; the domain holds a `.` and at
//!   least two letters
//! - every word starts with a letter and ends with a letter or digit
//! - `-` only appears strictly inside a word
//!
//! This is deliberately not RFC 5322. Quoted local parts, comments, IP
//! literals and internationalized domains are all rejected. Characters inside
//! a word other than `.` and `-` are not constrained, as long as they are ASCII.
//!
//! # Usage
//!
//! ```rust
//! use emailtype::grammar::{check, validate, Part, SyntaxViolation};
//!
//! assert!(validate("a-b@c-d.com"));
//! assert!(!validate("haha@ad"));
//!
//! assert_eq!(
//!     check("1haha@abc.com"),
//!     Err(SyntaxViolation::WordStart { part: Part::Local, position: 0 })
//! );
//! ```
//!
//! Validation never panics and never allocates; malformed input is an
//! ordinary `false`.

use memchr::{memchr, memchr_iter};
use std::fmt;

/// Side of the `@` separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Everything before the `@`
    Local,
    /// Everything after the `@`
    Domain,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Local => f.write_str("local part"),
            Part::Domain => f.write_str("domain"),
        }
    }
}

/// First grammar rule an input failed
///
/// Positions are byte offsets into the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxViolation {
    /// Rule 1: there must be exactly one `@`
    SeparatorCount {
        /// Number of `@` characters found
        found: usize,
    },
    /// Rule 2: leading, trailing or doubled `.`
    EmptyWord {
        /// Part containing the empty word
        part: Part,
        /// Offset of the offending `.`
        position: usize,
    },
    /// Rule 3: not enough letters (or no `.` in the domain)
    TooFewWords {
        /// Part that is too short
        part: Part,
    },
    /// Rule 4: a word does not start with a letter
    WordStart {
        /// Part containing the word
        part: Part,
        /// Offset of the first character of the word
        position: usize,
    },
    /// Rule 5: a word does not end with a letter or digit
    WordEnd {
        /// Part containing the word
        part: Part,
        /// Offset of the last character of the word
        position: usize,
    },
    /// Rule 6: a `-` at the edge of a word
    HyphenPlacement {
        /// Part containing the word
        part: Part,
        /// Offset of the offending `-`
        position: usize,
    },
    /// Rule 7: NUL or a byte outside ASCII
    NonAscii {
        /// Offset of the offending byte
        position: usize,
    },
}

impl SyntaxViolation {
    /// Rule number (1-7) that was violated
    pub fn rule(&self) -> u8 {
        match self {
            SyntaxViolation::SeparatorCount { .. } => 1,
            SyntaxViolation::EmptyWord { .. } => 2,
            SyntaxViolation::TooFewWords { .. } => 3,
            SyntaxViolation::WordStart { .. } => 4,
            SyntaxViolation::WordEnd { .. } => 5,
            SyntaxViolation::HyphenPlacement { .. } => 6,
            SyntaxViolation::NonAscii { .. } => 7,
        }
    }

    /// Part the violation was found in, if it is specific to one
    pub fn part(&self) -> Option<Part> {
        match *self {
            SyntaxViolation::EmptyWord { part, .. }
            | SyntaxViolation::TooFewWords { part }
            | SyntaxViolation::WordStart { part, .. }
            | SyntaxViolation::WordEnd { part, .. }
            | SyntaxViolation::HyphenPlacement { part, .. } => Some(part),
            SyntaxViolation::SeparatorCount { .. } | SyntaxViolation::NonAscii { .. } => None,
        }
    }
}

impl fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxViolation::SeparatorCount { found } => {
                write!(f, "expected exactly one '@', found {}", found)
            }
            SyntaxViolation::EmptyWord { part, position } => {
                write!(f, "empty word in {} at offset {}", part, position)
            }
            SyntaxViolation::TooFewWords { part: Part::Local } => {
                f.write_str("local part must contain at least one letter")
            }
            SyntaxViolation::TooFewWords { part: Part::Domain } => {
                f.write_str("domain must contain a '.' and at least two letters")
            }
            SyntaxViolation::WordStart { part, position } => write!(
                f,
                "word in {} must start with a letter (offset {})",
                part, position
            ),
            SyntaxViolation::WordEnd { part, position } => write!(
                f,
                "word in {} must end with a letter or digit (offset {})",
                part, position
            ),
            SyntaxViolation::HyphenPlacement { part, position } => write!(
                f,
                "'-' at the edge of a word in {} (offset {})",
                part, position
            ),
            SyntaxViolation::NonAscii { position } => {
                write!(f, "non-ASCII or NUL byte at offset {}", position)
            }
        }
    }
}

/// Check whether `raw` is a syntactically valid address
#[inline]
pub fn validate(raw: &str) -> bool {
    check_bytes(raw.as_bytes()).is_ok()
}

/// Check `raw` and report the first rule it violates
pub fn check(raw: &str) -> Result<(), SyntaxViolation> {
    check_bytes(raw.as_bytes())
}

/// Byte-level variant of [`check`] for input that has not been decoded yet
pub fn check_bytes(raw: &[u8]) -> Result<(), SyntaxViolation> {
    if let Some(position) = raw.iter().position(|&b| b == 0 || !b.is_ascii()) {
        return Err(SyntaxViolation::NonAscii { position });
    }

    let at = find_separator(raw)?;
    check_part(&raw[..at], Part::Local, 0)?;
    check_part(&raw[at + 1..], Part::Domain, at + 1)
}

/// Offset of the single `@` in `raw`
pub(crate) fn find_separator(raw: &[u8]) -> Result<usize, SyntaxViolation> {
    let mut separators = memchr_iter(b'@', raw);
    match (separators.next(), separators.next()) {
        (Some(at), None) => Ok(at),
        (None, _) => Err(SyntaxViolation::SeparatorCount { found: 0 }),
        (Some(_), Some(_)) => Err(SyntaxViolation::SeparatorCount {
            found: 2 + separators.count(),
        }),
    }
}

/// Run rules 2-6 over one side of the separator
///
/// `offset` is where `part` starts in the raw input.
fn check_part(part: &[u8], which: Part, offset: usize) -> Result<(), SyntaxViolation> {
    check_word_count(part, which)?;
    check_empty_words(part, which, offset)?;
    check_hyphens(part, which, offset)?;
    check_word_starts(part, which, offset)?;
    check_word_ends(part, which, offset)
}

fn check_word_count(part: &[u8], which: Part) -> Result<(), SyntaxViolation> {
    let letters = part.iter().filter(|b| b.is_ascii_alphabetic()).count();
    let enough = match which {
        Part::Local => letters >= 1,
        // Dot plus two letters stands in for "two or more words"
        Part::Domain => memchr(b'.', part).is_some() && letters >= 2,
    };

    if enough {
        Ok(())
    } else {
        Err(SyntaxViolation::TooFewWords { part: which })
    }
}

fn check_empty_words(part: &[u8], which: Part, offset: usize) -> Result<(), SyntaxViolation> {
    // Non-empty once the word count check has passed
    let last = part.len() - 1;
    match words(part).find(|(_, word)| word.is_empty()) {
        Some((start, _)) => Err(SyntaxViolation::EmptyWord {
            part: which,
            position: offset + start.min(last),
        }),
        None => Ok(()),
    }
}

fn check_hyphens(part: &[u8], which: Part, offset: usize) -> Result<(), SyntaxViolation> {
    for (start, word) in words(part) {
        let end = word.len() - 1;
        if word[0] == b'-' {
            return Err(SyntaxViolation::HyphenPlacement {
                part: which,
                position: offset + start,
            });
        }
        if word[end] == b'-' {
            return Err(SyntaxViolation::HyphenPlacement {
                part: which,
                position: offset + start + end,
            });
        }
    }
    Ok(())
}

fn check_word_starts(part: &[u8], which: Part, offset: usize) -> Result<(), SyntaxViolation> {
    match words(part).find(|(_, word)| !word[0].is_ascii_alphabetic()) {
        Some((start, _)) => Err(SyntaxViolation::WordStart {
            part: which,
            position: offset + start,
        }),
        None => Ok(()),
    }
}

fn check_word_ends(part: &[u8], which: Part, offset: usize) -> Result<(), SyntaxViolation> {
    match words(part).find(|(_, word)| !word[word.len() - 1].is_ascii_alphanumeric()) {
        Some((start, word)) => Err(SyntaxViolation::WordEnd {
            part: which,
            position: offset + start + word.len() - 1,
        }),
        None => Ok(()),
    }
}

/// Dot-separated words of `part` with their start offsets
fn words(part: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    let mut start = 0;
    part.split(|&b| b == b'.').map(move |word| {
        let word_start = start;
        start += word.len() + 1;
        (word_start, word)
    })
}
