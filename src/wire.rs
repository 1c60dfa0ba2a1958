//! Binary send/receive payload
//!
//! Hosts that transmit values in binary form get a small self-describing
//! payload instead of the text rendering:
//!
//! ```text
//! ┌─────────┬───────────────┬────────────────┬───────────┬────────────┐
//! │ version │ local_len     │ domain_len     │ local     │ domain     │
//! │ u8 = 1  │ u32 BE        │ u32 BE         │ bytes     │ bytes      │
//! └─────────┴───────────────┴────────────────┴───────────┴────────────┘
//! ```
//!
//! Received payloads are untrusted: the parts are reassembled and run through
//! the full grammar before an [`Address`] is built.

use crate::address::Address;
use crate::error::{EmailError, Result};
use crate::parser::AddressParser;
use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Current payload version
pub const WIRE_VERSION: u8 = 1;

/// Size of [`WireHeader`] in bytes
pub const WIRE_HEADER_SIZE: usize = std::mem::size_of::<WireHeader>();

/// Fixed-size payload header
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct WireHeader {
    /// Payload version, currently [`WIRE_VERSION`]
    pub version: u8,
    /// Length of the local part in bytes
    pub local_len: U32<BigEndian>,
    /// Length of the domain in bytes
    pub domain_len: U32<BigEndian>,
}

/// Encode an address for binary transmission
pub fn encode(address: &Address) -> Result<Vec<u8>> {
    let local = address.local().as_bytes();
    let domain = address.domain().as_bytes();

    let header = WireHeader {
        version: WIRE_VERSION,
        local_len: U32::new(part_len(local)?),
        domain_len: U32::new(part_len(domain)?),
    };

    let mut out = Vec::with_capacity(WIRE_HEADER_SIZE + local.len() + domain.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(local);
    out.extend_from_slice(domain);
    Ok(out)
}

/// Decode and validate a received payload
pub fn decode(bytes: &[u8]) -> Result<Address> {
    let (header, body) = WireHeader::read_from_prefix(bytes).map_err(|_| {
        EmailError::Format(format!(
            "payload is {} bytes, header needs {}",
            bytes.len(),
            WIRE_HEADER_SIZE
        ))
    })?;

    if header.version != WIRE_VERSION {
        return Err(EmailError::Format(format!(
            "unsupported payload version {}",
            header.version
        )));
    }

    let local_len = header.local_len.get() as usize;
    let domain_len = header.domain_len.get() as usize;
    let expected = local_len
        .checked_add(domain_len)
        .ok_or_else(|| EmailError::Format("part lengths overflow".to_string()))?;
    if body.len() != expected {
        return Err(EmailError::Format(format!(
            "header declares {} body bytes, payload has {}",
            expected,
            body.len()
        )));
    }

    let (local, domain) = body.split_at(local_len);
    let mut raw = Vec::with_capacity(expected + 1);
    raw.extend_from_slice(local);
    raw.push(b'@');
    raw.extend_from_slice(domain);

    // A stray '@' in either part shows up as a separator count violation
    AddressParser::new().parse_bytes(&raw)
}

fn part_len(part: &[u8]) -> Result<u32> {
    u32::try_from(part.len())
        .map_err(|_| EmailError::Format(format!("part of {} bytes is too long", part.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::SyntaxViolation;

    fn payload(version: u8, local: &[u8], domain: &[u8]) -> Vec<u8> {
        let header = WireHeader {
            version,
            local_len: U32::new(local.len() as u32),
            domain_len: U32::new(domain.len() as u32),
        };
        let mut out = header.as_bytes().to_vec();
        out.extend_from_slice(local);
        out.extend_from_slice(domain);
        out
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(WIRE_HEADER_SIZE, 9);

        let address: Address = "ab@cd.ef".parse().unwrap();
        let bytes = encode(&address).unwrap();
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 2]);
        assert_eq!(&bytes[5..9], &[0, 0, 0, 5]);
        assert_eq!(&bytes[9..], b"abcd.ef");
    }

    #[test]
    fn test_decode_canonicalizes() {
        let address = decode(&payload(1, b"Ann", b"Mail.COM")).unwrap();
        assert_eq!(address.to_string(), "ann@mail.com");
    }

    #[test]
    fn test_decode_rejects_short_and_unknown() {
        assert!(matches!(decode(&[1, 0, 0]), Err(EmailError::Format(_))));
        assert!(matches!(
            decode(&payload(2, b"ann", b"mail.com")),
            Err(EmailError::Format(_))
        ));
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let mut bytes = payload(1, b"ann", b"mail.com");
        bytes.push(b'x');
        assert!(matches!(decode(&bytes), Err(EmailError::Format(_))));

        bytes.truncate(bytes.len() - 3);
        assert!(matches!(decode(&bytes), Err(EmailError::Format(_))));
    }

    #[test]
    fn test_decode_validates_grammar() {
        assert_eq!(
            decode(&payload(1, b"a@b", b"mail.com")),
            Err(EmailError::Syntax(SyntaxViolation::SeparatorCount { found: 2 }))
        );
        assert!(matches!(
            decode(&payload(1, b"ann", b"localhost")),
            Err(EmailError::Syntax(SyntaxViolation::TooFewWords { .. }))
        ));
    }
}
