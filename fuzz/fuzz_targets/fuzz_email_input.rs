#![no_main]
use emailtype::{grammar, wire, AddressParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Grammar must answer for any bytes without panicking
    let verdict = grammar::check_bytes(data);

    if let Ok(address) = AddressParser::new().parse_bytes(data) {
        assert!(verdict.is_ok());

        // Accepted input renders to a canonical form that is itself valid
        let canonical = address.to_string();
        assert!(grammar::validate(&canonical));
        assert_eq!(canonical, String::from_utf8_lossy(data).to_ascii_lowercase());

        let bytes = wire::encode(&address).unwrap();
        assert_eq!(wire::decode(&bytes).unwrap(), address);
    }

    // Untrusted binary payloads
    let _ = wire::decode(data);
});
