use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// Four octets in 0-255, no leading zeros, nothing around them.
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}\z",
    )
    .expect("IPv4 pattern is valid")
});

/// Returns true if `ip` is a dotted-quad IPv4 address.
pub fn validate(ip: &str) -> bool {
    IPV4_PATTERN.is_match(ip)
}

pub fn parse_ipv4(ip: &str) -> Result<Ipv4Addr> {
    if !validate(ip) {
        return Err(Error::invalid_input(format!("Invalid IP address: {}", ip)));
    }

    ip.parse()
        .map_err(|_| Error::invalid_input(format!("Invalid IP address: {}", ip)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_dotted_quads() {
        for ip in ["0.0.0.0", "192.168.1.10", "255.255.255.255", "203.0.113.9", "10.0.0.1"] {
            assert!(validate(ip), "Expected valid: {}", ip);
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_octets() {
        assert!(!validate("256.1.1.1"));
        assert!(!validate("1.1.1.300"));
        assert!(!validate("999.999.999.999"));
    }

    #[test]
    fn test_validate_rejects_wrong_shape() {
        let cases = [
            "1.2.3",
            "1.2.3.4.5",
            "",
            "1..2.3",
            "a.b.c.d",
            "01.2.3.4",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.3.4\n",
            "2001:db8::1",
            "+1.2.3.4",
        ];

        for case in cases {
            assert!(!validate(case), "Expected invalid: {:?}", case);
        }
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse_ipv4("203.0.113.9").unwrap(), Ipv4Addr::new(203, 0, 113, 9));

        let err = parse_ipv4("1.2.3").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: Invalid IP address: 1.2.3");
    }
}
