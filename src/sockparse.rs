//! Turns user input into probe targets.
//!
//! Supported inputs:
//! - Address prefix: "192.168.0" becomes 192.168.0.0 through 192.168.0.255
//! - Port range: host plus inclusive start/end, e.g. 20-25 is six ports
//! - Port bounds as text, e.g. from a form field: "8080"

use crate::core::error::{NetworkResult, ScanError};
use crate::core::types::PortTarget;

/// Number of hosts in one /24 style sweep.
pub const HOSTS_PER_PREFIX: usize = 256;

/// Builds `<prefix>.0` through `<prefix>.255`.
///
/// The prefix is used exactly as given, with no validation or cleanup. A
/// malformed prefix produces addresses that fail to probe and are reported
/// unreachable.
pub fn address_targets(prefix: &str) -> Vec<String> {
    (0..=u8::MAX).map(|octet| format!("{prefix}.{octet}")).collect()
}

/// Builds one target per port in `start..=end`, ascending. Empty when
/// `start > end`.
pub fn port_targets(host: &str, start: u16, end: u16) -> Vec<PortTarget> {
    let host = host.trim();
    (start..=end).map(|port| PortTarget::new(host, port)).collect()
}

/// Parses one port bound typed by a user.
pub fn parse_port_bound(input: &str) -> NetworkResult<u16> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScanError::TargetGeneration("port number is empty".into()));
    }

    // Parsed wide first so "-1" and "70000" get a specific message.
    match input.parse::<i64>() {
        Ok(value) if value < 0 => Err(ScanError::TargetGeneration(format!(
            "port `{input}` is negative"
        ))),
        Ok(value) => u16::try_from(value).map_err(|_| {
            ScanError::TargetGeneration(format!("port `{input}` is above {}", u16::MAX))
        }),
        Err(_) => Err(ScanError::TargetGeneration(format!(
            "port `{input}` is not a number"
        ))),
    }
}

/// Parses both bounds of a port range.
pub fn parse_port_range(start: &str, end: &str) -> NetworkResult<(u16, u16)> {
    Ok((parse_port_bound(start)?, parse_port_bound(end)?))
}

/// Numeric value of the last dotted component, used to order sweep results.
pub fn last_octet(address: &str) -> Option<u8> {
    address.rsplit('.').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_expands_to_full_range() {
        let targets = address_targets("10.0.0");
        assert_eq!(targets.len(), HOSTS_PER_PREFIX);
        assert_eq!(targets.first().map(String::as_str), Some("10.0.0.0"));
        assert_eq!(targets.last().map(String::as_str), Some("10.0.0.255"));
    }

    #[test]
    fn prefix_is_interpolated_verbatim() {
        assert_eq!(address_targets("192.168.1.")[7], "192.168.1..7");
        assert_eq!(address_targets(" 10.0.0")[5], " 10.0.0.5");
    }

    #[test]
    fn malformed_prefix_still_yields_every_octet() {
        let targets = address_targets("not-an-ip");
        assert_eq!(targets.len(), HOSTS_PER_PREFIX);
        assert_eq!(targets[42], "not-an-ip.42");
    }

    #[test]
    fn port_range_is_inclusive() {
        let ports: Vec<u16> = port_targets("localhost", 20, 25)
            .into_iter()
            .map(|t| t.port)
            .collect();
        assert_eq!(ports, vec![20, 21, 22, 23, 24, 25]);
    }

    #[test]
    fn reversed_port_range_is_empty() {
        assert!(port_targets("localhost", 25, 20).is_empty());
    }

    #[test]
    fn full_port_space_fits() {
        assert_eq!(port_targets("h", 0, u16::MAX).len(), 65_536);
    }

    #[test]
    fn port_bounds_parse() {
        assert_eq!(parse_port_bound(" 8080 ").unwrap(), 8080);
        assert_eq!(parse_port_range("20", "25").unwrap(), (20, 25));
    }

    #[test]
    fn bad_port_bounds_are_generation_errors() {
        for input in ["", "abc", "-1", "70000", "2.5"] {
            let err = parse_port_bound(input).unwrap_err();
            assert!(
                matches!(err, ScanError::TargetGeneration(_)),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn last_octet_reads_numeric_tail() {
        assert_eq!(last_octet("192.168.0.17"), Some(17));
        assert_eq!(last_octet("bad.prefix.255"), Some(255));
        assert_eq!(last_octet("nothing"), None);
    }
}
