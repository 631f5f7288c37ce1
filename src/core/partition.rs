use itertools::{Either, Itertools};

use crate::core::types::{PortTarget, ProbeOutcome, ScanResult};
use crate::sockparse::last_octet;

/// Splits outcomes into reachable and unreachable targets, keeping the
/// incoming order within each side.
pub fn partition<T>(outcomes: Vec<ProbeOutcome<T>>) -> ScanResult<T> {
    let (reachable, unreachable) = outcomes.into_iter().partition_map(|outcome| {
        if outcome.reachable {
            Either::Left(outcome.target)
        } else {
            Either::Right(outcome.target)
        }
    });

    ScanResult {
        reachable,
        unreachable,
    }
}

/// Address sweep results, each side ordered by the last octet.
pub fn partition_addresses(outcomes: Vec<ProbeOutcome<String>>) -> ScanResult<String> {
    let sorted = outcomes
        .into_iter()
        .sorted_by(|a, b| address_order(&a.target).cmp(&address_order(&b.target)))
        .collect();
    partition(sorted)
}

/// Port sweep results, each side in ascending port order.
pub fn partition_ports(outcomes: Vec<ProbeOutcome<PortTarget>>) -> ScanResult<PortTarget> {
    let sorted = outcomes
        .into_iter()
        .sorted_by_key(|outcome| outcome.target.port)
        .collect();
    partition(sorted)
}

// Unparseable tails sort last, then by text, so the order stays total.
fn address_order(address: &str) -> (u16, &str) {
    let octet = last_octet(address).map_or(u16::MAX, u16::from);
    (octet, address)
}
