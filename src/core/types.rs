use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of the address tables.
pub const ADDRESS_ROW_WIDTH: usize = 8;
/// Rows of the port tables.
pub const PORT_ROW_WIDTH: usize = 19;

/// One TCP endpoint of a port sweep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortTarget {
    pub host: String,
    pub port: u16,
}

impl PortTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for PortTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Result of probing a single target. Exactly one exists per target of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome<T> {
    pub target: T,
    pub reachable: bool,
}

impl<T> ProbeOutcome<T> {
    pub fn new(target: T, reachable: bool) -> Self {
        Self { target, reachable }
    }
}

/// Two disjoint lists that together cover every target of one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult<T> {
    pub reachable: Vec<T>,
    pub unreachable: Vec<T>,
}

impl<T> ScanResult<T> {
    pub fn empty() -> Self {
        Self {
            reachable: Vec::new(),
            unreachable: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.reachable.len() + self.unreachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<T> Default for ScanResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
