//! Ping sweeps over a /24 prefix and TCP port sweeps over a single host,
//! behind a small web form.

pub mod core;
pub mod modules;
pub mod sockparse;
pub mod utils;

// Export public types and functions
pub use crate::core::{
    CoreConfig, LogLevel, NetworkResult, PortTarget, ProbeCoordinator, ProbeOutcome, ScanError,
    ScanResult, Scanner,
};
pub use modules::{HostProbe, IcmpProbe, PortProbe, TcpConnectProbe, WebServer};
pub use sockparse::{address_targets, parse_port_bound, parse_port_range, port_targets};
pub use utils::helpers::chunk_rows;
