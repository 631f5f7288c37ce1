pub mod error;
pub mod network;
pub mod partition;
pub mod types;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::modules::connect::{resolve_ipv4, PortProbe, TcpConnectProbe, CONNECT_TIMEOUT};
use crate::modules::ping::{HostProbe, IcmpProbe};
use crate::sockparse::{address_targets, port_targets, HOSTS_PER_PREFIX};
use crate::utils::helpers::calculate_optimal_workers;

// Scanner configuration settings
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub max_concurrent_pings: usize,
    pub max_concurrent_connects: usize,
    pub connect_timeout: Duration,
    pub ping_timeout: Duration,
    pub bind_address: Ipv4Addr,
    pub web_port: u16,
    pub log_level: LogLevel,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pings: HOSTS_PER_PREFIX,
            max_concurrent_connects: 64,
            connect_timeout: CONNECT_TIMEOUT,
            ping_timeout: Duration::from_secs(1),
            bind_address: Ipv4Addr::LOCALHOST,
            web_port: 8888,
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Entry point for both sweeps. Probes are pluggable so the sweep logic can
/// run against something other than the live network.
pub struct Scanner<H = IcmpProbe, P = TcpConnectProbe> {
    host_probe: Arc<H>,
    port_probe: Arc<P>,
    pub config: CoreConfig,
}

impl Scanner {
    // Live probes, default configuration
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    // Live probes, custom configuration
    pub fn with_config(config: CoreConfig) -> Self {
        let host_probe = IcmpProbe::new(config.ping_timeout);
        let port_probe = TcpConnectProbe::new(config.connect_timeout);
        Self::with_probes(config, host_probe, port_probe)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostProbe, P: PortProbe> Scanner<H, P> {
    pub fn with_probes(config: CoreConfig, host_probe: H, port_probe: P) -> Self {
        Self {
            host_probe: Arc::new(host_probe),
            port_probe: Arc::new(port_probe),
            config,
        }
    }

    /// Pings `<prefix>.0` through `<prefix>.255`. Always reports 256 targets;
    /// hosts that do not answer, or do not parse, land in `unreachable`.
    pub async fn scan_address_range(&self, prefix: &str) -> NetworkResult<ScanResult<String>> {
        let targets = address_targets(prefix);
        let workers = calculate_optimal_workers(self.config.max_concurrent_pings, targets.len());
        info!(prefix, hosts = targets.len(), workers, "starting address sweep");
        let started = Instant::now();

        let host_probe = self.host_probe.clone();
        let outcomes = ProbeCoordinator::new(workers)
            .run(targets, move |address: String| {
                let host_probe = host_probe.clone();
                async move { host_probe.is_reachable(&address).await }
            })
            .await?;

        let result = partition::partition_addresses(outcomes);
        info!(
            prefix,
            reachable = result.reachable.len(),
            unreachable = result.unreachable.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "address sweep complete"
        );
        Ok(result)
    }

    /// Connects to every port in `start..=end` on `host`. A reversed range is
    /// an empty result. A host that does not resolve aborts the sweep before
    /// any connection is attempted.
    pub async fn scan_port_range(
        &self,
        host: &str,
        start: u16,
        end: u16,
    ) -> NetworkResult<ScanResult<PortTarget>> {
        let targets = port_targets(host, start, end);
        if targets.is_empty() {
            info!(host, start, end, "empty port range, nothing to scan");
            return Ok(ScanResult::empty());
        }

        let ip = IpAddr::V4(resolve_ipv4(host).await?);
        let workers = calculate_optimal_workers(self.config.max_concurrent_connects, targets.len());
        info!(host, %ip, start, end, workers, "starting port sweep");
        let started = Instant::now();

        let port_probe = self.port_probe.clone();
        let outcomes = ProbeCoordinator::new(workers)
            .run(targets, move |target: PortTarget| {
                let port_probe = port_probe.clone();
                async move { port_probe.is_open(SocketAddr::new(ip, target.port)).await }
            })
            .await?;

        let result = partition::partition_ports(outcomes);
        info!(
            host,
            open = result.reachable.len(),
            closed = result.unreachable.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "port sweep complete"
        );
        Ok(result)
    }
}

// Re-exporting commonly used components
pub use error::{NetworkResult, ScanError};
pub use network::ProbeCoordinator;
pub use types::{PortTarget, ProbeOutcome, ScanResult, ADDRESS_ROW_WIDTH, PORT_ROW_WIDTH};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form_tool() {
        let config = CoreConfig::default();
        assert_eq!(config.web_port, 8888);
        assert_eq!(config.max_concurrent_pings, 256);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.bind_address, Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn log_levels_map_to_filter_directives() {
        assert_eq!(LogLevel::Debug.as_directive(), "debug");
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
    }

    #[test]
    fn empty_port_range_returns_without_probing() {
        let result = tokio_test::block_on(Scanner::new().scan_port_range("ignored", 10, 9)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn live_scanner_carries_its_config() {
        let config = CoreConfig {
            max_concurrent_connects: 3,
            ..CoreConfig::default()
        };
        assert_eq!(Scanner::with_config(config).config.max_concurrent_connects, 3);
    }
}
