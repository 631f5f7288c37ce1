use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::debug;

use crate::core::error::{NetworkResult, ScanError};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Decides whether a single TCP endpoint accepts connections.
#[async_trait]
pub trait PortProbe: Send + Sync + 'static {
    async fn is_open(&self, addr: SocketAddr) -> bool;
}

/// Full TCP handshake with a fixed deadline. The stream is dropped, and the
/// socket closed, before the answer is returned.
#[derive(Debug, Clone)]
pub struct TcpConnectProbe {
    connect_timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpConnectProbe {
    fn default() -> Self {
        Self::new(CONNECT_TIMEOUT)
    }
}

#[async_trait]
impl PortProbe for TcpConnectProbe {
    async fn is_open(&self, addr: SocketAddr) -> bool {
        match timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            // Refused, reset, host or network unreachable.
            Ok(Err(e)) => {
                debug!(%addr, error = %e, "connect failed");
                false
            }
            Err(_) => {
                debug!(%addr, "connect timed out");
                false
            }
        }
    }
}

/// Resolves a host to its first IPv4 address. Literal addresses skip DNS.
pub async fn resolve_ipv4(host: &str) -> NetworkResult<Ipv4Addr> {
    let host = host.trim();
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(ip);
    }
    if host.is_empty() {
        return Err(ScanError::Resolve {
            host: host.to_string(),
            source: None,
        });
    }

    let addrs = lookup_host((host, 0)).await.map_err(|e| ScanError::Resolve {
        host: host.to_string(),
        source: Some(e),
    })?;

    addrs
        .filter_map(|addr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ScanError::Resolve {
            host: host.to_string(),
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(TcpConnectProbe::default().is_open(addr).await);
    }

    #[tokio::test]
    async fn closed_port_is_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let started = Instant::now();
        assert!(!TcpConnectProbe::default().is_open(addr).await);
        assert!(started.elapsed() < CONNECT_TIMEOUT);
    }

    #[tokio::test]
    async fn literal_address_skips_lookup() {
        let ip = resolve_ipv4(" 10.1.2.3 ").await.unwrap();
        assert_eq!(ip, Ipv4Addr::new(10, 1, 2, 3));
    }

    #[tokio::test]
    async fn localhost_resolves_to_ipv4() {
        let ip = resolve_ipv4("localhost").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn empty_host_is_a_resolve_error() {
        let err = resolve_ipv4("   ").await.unwrap_err();
        assert!(matches!(err, ScanError::Resolve { .. }));
    }
}
