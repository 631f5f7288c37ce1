pub mod test_utils {
    use async_trait::async_trait;
    use netsweep::{HostProbe, PortProbe};
    use std::collections::HashSet;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::{TcpListener, TcpSocket, TcpStream};

    /// Answers for a fixed set of last octets, after a small random-ish delay
    /// so completion order differs from launch order.
    pub struct StaticHosts {
        alive: HashSet<u8>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StaticHosts {
        pub fn new(alive: impl IntoIterator<Item = u8>) -> Self {
            Self {
                alive: alive.into_iter().collect(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl HostProbe for StaticHosts {
        async fn is_reachable(&self, address: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let octet = netsweep::sockparse::last_octet(address);
            let jitter = octet.map_or(0, |o| u64::from(o.wrapping_mul(37) % 7));
            tokio::time::sleep(Duration::from_millis(jitter)).await;
            octet.is_some_and(|o| self.alive.contains(&o))
        }
    }

    /// Open for a fixed set of ports.
    pub struct StaticPorts {
        open: HashSet<u16>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StaticPorts {
        pub fn new(open: impl IntoIterator<Item = u16>) -> Self {
            Self {
                open: open.into_iter().collect(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl PortProbe for StaticPorts {
        async fn is_open(&self, addr: SocketAddr) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let jitter = u64::from(addr.port() % 5);
            tokio::time::sleep(Duration::from_millis(jitter)).await;
            self.open.contains(&addr.port())
        }
    }

    /// A loopback listener that never accepts, with its backlog filled so the
    /// kernel drops any further SYN. Connects to it hang until they time out.
    /// Keep the returned streams alive for as long as the endpoint should stay
    /// silent.
    pub async fn silent_endpoint() -> (TcpListener, Vec<TcpStream>, SocketAddr) {
        let socket = TcpSocket::new_v4().expect("create socket");
        socket
            .bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .expect("bind loopback");
        let listener = socket.listen(1).expect("listen");
        let addr = listener.local_addr().expect("local addr");

        let mut fillers = Vec::new();
        for _ in 0..64 {
            match tokio::time::timeout(Duration::from_millis(200), TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => fillers.push(stream),
                // Backlog full: the SYN went unanswered.
                Err(_) => return (listener, fillers, addr),
                Ok(Err(e)) => panic!("filling backlog failed: {e}"),
            }
        }
        panic!("backlog of {addr} never filled");
    }
}
