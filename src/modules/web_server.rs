use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use crate::core::{CoreConfig, Scanner};
use crate::modules::connect::{PortProbe, TcpConnectProbe};
use crate::modules::handlers::routes;
use crate::modules::ping::{HostProbe, IcmpProbe};

/// Form front end for the two sweeps.
pub struct WebServer<H = IcmpProbe, P = TcpConnectProbe> {
    scanner: Arc<Scanner<H, P>>,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: CoreConfig) -> Self {
        Self::with_scanner(Scanner::with_config(config))
    }
}

impl<H: HostProbe, P: PortProbe> WebServer<H, P> {
    pub fn with_scanner(scanner: Scanner<H, P>) -> Self {
        let addr = SocketAddr::from((scanner.config.bind_address, scanner.config.web_port));
        Self {
            scanner: Arc::new(scanner),
            addr,
        }
    }

    /// Binds the listener and hands back the bound address together with the
    /// server future, which resolves once `shutdown` does.
    pub fn bind_with_shutdown(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(SocketAddr, impl Future<Output = ()> + 'static), warp::Error> {
        warp::serve(routes(self.scanner)).try_bind_with_graceful_shutdown(self.addr, shutdown)
    }

    /// Serves until Ctrl-C.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let (addr, server) = self.bind_with_shutdown(shutdown_signal())?;
        info!("Web interface running on http://{}", addr);
        server.await;
        info!("Web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

pub async fn run_web_server(config: CoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    WebServer::new(config).start().await
}
