pub mod connect;
pub mod handlers;
pub mod ping;
pub mod render;
pub mod web_server;

// Re-export commonly used items
pub use connect::{PortProbe, TcpConnectProbe};
pub use ping::{HostProbe, IcmpProbe};
pub use web_server::*;
