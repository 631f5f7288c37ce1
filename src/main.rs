/***********************************************************
 *
 *      netsweep - ping sweeps and TCP port sweeps,
 *          from the terminal or a small web form.
 *
 ***********************************************************/

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use netsweep::core::{ADDRESS_ROW_WIDTH, PORT_ROW_WIDTH};
use netsweep::modules::run_web_server;
use netsweep::{chunk_rows, CoreConfig, LogLevel, Scanner};

#[derive(Debug, Parser)]
#[command(name = "netsweep", version, about = "Find live hosts on a /24 and open ports on a host")]
struct Cli {
    /// Log verbosity; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Concurrent pings during an address sweep
    #[arg(long, default_value_t = 256, global = true)]
    max_pings: usize,

    /// Concurrent connects during a port sweep
    #[arg(long, default_value_t = 64, global = true)]
    max_connects: usize,

    /// TCP connect timeout in milliseconds
    #[arg(long, default_value_t = 1000, global = true)]
    connect_timeout_ms: u64,

    /// How long ping waits for its reply, in milliseconds
    #[arg(long, default_value_t = 1000, global = true)]
    ping_timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web front end
    Serve {
        #[arg(long, default_value_t = Ipv4Addr::LOCALHOST)]
        bind: Ipv4Addr,
        #[arg(long, default_value_t = 8888)]
        port: u16,
    },
    /// Ping every address under a three-octet prefix, e.g. 192.168.0
    Sweep { prefix: String },
    /// Try a TCP connect on every port in START..=END
    Ports {
        host: String,
        #[arg(allow_hyphen_values = true)]
        start: String,
        #[arg(allow_hyphen_values = true)]
        end: String,
    },
}

impl Cli {
    fn config(&self) -> CoreConfig {
        let mut config = CoreConfig {
            max_concurrent_pings: self.max_pings,
            max_concurrent_connects: self.max_connects,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            ping_timeout: Duration::from_millis(self.ping_timeout_ms),
            log_level: self.log_level,
            ..CoreConfig::default()
        };
        if let Command::Serve { bind, port } = &self.command {
            config.bind_address = *bind;
            config.web_port = *port;
        }
        config
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_rows<T: std::fmt::Display + Clone>(title: &str, items: &[T], width: usize) {
    println!("{} ({}):", title, items.len());
    for row in chunk_rows(items, width) {
        let cells: Vec<String> = row.iter().map(|item| format!("{:<15}", item)).collect();
        println!("  {}", cells.join(" ").trim_end());
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let config = cli.config();
    info!(?config, "configuration loaded");

    match cli.command {
        Command::Serve { .. } => run_web_server(config).await?,
        Command::Sweep { prefix } => {
            let result = Scanner::with_config(config).scan_address_range(&prefix).await?;
            print_rows("Available IP addresses", &result.reachable, ADDRESS_ROW_WIDTH);
            print_rows("Unavailable IP addresses", &result.unreachable, ADDRESS_ROW_WIDTH);
        }
        Command::Ports { host, start, end } => {
            let (start, end) = netsweep::parse_port_range(&start, &end)?;
            let result = Scanner::with_config(config)
                .scan_port_range(&host, start, end)
                .await?;
            let open: Vec<u16> = result.reachable.iter().map(|t| t.port).collect();
            let closed: Vec<u16> = result.unreachable.iter().map(|t| t.port).collect();
            print_rows("Available ports", &open, PORT_ROW_WIDTH);
            print_rows("Unavailable ports", &closed, PORT_ROW_WIDTH);
        }
    }

    Ok(())
}
