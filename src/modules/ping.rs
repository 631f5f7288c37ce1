use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Extra time the child gets on top of its own wait before it is killed.
const CHILD_GRACE: Duration = Duration::from_secs(2);

/// Decides whether a single host answers.
#[async_trait]
pub trait HostProbe: Send + Sync + 'static {
    async fn is_reachable(&self, address: &str) -> bool;
}

/// One ICMP echo through the system `ping` utility. Exit status 0 means the
/// host replied; every other outcome counts as unreachable.
///
/// Uses the setuid/capability-enabled system binary, so no raw socket
/// privileges are needed by this process.
#[derive(Debug, Clone)]
pub struct IcmpProbe {
    wait: Duration,
}

impl IcmpProbe {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    fn command(&self, address: &str) -> Command {
        let mut cmd = Command::new("ping");
        cmd.args(ping_args(address, self.wait))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for IcmpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl HostProbe for IcmpProbe {
    async fn is_reachable(&self, address: &str) -> bool {
        // Would be read by ping as an option, not a host.
        if address.starts_with('-') {
            debug!(address, "refusing to ping option-like address");
            return false;
        }

        let mut child = match self.command(address).spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(address, error = %e, "could not start ping");
                return false;
            }
        };

        match timeout(self.wait + CHILD_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(address, code = ?status.code(), "ping finished");
                status.success()
            }
            Ok(Err(e)) => {
                debug!(address, error = %e, "waiting on ping failed");
                false
            }
            Err(_) => {
                debug!(address, "ping overran its deadline");
                stop_overrun(&mut child, address).await;
                false
            }
        }
    }
}

async fn stop_overrun(child: &mut Child, address: &str) {
    if let Err(e) = child.kill().await {
        debug!(address, error = %e, "could not kill overrunning ping");
    }
}

/// Single-packet arguments in the platform's syntax.
pub fn ping_args(address: &str, wait: Duration) -> Vec<String> {
    #[cfg(target_os = "windows")]
    let (count_flag, wait_flag, wait_value) = ("-n", "-w", wait.as_millis().max(1).to_string());

    // BSD ping takes -W in milliseconds.
    #[cfg(target_os = "macos")]
    let (count_flag, wait_flag, wait_value) = ("-c", "-W", wait.as_millis().max(1).to_string());

    // iputils and busybox take -W in whole seconds.
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let (count_flag, wait_flag, wait_value) = ("-c", "-W", wait.as_secs().max(1).to_string());

    vec![
        count_flag.to_string(),
        "1".to_string(),
        wait_flag.to_string(),
        wait_value,
        address.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_args_send_one_packet() {
        assert_eq!(
            ping_args("10.0.0.1", Duration::from_millis(1500)),
            vec!["-c", "1", "-W", "1", "10.0.0.1"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn sub_second_wait_rounds_up() {
        let args = ping_args("10.0.0.1", Duration::from_millis(200));
        assert_eq!(args[3], "1");
    }

    #[test]
    fn address_is_last_argument() {
        let args = ping_args("192.168.0.9", Duration::from_secs(1));
        assert_eq!(args.last().map(String::as_str), Some("192.168.0.9"));
    }

    #[tokio::test]
    async fn option_like_address_is_unreachable() {
        let probe = IcmpProbe::default();
        assert!(!probe.is_reachable("-f.0").await);
    }

    #[tokio::test]
    async fn malformed_address_is_unreachable() {
        let probe = IcmpProbe::new(Duration::from_secs(1));
        assert!(!probe.is_reachable("not.an.address.999").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn overrunning_child_is_stopped() {
        let mut child = Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()
            .unwrap();

        stop_overrun(&mut child, "10.0.0.1").await;
        assert!(child.try_wait().unwrap().is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stopping_an_already_reaped_child_is_harmless() {
        let mut child = Command::new("true").spawn().unwrap();
        child.wait().await.unwrap();

        stop_overrun(&mut child, "10.0.0.1").await;
        assert!(child.try_wait().unwrap().is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn loopback_answers() {
        let probe = IcmpProbe::default();
        assert!(probe.is_reachable("127.0.0.1").await);
    }
}
