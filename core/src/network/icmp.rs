//! # ICMP Reachability
//!
//! One echo request per host. The answer only decides whether the host is
//! worth querying over SNMP.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::SurgeError;
use tokio::time::timeout;
use tracing::{debug, warn};

pub const PING_TIMEOUT: Duration = Duration::from_secs(4);
const PAYLOAD: [u8; 56] = [0; 56];

#[async_trait]
pub trait Pinger: Send + Sync {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool;
}

/// Sends ICMP echo through `surge-ping`.
///
/// Opening an ICMP socket needs raw-socket privileges on most systems. When
/// that fails every host reports unreachable and a single warning is logged.
#[derive(Debug)]
pub struct IcmpPinger {
    timeout: Duration,
    socket_warned: AtomicBool,
}

impl IcmpPinger {
    pub fn new() -> Self {
        Self::with_timeout(PING_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            socket_warned: AtomicBool::new(false),
        }
    }

    fn socket_failure(&self, err: &io::Error) {
        if !self.socket_warned.swap(true, Ordering::Relaxed) {
            warn!("Cannot open ICMP socket ({err}); hosts will be reported unreachable");
        }
    }
}

impl Default for IcmpPinger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pinger for IcmpPinger {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        match timeout(self.timeout, surge_ping::ping(IpAddr::V4(addr), &PAYLOAD)).await {
            Ok(Ok((_packet, rtt))) => {
                debug!("IP {addr} [PING] - reply in {rtt:?}");
                true
            }
            Ok(Err(SurgeError::IOError(err))) if err.kind() == io::ErrorKind::PermissionDenied => {
                self.socket_failure(&err);
                false
            }
            Ok(Err(err)) => {
                debug!("IP {addr} [PING] - {err}");
                false
            }
            Err(_) => {
                debug!("IP {addr} [PING] - no reply within {:?}", self.timeout);
                false
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
