//! # Scan Target
//!
//! The subnet given on the command line and the host addresses it expands to.
//!
//! Parsing is strict: `192.0.2.0/24` is a network, `192.0.2.5/24` is not (host
//! bits set) and is rejected rather than silently masked. A bare address is a
//! `/32` and scans that single host.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::config::ConfigError;
use crate::network::range::{self, Ipv4Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTarget {
    pub network: Ipv4Network,
    pub hosts: Ipv4Range,
}

impl ScanTarget {
    pub fn new(network: Ipv4Network) -> Result<Self, ConfigError> {
        if network.network() != network.ip() {
            return Err(ConfigError::InvalidNetwork(network.to_string()));
        }

        let hosts = range::host_range(network)
            .ok_or_else(|| ConfigError::NoHosts(network.to_string()))?;

        Ok(Self { network, hosts })
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> {
        self.hosts.to_iter()
    }
}

impl FromStr for ScanTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let network = s
            .trim()
            .parse::<Ipv4Network>()
            .map_err(|_| ConfigError::InvalidNetwork(s.to_string()))?;

        Self::new(network)
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_network() {
        let target = ScanTarget::from_str("192.0.2.0/24").unwrap();
        assert_eq!(target.to_string(), "192.0.2.0/24");
        assert_eq!(target.host_count(), 254);
        assert_eq!(target.addresses().next(), Some(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(target.addresses().last(), Some(Ipv4Addr::new(192, 0, 2, 254)));
    }

    #[test]
    fn test_host_bits_set_is_rejected() {
        assert!(matches!(
            ScanTarget::from_str("192.0.2.5/24"),
            Err(ConfigError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_single_host_and_empty_networks() {
        let single = ScanTarget::from_str("192.0.2.5/32").unwrap();
        assert_eq!(single.addresses().collect::<Vec<_>>(), vec![Ipv4Addr::new(192, 0, 2, 5)]);

        let bare = ScanTarget::from_str("192.0.2.5").unwrap();
        assert_eq!(bare.prefix(), 32);

        assert!(matches!(
            ScanTarget::from_str("192.0.2.4/31"),
            Err(ConfigError::NoHosts(_))
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(ScanTarget::from_str("not-a-network").is_err());
        assert!(ScanTarget::from_str("10.0.0.0/33").is_err());
        assert!(ScanTarget::from_str("").is_err());
    }
}
