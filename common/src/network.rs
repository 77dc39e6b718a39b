//! # Network Models
//!
//! * [`host::HostRecord`]: everything learned about one scanned address.
//! * [`interface::InterfaceTable`]: per-interface records keyed by `ifIndex`.
//! * [`target::ScanTarget`]: the subnet handed in on the command line.
//! * [`range::Ipv4Range`]: an inclusive run of IPv4 addresses.

pub mod host;
pub mod interface;
pub mod mac;
pub mod range;
pub mod target;
