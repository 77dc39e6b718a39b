//! # netaudit-core
//!
//! The SNMP polling and data-extraction engine.
//!
//! * **[`snmp`]**: protocol session, scalar fetcher, table walker.
//! * **[`vendors`]**: vendor extension registry.
//! * **[`audit`]**: the per-host pipeline assembling a [`HostRecord`].
//! * **[`network`]**: ICMP reachability.
//! * **[`scanner`]**: the subnet fan-out driver.
//!
//! [`HostRecord`]: netaudit_common::network::host::HostRecord

pub mod audit;
pub mod network;
pub mod scanner;
pub mod snmp;
pub mod vendors;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
