//! Reachability probing ahead of the SNMP audit.

pub mod icmp;
