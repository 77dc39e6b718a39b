//! # netaudit-common
//!
//! Shared models for the inventory engine and its front ends.
//!
//! * **[`config`]**: resolved scan settings and SNMPv3 algorithm enumerations.
//! * **[`network`]**: host and interface records, address ranges, scan targets.

pub mod config;
pub mod network;
