//! End-to-end inventory runs against in-memory SNMP agents.

#[cfg(test)]
mod inventory;
