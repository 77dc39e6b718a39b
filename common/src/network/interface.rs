//! # Interface Records
//!
//! Per-interface data gathered from a remote device's IF-MIB and IP-MIB tables.
//!
//! Several tables are walked independently and each describes the same
//! interfaces from a different angle. The interface index (`ifIndex`) is the
//! only key they share, so [`InterfaceTable`] hands out exactly one record per
//! index and keeps them in the order they were first observed.

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;

use super::range;

/// `ifAdminStatus` / `ifOperStatus` values (IF-MIB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceStatus {
    Up,
    Down,
    Testing,
    Unknown,
    Dormant,
    NotPresent,
    LowerLayerDown,
}

impl InterfaceStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Testing),
            4 => Some(Self::Unknown),
            5 => Some(Self::Dormant),
            6 => Some(Self::NotPresent),
            7 => Some(Self::LowerLayerDown),
            _ => None,
        }
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Testing => "testing",
            Self::Unknown => "unknown",
            Self::Dormant => "dormant",
            Self::NotPresent => "notPresent",
            Self::LowerLayerDown => "lowerLayerDown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub index: u32,
    pub name: Option<String>,
    pub alias: Option<String>,
    /// IANAifType code.
    pub if_type: Option<i32>,
    pub mtu: Option<i32>,
    pub mac_address: Option<MacAddr>,
    pub ip_address: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
    pub description: Option<String>,
    pub admin_status: Option<InterfaceStatus>,
    pub oper_status: Option<InterfaceStatus>,
}

impl InterfaceRecord {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: None,
            alias: None,
            if_type: None,
            mtu: None,
            mac_address: None,
            ip_address: None,
            netmask: None,
            description: None,
            admin_status: None,
            oper_status: None,
        }
    }

    /// The interface address in CIDR form, `/0` when no mask was seen.
    pub fn cidr(&self) -> Option<Ipv4Network> {
        let address = self.ip_address?;
        let prefix = self.netmask.map(range::prefix_len).unwrap_or(0);
        Ipv4Network::new(address, prefix).ok()
    }
}

/// Interface records of one host, unique per index, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTable {
    records: Vec<InterfaceRecord>,
    positions: HashMap<u32, usize>,
}

impl InterfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `index`, creating it on first sight.
    pub fn entry(&mut self, index: u32) -> &mut InterfaceRecord {
        let position = match self.positions.get(&index) {
            Some(&position) => position,
            None => {
                self.records.push(InterfaceRecord::new(index));
                self.positions.insert(index, self.records.len() - 1);
                self.records.len() - 1
            }
        };
        &mut self.records[position]
    }

    pub fn get(&self, index: u32) -> Option<&InterfaceRecord> {
        self.positions.get(&index).map(|&position| &self.records[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a InterfaceTable {
    type Item = &'a InterfaceRecord;
    type IntoIter = std::slice::Iter<'a, InterfaceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
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
    fn test_entry_merges_on_index() {
        let mut table = InterfaceTable::new();
        table.entry(7).description = Some("Gi0/1".into());
        table.entry(3).if_type = Some(6);
        table.entry(7).if_type = Some(6);

        assert_eq!(table.len(), 2);
        let record = table.get(7).unwrap();
        assert_eq!(record.description.as_deref(), Some("Gi0/1"));
        assert_eq!(record.if_type, Some(6));
    }

    #[test]
    fn test_insertion_order_is_first_observation() {
        let mut table = InterfaceTable::new();
        for index in [10, 2, 5, 2, 10] {
            table.entry(index);
        }
        let order: Vec<u32> = table.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![10, 2, 5]);
        assert_eq!(table.entry(10).index, 10);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_cidr_from_address_and_mask() {
        let mut record = InterfaceRecord::new(1);
        assert_eq!(record.cidr(), None);

        record.ip_address = Some(Ipv4Addr::new(192, 0, 2, 10));
        assert_eq!(record.cidr().unwrap().to_string(), "192.0.2.10/0");

        record.netmask = Some(Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(record.cidr().unwrap().to_string(), "192.0.2.10/24");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(InterfaceStatus::from_code(1), Some(InterfaceStatus::Up));
        assert_eq!(
            InterfaceStatus::from_code(7),
            Some(InterfaceStatus::LowerLayerDown)
        );
        assert_eq!(InterfaceStatus::from_code(0), None);
        assert_eq!(InterfaceStatus::Down.to_string(), "down");
    }
}
