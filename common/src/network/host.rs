//! # Host Records
//!
//! One [`HostRecord`] per scanned address: the device identity, hardware and
//! addressing data collected over SNMP, plus the reachability and SNMP flags.
//!
//! Every data field starts absent (`None`). A field only becomes `Some` when a
//! device returned a non-empty value for it.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;

use super::interface::InterfaceTable;

/// Identity fields filled from scalar fetches, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostField {
    SystemName,
    Manufacturer,
    Model,
    Firmware,
    SerialNumber,
    Location,
    Description,
    Contact,
    Comment,
    InterfaceCount,
}

impl HostField {
    pub const ALL: [HostField; 10] = [
        HostField::SystemName,
        HostField::Manufacturer,
        HostField::Model,
        HostField::Firmware,
        HostField::SerialNumber,
        HostField::Location,
        HostField::Description,
        HostField::Contact,
        HostField::Comment,
        HostField::InterfaceCount,
    ];

    /// Column title used by reports.
    pub fn label(self) -> &'static str {
        match self {
            HostField::SystemName => "Sysname",
            HostField::Manufacturer => "Manufacturer",
            HostField::Model => "Model",
            HostField::Firmware => "FW",
            HostField::SerialNumber => "S/N",
            HostField::Location => "Location",
            HostField::Description => "Description",
            HostField::Contact => "Contact",
            HostField::Comment => "Comment",
            HostField::InterfaceCount => "Interfaces Count",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub address: Ipv4Addr,
    pub system_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub firmware: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub comment: Option<String>,
    pub interface_count: Option<u32>,
    pub mac_address: Option<MacAddr>,
    pub ip_addresses: Option<Vec<Ipv4Network>>,
    pub interfaces: InterfaceTable,
    /// Answered ICMP echo.
    pub reachable: bool,
    /// At least one SNMP exchange returned usable data.
    pub snmp_ok: bool,
}

impl HostRecord {
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            system_name: None,
            manufacturer: None,
            model: None,
            firmware: None,
            serial_number: None,
            location: None,
            description: None,
            contact: None,
            comment: None,
            interface_count: None,
            mac_address: None,
            ip_addresses: None,
            interfaces: InterfaceTable::new(),
            reachable: false,
            snmp_ok: false,
        }
    }

    pub fn with_reachability(mut self, reachable: bool) -> Self {
        self.reachable = reachable;
        self
    }

    /// Stores `value` into `field`. Empty values leave the field untouched.
    ///
    /// Returns whether the field was written. An interface count that is not
    /// a non-negative integer is rejected.
    pub fn set_field(&mut self, field: HostField, value: String) -> bool {
        if value.is_empty() {
            return false;
        }

        let slot = match field {
            HostField::SystemName => &mut self.system_name,
            HostField::Manufacturer => &mut self.manufacturer,
            HostField::Model => &mut self.model,
            HostField::Firmware => &mut self.firmware,
            HostField::SerialNumber => &mut self.serial_number,
            HostField::Location => &mut self.location,
            HostField::Description => &mut self.description,
            HostField::Contact => &mut self.contact,
            HostField::Comment => &mut self.comment,
            HostField::InterfaceCount => {
                return match value.trim().parse::<u32>() {
                    Ok(count) => {
                        self.interface_count = Some(count);
                        true
                    }
                    Err(_) => false,
                };
            }
        };

        *slot = Some(value);
        true
    }

    /// Text view of an identity field.
    pub fn field(&self, field: HostField) -> Option<String> {
        match field {
            HostField::SystemName => self.system_name.clone(),
            HostField::Manufacturer => self.manufacturer.clone(),
            HostField::Model => self.model.clone(),
            HostField::Firmware => self.firmware.clone(),
            HostField::SerialNumber => self.serial_number.clone(),
            HostField::Location => self.location.clone(),
            HostField::Description => self.description.clone(),
            HostField::Contact => self.contact.clone(),
            HostField::Comment => self.comment.clone(),
            HostField::InterfaceCount => self.interface_count.map(|count| count.to_string()),
        }
    }

    pub fn push_ip_address(&mut self, network: Ipv4Network) {
        self.ip_addresses.get_or_insert_with(Vec::new).push(network);
    }

    /// Collapses an empty address list back to absent.
    pub fn normalize_ip_addresses(&mut self) {
        if self.ip_addresses.as_ref().is_some_and(Vec::is_empty) {
            self.ip_addresses = None;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_all_absent() {
        let host = HostRecord::new(Ipv4Addr::new(192, 0, 2, 1));
        for field in HostField::ALL {
            assert_eq!(host.field(field), None, "{field:?}");
        }
        assert!(host.mac_address.is_none());
        assert!(host.ip_addresses.is_none());
        assert!(host.interfaces.is_empty());
        assert!(!host.reachable);
        assert!(!host.snmp_ok);
    }

    #[test]
    fn test_set_field_skips_empty_values() {
        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        assert!(!host.set_field(HostField::Location, String::new()));
        assert_eq!(host.location, None);

        assert!(host.set_field(HostField::Location, "Rack 4".into()));
        assert_eq!(host.location.as_deref(), Some("Rack 4"));
    }

    #[test]
    fn test_interface_count_must_be_numeric() {
        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        assert!(!host.set_field(HostField::InterfaceCount, "many".into()));
        assert!(!host.set_field(HostField::InterfaceCount, "-3".into()));
        assert_eq!(host.interface_count, None);

        assert!(host.set_field(HostField::InterfaceCount, "24".into()));
        assert_eq!(host.interface_count, Some(24));
        assert_eq!(host.field(HostField::InterfaceCount).as_deref(), Some("24"));
    }

    #[test]
    fn test_empty_ip_list_normalizes_to_absent() {
        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        host.ip_addresses = Some(Vec::new());
        host.normalize_ip_addresses();
        assert_eq!(host.ip_addresses, None);

        let net = Ipv4Network::new(Ipv4Addr::new(192, 0, 2, 10), 24).unwrap();
        host.push_ip_address(net);
        host.normalize_ip_addresses();
        assert_eq!(host.ip_addresses, Some(vec![net]));
    }

    #[test]
    fn test_labels_follow_report_columns() {
        let labels: Vec<&str> = HostField::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Sysname",
                "Manufacturer",
                "Model",
                "FW",
                "S/N",
                "Location",
                "Description",
                "Contact",
                "Comment",
                "Interfaces Count"
            ]
        );
    }
}
