//! # Vendor Extension Registry
//!
//! Some vendors keep their real firmware version and serial number outside
//! ENTITY-MIB. A [`VendorExtension`] names the extra scalars to fetch for one
//! manufacturer, which [`HostField`] each answer overwrites, and a predicate
//! over the already-fetched identity that confirms the product line.
//!
//! Supporting a new vendor means registering another extension; the pipeline
//! itself does not change.

use async_snmp::Oid;
use netaudit_common::network::host::{HostField, HostRecord};

use crate::snmp::fetch::ScalarQuery;
use crate::snmp::oids;

#[derive(Debug, Clone)]
pub struct VendorExtension {
    /// Exact `entPhysicalMfgName` value this extension applies to.
    pub manufacturer: &'static str,
    pub product_line: &'static str,
    pub oids: &'static [&'static [u32]],
    /// Field written by the value at the same position in `oids`.
    pub remap: &'static [HostField],
    pub activates: fn(&HostRecord) -> bool,
}

impl VendorExtension {
    /// The extra fetch, one request per `(oid, field)` pair.
    pub fn query(&self) -> ScalarQuery {
        self.oids
            .iter()
            .zip(self.remap)
            .fold(ScalarQuery::new(), |query, (arcs, field)| {
                query.with(*field, Oid::from_slice(arcs))
            })
    }

    /// True when `host` is this vendor and product line.
    pub fn applies_to(&self, host: &HostRecord) -> bool {
        host.manufacturer.as_deref() == Some(self.manufacturer) && (self.activates)(host)
    }
}

/// Extensions keyed by manufacturer name.
#[derive(Debug, Clone, Default)]
pub struct VendorRegistry {
    extensions: Vec<VendorExtension>,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The extensions shipped with the tool.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(fortigate());
        registry
    }

    /// Adds `extension`, replacing any entry for the same manufacturer.
    pub fn register(&mut self, extension: VendorExtension) {
        self.extensions
            .retain(|known| known.manufacturer != extension.manufacturer);
        self.extensions.push(extension);
    }

    pub fn lookup(&self, manufacturer: &str) -> Option<&VendorExtension> {
        self.extensions
            .iter()
            .find(|extension| extension.manufacturer == manufacturer)
    }

    /// The extension that should run for `host`, if any.
    pub fn matching(&self, host: &HostRecord) -> Option<&VendorExtension> {
        let manufacturer = host.manufacturer.as_deref()?;
        self.lookup(manufacturer)
            .filter(|extension| extension.applies_to(host))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

fn fortigate() -> VendorExtension {
    VendorExtension {
        manufacturer: "Fortinet",
        product_line: "FortiGate",
        oids: &[oids::FG_SYS_VERSION, oids::FN_SYS_SERIAL],
        remap: &[HostField::Firmware, HostField::SerialNumber],
        activates: is_fortigate,
    }
}

fn is_fortigate(host: &HostRecord) -> bool {
    [&host.comment, &host.firmware]
        .into_iter()
        .flatten()
        .any(|text| text.contains("FortiGate"))
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
    use std::net::Ipv4Addr;

    fn fortinet_host(comment: Option<&str>, firmware: Option<&str>) -> HostRecord {
        let mut host = HostRecord::new(Ipv4Addr::new(192, 0, 2, 1));
        host.manufacturer = Some("Fortinet".into());
        host.comment = comment.map(String::from);
        host.firmware = firmware.map(String::from);
        host
    }

    #[test]
    fn test_fortigate_activation() {
        let registry = VendorRegistry::builtin();

        let by_comment = fortinet_host(Some("FortiGate-60F"), None);
        assert!(registry.matching(&by_comment).is_some());

        let by_firmware = fortinet_host(None, Some("FortiGate-100E v6.4"));
        assert!(registry.matching(&by_firmware).is_some());

        let other_product = fortinet_host(Some("FortiSwitch-124E"), Some("v7.0"));
        assert!(registry.matching(&other_product).is_none());

        let nothing_known = fortinet_host(None, None);
        assert!(registry.matching(&nothing_known).is_none());
    }

    #[test]
    fn test_manufacturer_must_match_exactly() {
        let registry = VendorRegistry::builtin();
        let mut host = fortinet_host(Some("FortiGate-60F"), None);
        host.manufacturer = Some("Fortinet Inc.".into());
        assert!(registry.matching(&host).is_none());

        host.manufacturer = None;
        assert!(registry.matching(&host).is_none());
    }

    #[test]
    fn test_fortigate_query_remaps_firmware_and_serial() {
        let registry = VendorRegistry::builtin();
        let extension = registry.lookup("Fortinet").unwrap();
        let query = extension.query();

        assert_eq!(query.fields(), vec![HostField::Firmware, HostField::SerialNumber]);
        let oids: Vec<String> = query.oids().iter().map(|oid| oid.to_string()).collect();
        assert_eq!(
            oids,
            vec!["1.3.6.1.4.1.12356.101.4.1.1.0", "1.3.6.1.4.1.12356.100.1.1.1.0"]
        );
    }

    #[test]
    fn test_register_replaces_same_manufacturer() {
        let mut registry = VendorRegistry::builtin();
        assert_eq!(registry.len(), 1);

        registry.register(VendorExtension {
            manufacturer: "Fortinet",
            product_line: "Everything",
            oids: &[],
            remap: &[],
            activates: |_| true,
        });
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Fortinet").unwrap().product_line, "Everything");

        registry.register(VendorExtension {
            manufacturer: "Example Networks",
            product_line: "EX",
            oids: &[],
            remap: &[],
            activates: |_| true,
        });
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("Example Networks").is_some());
    }
}
