//! # Host Audit
//!
//! Builds one [`HostRecord`] from one SNMP agent. The pipeline is fixed and
//! strictly sequential, since later steps depend on earlier answers:
//!
//! 1. identity fetch (system group, ENTITY-MIB, declared interface count)
//! 2. vendor extension fetch, when the registry matches the identity
//! 3. primary MAC, the first `ifPhysAddress` row
//! 4. physical interface attributes (`ifTable`)
//! 5. interface names and aliases (`ifXTable`)
//! 6. interface addresses (`ipAddrTable`)
//!
//! A failed step degrades its fields to absent and the pipeline moves on. The
//! audit always returns a record.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use async_snmp::{Oid, Value};
use netaudit_common::config::ScanConfig;
use netaudit_common::network::host::HostRecord;
use netaudit_common::network::interface::InterfaceStatus;
use netaudit_common::network::mac::mac_from_octets;
use netaudit_common::network::range::is_netmask;
use pnet::util::MacAddr;
use tracing::{debug, warn};

use crate::snmp::fetch::{ScalarQuery, fetch_scalars};
use crate::snmp::value::{is_usable, render_clean};
use crate::snmp::walk::{TableRow, TableWalk};
use crate::snmp::{ExchangeError, SnmpAgent, oids};
use crate::vendors::VendorRegistry;

/// Runs the full pipeline against `agent` and returns the record for
/// `address`.
pub async fn audit_host(
    agent: &dyn SnmpAgent,
    address: Ipv4Addr,
    reachable: bool,
    cfg: &ScanConfig,
    vendors: &VendorRegistry,
) -> HostRecord {
    let mut audit = HostAudit {
        agent,
        cfg,
        record: HostRecord::new(address).with_reachability(reachable),
    };

    audit.identity().await;
    audit.vendor_extension(vendors).await;
    audit.primary_mac().await;

    let budget = audit.interface_budget();
    audit.physical_interfaces(budget).await;
    audit.interface_names(budget).await;
    audit.interface_addresses(budget).await;

    audit.finish()
}

/// One `ipAddrTable` entry gathered across walk steps.
#[derive(Default)]
struct AddressEntry {
    if_index: Option<u32>,
    address: Option<Ipv4Addr>,
    mask: Option<Ipv4Addr>,
}

struct HostAudit<'a> {
    agent: &'a dyn SnmpAgent,
    cfg: &'a ScanConfig,
    record: HostRecord,
}

impl HostAudit<'_> {
    async fn identity(&mut self) {
        self.scalars("identity", &ScalarQuery::identity()).await;
    }

    async fn vendor_extension(&mut self, vendors: &VendorRegistry) {
        let Some(extension) = vendors.matching(&self.record) else {
            return;
        };
        debug!(
            "IP {} [SNMP - vendor] - {} {} detected",
            self.record.address, extension.manufacturer, extension.product_line
        );
        self.scalars("vendor", &extension.query()).await;
    }

    async fn primary_mac(&mut self) {
        self.walk("mac", vec![oids::if_phys_address()], 1, |record, row| {
            if let Some(mac) = row.value(0).and_then(mac_value) {
                record.mac_address = Some(mac);
            }
        })
        .await;
    }

    /// The declared interface count when positive, else the configured budget.
    fn interface_budget(&self) -> u32 {
        self.record
            .interface_count
            .filter(|count| *count > 0)
            .unwrap_or(self.cfg.iteration_budget)
    }

    async fn physical_interfaces(&mut self, budget: u32) {
        let columns = vec![
            oids::if_index(),
            oids::if_descr(),
            oids::if_type(),
            oids::if_mtu(),
            oids::if_phys_address(),
            oids::if_admin_status(),
            oids::if_oper_status(),
        ];
        let delimiter = self.cfg.delimiter.clone();

        self.walk("interfaces", columns, budget, |record, row| {
            for (column, index, value) in row.instances() {
                let interface = record.interfaces.entry(index);
                match column {
                    1 => {
                        if let Some(description) = render_clean(value, &delimiter) {
                            interface.description = Some(description);
                        }
                    }
                    2 => {
                        if let Some(if_type) = integer_value(value) {
                            interface.if_type = Some(if_type);
                        }
                    }
                    3 => {
                        if let Some(mtu) = integer_value(value) {
                            interface.mtu = Some(mtu);
                        }
                    }
                    4 => {
                        if let Some(mac) = mac_value(value) {
                            interface.mac_address = Some(mac);
                        }
                    }
                    5 => {
                        if let Some(status) = status_value(value) {
                            interface.admin_status = Some(status);
                        }
                    }
                    6 => {
                        if let Some(status) = status_value(value) {
                            interface.oper_status = Some(status);
                        }
                    }
                    _ => {}
                }
            }
        })
        .await;
    }

    async fn interface_names(&mut self, budget: u32) {
        let columns = vec![oids::if_name(), oids::if_alias()];
        let delimiter = self.cfg.delimiter.clone();

        self.walk("interface names", columns, budget, |record, row| {
            for (column, index, value) in row.instances() {
                let Some(text) = render_clean(value, &delimiter) else {
                    continue;
                };
                let interface = record.interfaces.entry(index);
                match column {
                    0 => interface.name = Some(text),
                    _ => interface.alias = Some(text),
                }
            }
        })
        .await;
    }

    async fn interface_addresses(&mut self, budget: u32) {
        let columns = vec![
            oids::ip_ad_ent_if_index(),
            oids::ip_ad_ent_addr(),
            oids::ip_ad_ent_net_mask(),
        ];

        // Keyed by the address suffix, since a column with gaps runs ahead.
        let mut entries: BTreeMap<Vec<u32>, AddressEntry> = BTreeMap::new();
        self.walk("ip addresses", columns, budget, |_, row| {
            for column in 0..3 {
                let (Some(key), Some(value)) = (row.suffix(column), row.value(column)) else {
                    continue;
                };
                let entry = entries.entry(key.to_vec()).or_default();
                match column {
                    0 => entry.if_index = index_value(value),
                    1 => entry.address = ip_value(value),
                    _ => entry.mask = ip_value(value),
                }
            }
        })
        .await;

        for entry in entries.into_values() {
            let Some(index) = entry.if_index else {
                continue;
            };
            let interface = self.record.interfaces.entry(index);

            // Address and mask are told apart by bit pattern, not by column.
            let mut has_address = false;
            for ip in [entry.address, entry.mask].into_iter().flatten() {
                if is_netmask(ip) {
                    interface.netmask = Some(ip);
                } else {
                    interface.ip_address = Some(ip);
                    has_address = true;
                }
            }

            if has_address {
                if let Some(cidr) = interface.cidr() {
                    self.record.push_ip_address(cidr);
                }
            }
        }
    }

    fn finish(mut self) -> HostRecord {
        self.record.normalize_ip_addresses();
        self.record
    }

    async fn scalars(&mut self, step: &str, query: &ScalarQuery) {
        match fetch_scalars(self.agent, query, &self.cfg.delimiter).await {
            Ok(response) => {
                if response.has_usable() {
                    self.record.snmp_ok = true;
                }
                response.apply(query, &mut self.record);
            }
            Err(err) => self.report(step, &err, &query.oids()),
        }
    }

    async fn walk<F>(&mut self, step: &str, columns: Vec<Oid>, budget: u32, mut on_row: F)
    where
        F: FnMut(&mut HostRecord, &TableRow),
    {
        let mut walk = TableWalk::new(self.agent, columns, budget);

        while let Some(outcome) = walk.next().await {
            match outcome {
                Ok(row) => {
                    if row.cells().iter().flatten().any(|cell| is_usable(&cell.value)) {
                        self.record.snmp_ok = true;
                    }
                    on_row(&mut self.record, &row);
                }
                Err(err) => self.report(step, &err, walk.columns()),
            }
        }
    }

    fn report(&self, step: &str, err: &ExchangeError, requested: &[Oid]) {
        let host = self.record.address;
        match err {
            ExchangeError::Indication(message) if self.cfg.verbose => {
                warn!("IP {host} [SNMP - {step}] - {message}");
            }
            ExchangeError::Indication(message) => {
                debug!("IP {host} [SNMP - {step}] - {message}");
            }
            ExchangeError::Protocol { status, .. } => {
                let culprit = err
                    .offending_oid(requested)
                    .map(Oid::to_string)
                    .unwrap_or_else(|| "?".to_string());
                warn!("IP {host} [SNMP - {step}] - {status} at {culprit}");
            }
        }
    }
}

fn integer_value(value: &Value) -> Option<i32> {
    match value {
        Value::Integer(v) => Some(*v),
        _ => None,
    }
}

fn index_value(value: &Value) -> Option<u32> {
    integer_value(value)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|index| *index > 0)
}

fn status_value(value: &Value) -> Option<InterfaceStatus> {
    integer_value(value).and_then(InterfaceStatus::from_code)
}

fn mac_value(value: &Value) -> Option<MacAddr> {
    match value {
        Value::OctetString(bytes) => mac_from_octets(bytes),
        _ => None,
    }
}

fn ip_value(value: &Value) -> Option<Ipv4Addr> {
    match value {
        Value::IpAddress(octets) => Some(Ipv4Addr::from(*octets)),
        _ => None,
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
