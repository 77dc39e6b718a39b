#![cfg(test)]
use std::net::Ipv4Addr;

use async_snmp::Value;
use netaudit_common::config::ScanConfig;
use netaudit_common::network::host::{HostField, HostRecord};
use netaudit_common::network::interface::InterfaceStatus;
use netaudit_core::audit::audit_host;
use netaudit_core::snmp::{ExchangeError, oids};
use netaudit_core::testing::{
    MockAgent, fortigate_mib, interface_table, ip_address_table, system_mib,
};
use netaudit_core::vendors::VendorRegistry;

const HOST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

async fn audit(agent: &MockAgent, cfg: &ScanConfig) -> HostRecord {
    audit_host(agent, HOST, true, cfg, &VendorRegistry::builtin()).await
}

/// A distribution switch with two routed interfaces out of eight.
#[tokio::test]
async fn audit_distribution_switch() {
    let agent = MockAgent::from_data(system_mib())
        .with_data(interface_table(8))
        .with_data(ip_address_table(&[
            (1, Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(255, 255, 255, 0)),
            (8, Ipv4Addr::new(198, 51, 100, 9), Ipv4Addr::new(255, 255, 255, 248)),
        ]));

    let host = audit(&agent, &ScanConfig::default()).await;

    assert!(host.snmp_ok);
    assert_eq!(host.interface_count, Some(8));
    assert_eq!(host.interfaces.len(), 8);
    assert_eq!(host.mac_address.map(|mac| mac.to_string()).as_deref(), Some("00:11:22:33:44:01"));

    let cidrs: Vec<String> = host
        .ip_addresses
        .as_ref()
        .map(|list| list.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    assert_eq!(cidrs, vec!["192.0.2.1/24", "198.51.100.9/29"]);

    let order: Vec<u32> = host.interfaces.iter().map(|i| i.index).collect();
    assert_eq!(order, (1..=8).collect::<Vec<u32>>());

    let uplink = host.interfaces.get(8).unwrap();
    assert_eq!(uplink.name.as_deref(), Some("Eth8"));
    assert_eq!(uplink.alias.as_deref(), Some("uplink 8"));
    assert_eq!(uplink.oper_status, Some(InterfaceStatus::Up));
    assert_eq!(uplink.cidr().map(|c| c.to_string()).as_deref(), Some("198.51.100.9/29"));
}

/// No walk may exceed its budget, whichever table it reads.
#[tokio::test]
async fn audit_respects_iteration_budget() {
    let mut data = interface_table(64);
    data.remove(&oids::if_number());
    let agent = MockAgent::from_data(data);
    let cfg = ScanConfig {
        iteration_budget: 4,
        ..ScanConfig::default()
    };

    let host = audit(&agent, &cfg).await;

    assert_eq!(agent.walk_steps(&oids::if_phys_address()), 1);
    assert_eq!(agent.walk_steps(&oids::if_index()), 4);
    assert_eq!(agent.walk_steps(&oids::if_name()), 4);
    assert_eq!(host.interfaces.len(), 4);
}

#[tokio::test]
async fn audit_fortigate_firewall() {
    let agent = MockAgent::from_data(fortigate_mib()).with_data(interface_table(2));

    let host = audit(&agent, &ScanConfig::default()).await;

    assert_eq!(host.manufacturer.as_deref(), Some("Fortinet"));
    assert_eq!(host.firmware.as_deref(), Some("v7.2.5,build1517,230606 (GA.F)"));
    assert_eq!(host.serial_number.as_deref(), Some("FGT60FTK00000000"));
    assert_eq!(host.interfaces.len(), 2);
}

/// The firmware string carries the report delimiter; it must not survive.
#[tokio::test]
async fn audit_sanitizes_vendor_values() {
    let agent = MockAgent::from_data(fortigate_mib());
    let cfg = ScanConfig {
        delimiter: ",".into(),
        ..ScanConfig::default()
    };

    let host = audit(&agent, &cfg).await;
    assert_eq!(host.firmware.as_deref(), Some("v7.2.5 build1517 230606 (GA.F)"));
}

#[tokio::test]
async fn audit_agent_that_times_out_mid_walk() {
    // Exchanges: identity GET, MAC walk, then the ifTable walk rows.
    let agent = MockAgent::from_data(system_mib())
        .with_data(interface_table(6))
        .fail_exchange(4, ExchangeError::Indication("timeout".into()));

    let host = audit(&agent, &ScanConfig::default()).await;

    // Two ifTable rows made it before the timeout, ifXTable fills in the rest.
    assert_eq!(host.system_name.as_deref(), Some("sw-test-01"));
    assert!(host.interfaces.get(1).unwrap().description.is_some());
    assert!(host.interfaces.get(3).unwrap().description.is_none());
    assert_eq!(host.interfaces.get(3).unwrap().name.as_deref(), Some("Eth3"));
    assert_eq!(host.interfaces.len(), 6);
}

#[tokio::test]
async fn audit_agent_without_entity_mib() {
    let agent = MockAgent::new()
        .with(oids::sys_name(), "legacy-router")
        .with(oids::sys_descr(), "Router OS\r\nline two")
        .with(oids::if_number(), Value::Integer(-1));

    let host = audit(&agent, &ScanConfig::default()).await;

    assert_eq!(host.system_name.as_deref(), Some("legacy-router"));
    assert_eq!(host.description.as_deref(), Some("Router OS  line two"));
    assert_eq!(host.interface_count, None);
    for field in [HostField::Manufacturer, HostField::Model, HostField::SerialNumber] {
        assert_eq!(host.field(field), None);
    }
    assert_eq!(host.ip_addresses, None);
}
