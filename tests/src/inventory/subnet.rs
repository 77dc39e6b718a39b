#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use netaudit_common::config::{
    AuthAlgorithm, ConfigError, PrivAlgorithm, ScanConfig, SnmpCredentials,
};
use netaudit_common::network::target::ScanTarget;
use netaudit_core::network::icmp::Pinger;
use netaudit_core::scanner::perform_inventory;
use netaudit_core::snmp::session::SessionDescriptor;
use netaudit_core::testing::{
    MockAgent, MockConnector, StaticPinger, fortigate_mib, interface_table, system_mib,
};
use netaudit_core::vendors::VendorRegistry;

/// Records which addresses were pinged.
#[derive(Default)]
struct RecordingPinger {
    reachable: HashSet<Ipv4Addr>,
    asked: Mutex<Vec<Ipv4Addr>>,
}

#[async_trait]
impl Pinger for RecordingPinger {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        self.asked.lock().unwrap().push(addr);
        self.reachable.contains(&addr)
    }
}

fn lab_network() -> (ScanTarget, MockConnector) {
    let target: ScanTarget = "192.0.2.0/29".parse().unwrap();
    let connector = MockConnector::new()
        .with_agent(
            Ipv4Addr::new(192, 0, 2, 1),
            MockAgent::from_data(fortigate_mib()),
        )
        .with_agent(
            Ipv4Addr::new(192, 0, 2, 2),
            MockAgent::from_data(system_mib()).with_data(interface_table(4)),
        )
        // Answers ping but has no SNMP data at all.
        .with_agent(Ipv4Addr::new(192, 0, 2, 3), MockAgent::new());
    (target, connector)
}

#[tokio::test]
async fn inventory_of_a_small_subnet() {
    let (target, connector) = lab_network();
    let pinger = StaticPinger::new([
        Ipv4Addr::new(192, 0, 2, 1),
        Ipv4Addr::new(192, 0, 2, 2),
        Ipv4Addr::new(192, 0, 2, 3),
    ]);

    let records = perform_inventory(
        target.addresses().collect(),
        &ScanConfig::default(),
        &pinger,
        &connector,
        &VendorRegistry::builtin(),
        None,
    )
    .await;

    assert_eq!(records.len(), target.host_count());
    assert_eq!(records.len(), 6);

    let addresses: Vec<String> = records.iter().map(|r| r.address.to_string()).collect();
    assert_eq!(addresses.first().map(String::as_str), Some("192.0.2.1"));
    assert_eq!(addresses.last().map(String::as_str), Some("192.0.2.6"));

    let firewall = &records[0];
    assert!(firewall.reachable && firewall.snmp_ok);
    assert_eq!(firewall.serial_number.as_deref(), Some("FGT60FTK00000000"));

    let switch = &records[1];
    assert_eq!(switch.interfaces.len(), 4);

    let silent = &records[2];
    assert!(silent.reachable);
    assert!(!silent.snmp_ok);

    for absent in &records[3..] {
        assert!(!absent.reachable && !absent.snmp_ok);
        assert!(absent.system_name.is_none());
    }
}

#[tokio::test]
async fn every_host_is_pinged_once() {
    let (target, connector) = lab_network();
    let pinger = RecordingPinger::default();
    let cfg = ScanConfig {
        concurrency: 3,
        ..ScanConfig::default()
    };

    let records = perform_inventory(
        target.addresses().collect(),
        &cfg,
        &pinger,
        &connector,
        &VendorRegistry::builtin(),
        None,
    )
    .await;

    let mut asked = pinger.asked.lock().unwrap().clone();
    asked.sort();
    assert_eq!(asked, target.addresses().collect::<Vec<_>>());
    assert!(records.iter().all(|r| !r.snmp_ok));
    assert_eq!(connector.agent(Ipv4Addr::new(192, 0, 2, 2)).unwrap().exchange_count(), 0);
}

#[tokio::test]
async fn ignore_ping_audits_silent_hosts() {
    let (target, connector) = lab_network();
    let cfg = ScanConfig {
        ignore_ping: true,
        ..ScanConfig::default()
    };

    let records = perform_inventory(
        target.addresses().collect(),
        &cfg,
        &StaticPinger::default(),
        &connector,
        &VendorRegistry::builtin(),
        None,
    )
    .await;

    assert!(records[0].snmp_ok && !records[0].reachable);
    assert!(records[1].snmp_ok);
    assert!(!records[5].snmp_ok);
}

#[test]
fn bad_credentials_fail_before_scanning() {
    let credentials = |auth, auth_key: Option<&str>, privacy, priv_key: Option<&str>| {
        SnmpCredentials {
            security_name: "monitor".into(),
            auth,
            auth_key: auth_key.map(String::from),
            privacy,
            priv_key: priv_key.map(String::from),
        }
    };
    let open = |c: &SnmpCredentials| SessionDescriptor::new(c, 161, Duration::from_secs(5), 0);

    let ok = credentials(AuthAlgorithm::Sha256, Some("authpass1"), PrivAlgorithm::Aes128, Some("privpass1"));
    assert!(open(&ok).is_ok());

    let no_auth = credentials(AuthAlgorithm::None, None, PrivAlgorithm::Des, Some("privpass1"));
    assert_eq!(
        open(&no_auth).err(),
        Some(ConfigError::PrivacyWithoutAuth(PrivAlgorithm::Des))
    );

    let short = credentials(AuthAlgorithm::Sha1, Some("short"), PrivAlgorithm::None, None);
    assert!(matches!(open(&short), Err(ConfigError::ShortKey(_))));

    let triple_des = credentials(AuthAlgorithm::Sha1, Some("authpass1"), PrivAlgorithm::TripleDes, Some("privpass1"));
    assert!(matches!(open(&triple_des), Err(ConfigError::UnsupportedPrivacy(_))));

    let weak_digest = credentials(AuthAlgorithm::Sha1, Some("authpass1"), PrivAlgorithm::Aes256, Some("privpass1"));
    assert!(matches!(open(&weak_digest), Err(ConfigError::IncompatibleAlgorithms { .. })));
}

#[test]
fn subnet_targets() {
    assert_eq!("192.0.2.0/24".parse::<ScanTarget>().unwrap().host_count(), 254);
    assert_eq!("192.0.2.9/32".parse::<ScanTarget>().unwrap().host_count(), 1);
    assert!(matches!(
        "192.0.2.5/24".parse::<ScanTarget>(),
        Err(ConfigError::InvalidNetwork(_))
    ));
    assert!(matches!(
        "192.0.2.0/31".parse::<ScanTarget>(),
        Err(ConfigError::NoHosts(_))
    ));
}
