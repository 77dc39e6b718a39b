//! # CSV Report
//!
//! One header line, then one line per scanned host in subnet order. Fields
//! were sanitized against the delimiter when they were fetched, so nothing is
//! quoted here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use netaudit_common::network::host::{HostField, HostRecord};
use netaudit_common::network::target::ScanTarget;

const LEADING_COLUMNS: [&str; 2] = ["Network", "Host"];
const TRAILING_COLUMNS: [&str; 4] = ["MAC Address", "IP Addresses", "PING", "SNMP"];

pub fn header(delimiter: &str) -> String {
    LEADING_COLUMNS
        .into_iter()
        .chain(HostField::ALL.iter().map(|field| field.label()))
        .chain(TRAILING_COLUMNS)
        .collect::<Vec<&str>>()
        .join(delimiter)
}

pub fn row(target: &ScanTarget, host: &HostRecord, delimiter: &str, empty_value: &str) -> String {
    let or_empty = |value: Option<String>| value.unwrap_or_else(|| empty_value.to_string());

    let mut cells: Vec<String> = vec![target.to_string(), host.address.to_string()];
    cells.extend(HostField::ALL.iter().map(|field| or_empty(host.field(*field))));
    cells.push(or_empty(host.mac_address.map(|mac| mac.to_string())));
    cells.push(or_empty(host.ip_addresses.as_ref().map(|list| {
        list.iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    })));
    cells.push(bool_cell(host.reachable));
    cells.push(bool_cell(host.snmp_ok));
    cells.join(delimiter)
}

fn bool_cell(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// The whole report, newline-terminated.
pub fn render(target: &ScanTarget, hosts: &[HostRecord], delimiter: &str, empty_value: &str) -> String {
    let mut content = header(delimiter);
    content.push('\n');
    for host in hosts {
        content.push_str(&row(target, host, delimiter, empty_value));
        content.push('\n');
    }
    content
}

/// `<date> – net-audit-report_net-<addr>_cidr-<prefix>.csv` in the working
/// directory.
pub fn default_path(target: &ScanTarget, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "{} – net-audit-report_net-{}_cidr-{}.csv",
        date.format("%Y-%m-%d"),
        target.network_addr(),
        target.prefix()
    ))
}

pub fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write the CSV report to \"{}\"", path.display()))
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
    use pnet::ipnetwork::Ipv4Network;
    use pnet::util::MacAddr;
    use std::net::Ipv4Addr;

    fn target() -> ScanTarget {
        "192.0.2.0/24".parse().unwrap()
    }

    #[test]
    fn test_header_columns() {
        assert_eq!(
            header(";"),
            "Network;Host;Sysname;Manufacturer;Model;FW;S/N;Location;Description;\
             Contact;Comment;Interfaces Count;MAC Address;IP Addresses;PING;SNMP"
        );
    }

    #[test]
    fn test_unscanned_host_row() {
        let host = HostRecord::new(Ipv4Addr::new(192, 0, 2, 7));
        assert_eq!(
            row(&target(), &host, ";", "N/A"),
            "192.0.2.0/24;192.0.2.7;N/A;N/A;N/A;N/A;N/A;N/A;N/A;N/A;N/A;N/A;N/A;N/A;False;False"
        );
    }

    #[test]
    fn test_populated_host_row() {
        let mut host = HostRecord::new(Ipv4Addr::new(192, 0, 2, 1)).with_reachability(true);
        host.snmp_ok = true;
        host.system_name = Some("sw-01".into());
        host.interface_count = Some(24);
        host.mac_address = Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22));
        host.push_ip_address(Ipv4Network::new(Ipv4Addr::new(192, 0, 2, 1), 24).unwrap());
        host.push_ip_address(Ipv4Network::new(Ipv4Addr::new(10, 0, 0, 1), 8).unwrap());

        let line = row(&target(), &host, ",", "-");
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells[2], "sw-01");
        assert_eq!(cells[11], "24");
        assert_eq!(cells[12], "aa:bb:cc:00:11:22");
        // The address list uses ", " itself.
        assert_eq!(cells[13], "192.0.2.1/24");
        assert_eq!(cells[14], " 10.0.0.1/8");
        assert_eq!(cells[15], "True");
        assert_eq!(cells[16], "True");
    }

    #[test]
    fn test_render_has_one_line_per_host() {
        let hosts = vec![
            HostRecord::new(Ipv4Addr::new(192, 0, 2, 1)),
            HostRecord::new(Ipv4Addr::new(192, 0, 2, 2)),
        ];
        let content = render(&target(), &hosts, ";", "N/A");
        assert_eq!(content.lines().count(), 3);
        assert!(content.ends_with('\n'));
        assert!(content.lines().nth(2).unwrap().starts_with("192.0.2.0/24;192.0.2.2;"));
    }

    #[test]
    fn test_default_path() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            default_path(&target(), date),
            PathBuf::from("2024-03-09 – net-audit-report_net-192.0.2.0_cidr-24.csv")
        );
    }

    #[test]
    fn test_write_failure_names_the_path() {
        let path = Path::new("/nonexistent-dir/netaudit/report.csv");
        let err = write_report(path, "x").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/netaudit/report.csv"));
    }
}
