use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use netaudit_common::network::host::{HostField, HostRecord};
use netaudit_common::network::interface::{InterfaceRecord, InterfaceStatus};
use pnet::ipnetwork::Ipv4Network;

pub type Detail = (String, ColoredString);

/// "D day(s) H hour(s) M min(s) and S second(s)", fractions truncated.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    format!("{days} day(s) {hours} hour(s) {minutes} min(s) and {seconds} second(s)")
}

pub fn cidr_to_colored(network: &Ipv4Network) -> ColoredString {
    let address: ColoredString = network.ip().to_string().color(colors::IPV4_ADDR);
    let prefix: ColoredString = network.prefix().to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

fn flag(value: bool) -> ColoredString {
    if value {
        "True".color(colors::STATUS_UP)
    } else {
        "False".color(colors::STATUS_DOWN)
    }
}

fn status(value: Option<InterfaceStatus>) -> String {
    value.map_or_else(|| "?".to_string(), |status| status.to_string())
}

/// Every report field of `host`, absent ones shown as `empty_value`.
pub fn host_to_detail(host: &HostRecord, empty_value: &str) -> Vec<Detail> {
    let mut details: Vec<Detail> = HostField::ALL
        .iter()
        .map(|field| {
            let value = match host.field(*field) {
                Some(text) => text.color(colors::TEXT_DEFAULT),
                None => empty_value.dimmed(),
            };
            (field.label().to_string(), value)
        })
        .collect();

    let mac = match host.mac_address {
        Some(mac) => mac.to_string().color(colors::MAC_ADDR),
        None => empty_value.dimmed(),
    };
    details.push(("MAC Address".to_string(), mac));

    let ips = match &host.ip_addresses {
        Some(list) => list
            .iter()
            .map(|network| cidr_to_colored(network).to_string())
            .collect::<Vec<String>>()
            .join(", ")
            .normal(),
        None => empty_value.dimmed(),
    };
    details.push(("IP Addresses".to_string(), ips));
    details.push(("PING".to_string(), flag(host.reachable)));
    details.push(("SNMP".to_string(), flag(host.snmp_ok)));
    details
}

/// One line per interface: name, description, status, addressing.
pub fn interfaces_to_detail(host: &HostRecord) -> Vec<Detail> {
    host.interfaces.iter().map(interface_to_detail).collect()
}

fn interface_to_detail(interface: &InterfaceRecord) -> Detail {
    let mut parts: Vec<String> = Vec::new();

    let label = match (&interface.name, &interface.description) {
        (Some(name), Some(description)) if name != description => {
            format!("{name} ({description})")
        }
        (Some(name), _) => name.clone(),
        (None, Some(description)) => description.clone(),
        (None, None) => "unnamed".to_string(),
    };
    parts.push(label.color(colors::PRIMARY).to_string());

    if let Some(alias) = &interface.alias {
        parts.push(format!("\"{alias}\"").italic().to_string());
    }

    let state = format!(
        "{}/{}",
        status(interface.admin_status),
        status(interface.oper_status)
    );
    let state = if interface.oper_status == Some(InterfaceStatus::Up) {
        state.color(colors::STATUS_UP)
    } else {
        state.color(colors::STATUS_DOWN)
    };
    parts.push(state.to_string());

    if let Some(cidr) = interface.cidr() {
        parts.push(cidr_to_colored(&cidr).to_string());
    }
    if let Some(mac) = interface.mac_address {
        parts.push(mac.to_string().color(colors::MAC_ADDR).to_string());
    }
    if let Some(mtu) = interface.mtu {
        parts.push(format!("mtu {mtu}"));
    }

    (format!("#{}", interface.index), parts.join(" ").normal())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
