//! # Subnet Inventory Driver
//!
//! Fans the per-host audit out over every address of the target. Each host is
//! an independent unit of work: ping, open an agent, audit. Up to
//! `cfg.concurrency` hosts are in flight at once and results come back in
//! address order whatever order they finish in.

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use netaudit_common::config::ScanConfig;
use netaudit_common::network::host::HostRecord;
use tracing::{debug, warn};

use crate::audit::audit_host;
use crate::network::icmp::Pinger;
use crate::snmp::{AgentConnector, ExchangeError};
use crate::vendors::VendorRegistry;

/// Audits every host and returns one record per address, in input order.
///
/// `on_progress` receives the number of hosts completed so far.
pub async fn perform_inventory(
    hosts: Vec<Ipv4Addr>,
    cfg: &ScanConfig,
    pinger: &dyn Pinger,
    connector: &dyn AgentConnector,
    vendors: &VendorRegistry,
    on_progress: Option<Box<dyn Fn(usize) + Send + Sync>>,
) -> Vec<HostRecord> {
    let completed = AtomicUsize::new(0);
    let completed = &completed;
    let on_progress = on_progress.as_deref();

    stream::iter(hosts)
        .map(|address| async move {
            let record = inventory_host(address, cfg, pinger, connector, vendors).await;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(callback) = on_progress {
                callback(done);
            }
            record
        })
        .buffered(cfg.concurrency.max(1))
        .collect()
        .await
}

async fn inventory_host(
    address: Ipv4Addr,
    cfg: &ScanConfig,
    pinger: &dyn Pinger,
    connector: &dyn AgentConnector,
    vendors: &VendorRegistry,
) -> HostRecord {
    let reachable = pinger.is_reachable(address).await;

    if !reachable && !cfg.ignore_ping {
        debug!("IP {address} [PING] - unreachable, skipping SNMP");
        return HostRecord::new(address);
    }

    match connector.open(address).await {
        Ok(agent) => audit_host(agent.as_ref(), address, reachable, cfg, vendors).await,
        Err(err) => {
            log_open_failure(address, &err, cfg.verbose);
            HostRecord::new(address).with_reachability(reachable)
        }
    }
}

fn log_open_failure(address: Ipv4Addr, err: &ExchangeError, verbose: bool) {
    if verbose || !err.is_indication() {
        warn!("IP {address} [SNMP - session] - {err}");
    } else {
        debug!("IP {address} [SNMP - session] - {err}");
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
