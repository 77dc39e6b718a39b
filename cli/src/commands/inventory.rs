use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use netaudit_common::config::ScanConfig;
use netaudit_common::network::host::HostRecord;
use netaudit_common::network::target::ScanTarget;
use netaudit_core::network::icmp::IcmpPinger;
use netaudit_core::scanner;
use netaudit_core::snmp::session::SessionDescriptor;
use netaudit_core::vendors::VendorRegistry;
use tracing::{Instrument, info, info_span};

use crate::commands::CommandLine;
use crate::report;
use crate::terminal::{colors, format, print, spinner};
use crate::mprint;

pub async fn inventory(cli: &CommandLine) -> anyhow::Result<()> {
    let cfg: ScanConfig = cli.to_config();
    let target: ScanTarget = cli.net;
    let session = SessionDescriptor::from_config(&cfg).context("Invalid SNMP settings")?;

    print_parameters(&target, &cfg);

    let hosts = target.addresses().collect::<Vec<_>>();
    let start_time: Instant = Instant::now();

    spinner::start_progress(hosts.len());
    let records: Vec<HostRecord> = scanner::perform_inventory(
        hosts,
        &cfg,
        &IcmpPinger::new(),
        &session,
        &VendorRegistry::builtin(),
        Some(Box::new(spinner::report_inventory_progress)),
    )
    .instrument(info_span!("inventory", network = %target))
    .await;
    spinner::finish_progress();

    if cli.scan_res {
        print_results(&target, &records, &cfg);
    }

    print_summary(records.len(), start_time.elapsed());

    let path: PathBuf = cli
        .csv_report
        .clone()
        .unwrap_or_else(|| report::default_path(&target, chrono::Local::now().date_naive()));
    let content = report::render(&target, &records, &cfg.delimiter, &cfg.empty_value);
    info!("Exporting CSV report into \"{}\"", path.display());
    report::write_report(&path, &content)?;

    print::end_of_program();
    Ok(())
}

fn print_parameters(target: &ScanTarget, cfg: &ScanConfig) {
    print::header("scan parameters");
    let keys = ["Network", "Hosts", "User", "Security", "Agent port", "Timeout", "Jobs"];
    print::set_key_width(keys);

    let credentials = &cfg.credentials;
    print::aligned_line(keys[0], target.to_string().color(colors::IPV4_ADDR));
    print::aligned_line(keys[1], target.host_count().to_string());
    print::aligned_line(keys[2], credentials.security_name.as_str());
    print::aligned_line(
        keys[3],
        format!("{} / {}", credentials.auth, credentials.privacy),
    );
    print::aligned_line(keys[4], cfg.port.to_string());
    print::aligned_line(
        keys[5],
        format!("{}s, {} retries", cfg.timeout.as_secs(), cfg.retries),
    );
    print::aligned_line(keys[6], cfg.concurrency.to_string());
}

fn print_results(target: &ScanTarget, records: &[HostRecord], cfg: &ScanConfig) {
    print::header(&format!("results for {target}"));

    for (idx, host) in records.iter().enumerate() {
        let name = match &host.system_name {
            Some(name) => format!("{} ({name})", host.address),
            None => host.address.to_string(),
        };
        print::tree_head(idx, &name);
        print::as_tree_one_level(format::host_to_detail(host, &cfg.empty_value));

        let interfaces = format::interfaces_to_detail(host);
        if !interfaces.is_empty() {
            print::as_tree_two_levels(interfaces, true);
        }
        if idx + 1 != records.len() {
            mprint!();
        }
    }
}

fn print_summary(host_count: usize, elapsed: Duration) {
    let hosts: ColoredString = format!("{host_count} hosts").bold().green();
    let took: ColoredString = format::format_elapsed(elapsed).bold().yellow();
    let output: ColoredString =
        format!("{hosts} have been scanned in {took}.").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
}
