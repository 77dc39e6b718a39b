pub mod inventory;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use netaudit_common::config::{
    self, AuthAlgorithm, ConfigError, PrivAlgorithm, ScanConfig, SnmpCredentials,
};
use netaudit_common::network::target::ScanTarget;

#[derive(Parser)]
#[command(name = "netaudit")]
#[command(version)]
#[command(about = "SNMPv3 inventory of every host in an IPv4 subnet.")]
pub struct CommandLine {
    /// Network to scan, in CIDR form
    #[arg(short = 'r', long, alias = "network", value_name = "192.0.2.0/24")]
    pub net: ScanTarget,

    /// SNMPv3 security (user) name
    #[arg(long = "sec-name", alias = "sec_name", value_name = "snmp-user")]
    pub sec_name: String,

    /// Authentication protocol: none, md5, sha1, sha224, sha256, sha384, sha512
    #[arg(long = "auth-proto", alias = "auth_proto", default_value = "sha1", value_name = "sha1")]
    pub auth_proto: AuthAlgorithm,

    /// Authentication password
    #[arg(long = "auth-passwd", alias = "auth_passwd", value_name = "auth-pass")]
    pub auth_passwd: Option<String>,

    /// Privacy protocol: none, des, 3des, aes128, aes192, aes192b, aes256, aes256b
    #[arg(long = "priv-proto", alias = "priv_proto", default_value = "aes128", value_name = "aes128")]
    pub priv_proto: PrivAlgorithm,

    /// Privacy password
    #[arg(long = "priv-passwd", alias = "priv_passwd", value_name = "privacy-pass")]
    pub priv_passwd: Option<String>,

    /// SNMP agent UDP port
    #[arg(short, long, default_value_t = config::DEFAULT_SNMP_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Walk iteration limit (1, 2, 4 .. 8192, 16384)
    #[arg(long = "iter-lim", alias = "iter_lim", default_value_t = config::DEFAULT_ITERATION_BUDGET,
          value_parser = parse_iteration_budget)]
    pub iter_lim: u32,

    /// Retries per request after a timeout (0 .. 9)
    #[arg(long = "ret-cnt", alias = "ret_cnt", default_value_t = config::DEFAULT_RETRIES,
          value_parser = clap::value_parser!(u32).range(0..=9))]
    pub ret_cnt: u32,

    /// Request timeout in seconds (0 .. 600)
    #[arg(short, long, default_value_t = config::DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(0..=600))]
    pub timeout: u64,

    /// Query hosts over SNMP even if they do not answer ping
    #[arg(long = "ign-ping", alias = "ign_ping")]
    pub ign_ping: bool,

    /// CSV report path [default: "<date> – net-audit-report_net-<addr>_cidr-<prefix>.csv"]
    #[arg(long = "csv-report", alias = "csv_report", value_name = "Report.csv")]
    pub csv_report: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(long = "csv-delim", alias = "csv_delim", default_value = config::DEFAULT_DELIMITER)]
    pub csv_delim: String,

    /// Placeholder for values a device did not report
    #[arg(long = "empty-val", alias = "empty_val", default_value = config::DEFAULT_EMPTY_VALUE)]
    pub empty_val: String,

    /// Show SNMP timeouts and debug output while scanning
    #[arg(short, long)]
    pub verbose: bool,

    /// Print every host's results after the scan
    #[arg(long = "scan-res", alias = "scan_res")]
    pub scan_res: bool,

    /// Hosts audited at the same time (1 .. 256)
    #[arg(short, long, default_value_t = 1,
          value_parser = clap::value_parser!(u16).range(1..=256))]
    pub jobs: u16,
}

fn parse_iteration_budget(input: &str) -> Result<u32, ConfigError> {
    let budget = input
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(format!("'{input}' is not a number")))?;
    config::validate_iteration_budget(budget)
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> ScanConfig {
        ScanConfig {
            credentials: SnmpCredentials {
                security_name: self.sec_name.clone(),
                auth: self.auth_proto,
                auth_key: self.auth_passwd.clone(),
                privacy: self.priv_proto,
                priv_key: self.priv_passwd.clone(),
            },
            port: self.port,
            iteration_budget: self.iter_lim,
            retries: self.ret_cnt,
            timeout: Duration::from_secs(self.timeout),
            ignore_ping: self.ign_ping,
            verbose: self.verbose,
            delimiter: self.csv_delim.clone(),
            empty_value: self.empty_val.clone(),
            concurrency: usize::from(self.jobs),
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
