//! # Scan Configuration
//!
//! The fully resolved settings bundle handed to the inventory engine, plus the
//! closed enumerations of SNMPv3 authentication and privacy algorithms.
//!
//! Everything here is validated once, before the first host is touched. A bad
//! value is a [`ConfigError`], never a per-host failure.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SNMP_PORT: u16 = 161;
pub const DEFAULT_ITERATION_BUDGET: u32 = 256;
pub const MAX_ITERATION_BUDGET: u32 = 16_384;
pub const DEFAULT_RETRIES: u32 = 0;
pub const MAX_RETRIES: u32 = 9;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_DELIMITER: &str = ";";
pub const DEFAULT_EMPTY_VALUE: &str = "N/A";

/// Minimum USM password length (RFC 3414, section 11.2).
pub const MIN_KEY_LEN: usize = 8;

/// Fatal problems detected before scanning begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("network address is incorrect: {0}")]
    InvalidNetwork(String),

    #[error("there are no hosts to scan in {0}")]
    NoHosts(String),

    #[error("unknown {kind} protocol '{input}'")]
    UnknownAlgorithm { kind: &'static str, input: String },

    #[error("privacy protocol {0} requires an authentication protocol")]
    PrivacyWithoutAuth(PrivAlgorithm),

    #[error("{0} requires a password")]
    MissingKey(String),

    #[error("{0} password must be at least 8 characters")]
    ShortKey(String),

    #[error("privacy protocol {0} is not supported by the SNMP transport")]
    UnsupportedPrivacy(PrivAlgorithm),

    #[error("authentication protocol {auth} cannot key privacy protocol {privacy}")]
    IncompatibleAlgorithms {
        auth: AuthAlgorithm,
        privacy: PrivAlgorithm,
    },

    #[error("iteration limit {0} must be a power of two between 1 and 16384")]
    InvalidIterationBudget(u32),

    #[error("{0}")]
    Invalid(String),
}

/// SNMPv3 authentication protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthAlgorithm {
    None,
    Md5,
    #[default]
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl AuthAlgorithm {
    pub const NAMES: &'static [&'static str] =
        &["none", "md5", "sha1", "sha224", "sha256", "sha384", "sha512"];

    /// Length in bytes of the localized key this protocol produces.
    pub fn key_len(self) -> usize {
        match self {
            Self::None => 0,
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl FromStr for AuthAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "md5" => Ok(Self::Md5),
            "sha" | "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ConfigError::UnknownAlgorithm {
                kind: "authentication",
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AuthAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        };
        f.write_str(name)
    }
}

/// SNMPv3 privacy protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivAlgorithm {
    None,
    Des,
    TripleDes,
    #[default]
    Aes128,
    Aes192,
    /// AES-192 with the Blumenthal key extension (draft-blumenthal-aes-usm-04).
    Aes192Blumenthal,
    Aes256,
    /// AES-256 with the Blumenthal key extension (draft-blumenthal-aes-usm-04).
    Aes256Blumenthal,
}

impl PrivAlgorithm {
    pub const NAMES: &'static [&'static str] = &[
        "none", "des", "3des", "aes128", "aes192", "aes192b", "aes256", "aes256b",
    ];

    /// Key material the cipher needs from the localized authentication key.
    pub fn key_len(self) -> usize {
        match self {
            Self::None => 0,
            Self::Des | Self::Aes128 => 16,
            Self::TripleDes | Self::Aes256 | Self::Aes256Blumenthal => 32,
            Self::Aes192 | Self::Aes192Blumenthal => 24,
        }
    }
}

impl FromStr for PrivAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "des" => Ok(Self::Des),
            "3des" => Ok(Self::TripleDes),
            "aes" | "aes128" => Ok(Self::Aes128),
            "aes192" => Ok(Self::Aes192),
            "aes192b" => Ok(Self::Aes192Blumenthal),
            "aes256" => Ok(Self::Aes256),
            "aes256b" => Ok(Self::Aes256Blumenthal),
            _ => Err(ConfigError::UnknownAlgorithm {
                kind: "privacy",
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PrivAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Des => "DES",
            Self::TripleDes => "3DES",
            Self::Aes128 => "AES128",
            Self::Aes192 => "AES192",
            Self::Aes192Blumenthal => "AES192 Blumenthal",
            Self::Aes256 => "AES256",
            Self::Aes256Blumenthal => "AES256 Blumenthal",
        };
        f.write_str(name)
    }
}

/// SNMPv3 user-based security credentials.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SnmpCredentials {
    pub security_name: String,
    pub auth: AuthAlgorithm,
    pub auth_key: Option<String>,
    pub privacy: PrivAlgorithm,
    pub priv_key: Option<String>,
}

// Keys stay out of logs.
impl fmt::Debug for SnmpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnmpCredentials")
            .field("security_name", &self.security_name)
            .field("auth", &self.auth)
            .field("privacy", &self.privacy)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub credentials: SnmpCredentials,
    /// UDP port of the remote SNMP agent.
    pub port: u16,
    /// Upper bound of GET-NEXT steps per table walk, unless the device
    /// advertises its own interface count.
    pub iteration_budget: u32,
    /// Resends after a timeout, per request.
    pub retries: u32,
    pub timeout: Duration,
    /// Query hosts over SNMP even when they do not answer ICMP echo.
    pub ignore_ping: bool,
    /// Surfaces transport indications (timeouts, unreachable agents) as warnings.
    pub verbose: bool,
    /// Report field delimiter. Also stripped from every fetched value.
    pub delimiter: String,
    pub empty_value: String,
    /// Hosts audited at the same time.
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            credentials: SnmpCredentials::default(),
            port: DEFAULT_SNMP_PORT,
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            retries: DEFAULT_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ignore_ping: false,
            verbose: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
            empty_value: DEFAULT_EMPTY_VALUE.to_string(),
            concurrency: 1,
        }
    }
}

/// Checks that an iteration limit is one of 1, 2, 4 .. 16384.
pub fn validate_iteration_budget(budget: u32) -> Result<u32, ConfigError> {
    if budget.is_power_of_two() && budget <= MAX_ITERATION_BUDGET {
        Ok(budget)
    } else {
        Err(ConfigError::InvalidIterationBudget(budget))
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
