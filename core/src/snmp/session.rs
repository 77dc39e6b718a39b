//! # Protocol Session
//!
//! [`SessionDescriptor`] is the immutable, validated SNMPv3 context shared by
//! every host of a scan. Building one performs no I/O; every credential problem
//! is a [`ConfigError`] raised before the first host is touched.
//!
//! [`SessionDescriptor::open`] binds an `async-snmp` client to one host. Engine
//! discovery and key localization happen lazily on its first exchange.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_snmp::client::Retry;
use async_snmp::{Auth, AuthProtocol, Client, Oid, PrivProtocol, VarBind, WalkMode};
use async_trait::async_trait;
use netaudit_common::config::{
    AuthAlgorithm, ConfigError, MIN_KEY_LEN, PrivAlgorithm, ScanConfig, SnmpCredentials,
};
use tracing::debug;

use super::{AgentConnector, ExchangeError, SnmpAgent};

#[derive(Clone)]
pub struct SessionDescriptor {
    security_name: String,
    auth: Option<(AuthProtocol, String)>,
    privacy: Option<(PrivProtocol, String)>,
    port: u16,
    timeout: Duration,
    retries: u32,
}

impl SessionDescriptor {
    pub fn new(
        credentials: &SnmpCredentials,
        port: u16,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self, ConfigError> {
        if credentials.auth == AuthAlgorithm::None && credentials.privacy != PrivAlgorithm::None {
            return Err(ConfigError::PrivacyWithoutAuth(credentials.privacy));
        }

        let auth = match auth_protocol(credentials.auth) {
            Some(protocol) => {
                let key = checked_key(&credentials.auth_key, "authentication")?;
                Some((protocol, key))
            }
            None => None,
        };

        let privacy = match priv_protocol(credentials.privacy)? {
            Some(protocol) => {
                let key = checked_key(&credentials.priv_key, "privacy")?;
                if credentials.auth.key_len() < credentials.privacy.key_len() {
                    return Err(ConfigError::IncompatibleAlgorithms {
                        auth: credentials.auth,
                        privacy: credentials.privacy,
                    });
                }
                Some((protocol, key))
            }
            None => None,
        };

        Ok(Self {
            security_name: credentials.security_name.clone(),
            auth,
            privacy,
            port,
            timeout,
            retries,
        })
    }

    pub fn from_config(cfg: &ScanConfig) -> Result<Self, ConfigError> {
        Self::new(&cfg.credentials, cfg.port, cfg.timeout, cfg.retries)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn security_name(&self) -> &str {
        &self.security_name
    }

    fn usm(&self) -> Auth {
        let mut usm = Auth::usm(self.security_name.clone());
        if let Some((protocol, key)) = &self.auth {
            usm = usm.auth(*protocol, key.clone());
        }
        if let Some((protocol, key)) = &self.privacy {
            usm = usm.privacy(*protocol, key.clone());
        }
        usm.into()
    }

    /// Binds a client for `host`. Failure here only affects that host.
    pub async fn open(&self, host: Ipv4Addr) -> Result<Box<dyn SnmpAgent>, ExchangeError> {
        let target = format!("{host}:{}", self.port);
        debug!("Opening SNMPv3 session to {target} as '{}'", self.security_name);

        let client = Client::builder(target, self.usm())
            .timeout(self.timeout)
            .retry(Retry::fixed(self.retries, Duration::ZERO))
            .walk_mode(WalkMode::GetNext)
            .connect()
            .await?;

        Ok(Box::new(ClientAgent { client }))
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for SessionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDescriptor")
            .field("security_name", &self.security_name)
            .field("auth", &self.auth.as_ref().map(|(protocol, _)| protocol))
            .field("privacy", &self.privacy.as_ref().map(|(protocol, _)| protocol))
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}

#[async_trait]
impl AgentConnector for SessionDescriptor {
    async fn open(&self, host: Ipv4Addr) -> Result<Box<dyn SnmpAgent>, ExchangeError> {
        SessionDescriptor::open(self, host).await
    }
}

fn auth_protocol(algorithm: AuthAlgorithm) -> Option<AuthProtocol> {
    match algorithm {
        AuthAlgorithm::None => None,
        AuthAlgorithm::Md5 => Some(AuthProtocol::Md5),
        AuthAlgorithm::Sha1 => Some(AuthProtocol::Sha1),
        AuthAlgorithm::Sha224 => Some(AuthProtocol::Sha224),
        AuthAlgorithm::Sha256 => Some(AuthProtocol::Sha256),
        AuthAlgorithm::Sha384 => Some(AuthProtocol::Sha384),
        AuthAlgorithm::Sha512 => Some(AuthProtocol::Sha512),
    }
}

fn priv_protocol(algorithm: PrivAlgorithm) -> Result<Option<PrivProtocol>, ConfigError> {
    match algorithm {
        PrivAlgorithm::None => Ok(None),
        PrivAlgorithm::Des => Ok(Some(PrivProtocol::Des)),
        PrivAlgorithm::Aes128 => Ok(Some(PrivProtocol::Aes128)),
        PrivAlgorithm::Aes192 => Ok(Some(PrivProtocol::Aes192)),
        PrivAlgorithm::Aes256 => Ok(Some(PrivProtocol::Aes256)),
        PrivAlgorithm::TripleDes
        | PrivAlgorithm::Aes192Blumenthal
        | PrivAlgorithm::Aes256Blumenthal => Err(ConfigError::UnsupportedPrivacy(algorithm)),
    }
}

fn checked_key(key: &Option<String>, role: &str) -> Result<String, ConfigError> {
    match key.as_deref() {
        None | Some("") => Err(ConfigError::MissingKey(role.to_string())),
        Some(key) if key.chars().count() < MIN_KEY_LEN => {
            Err(ConfigError::ShortKey(role.to_string()))
        }
        Some(key) => Ok(key.to_string()),
    }
}

/// [`SnmpAgent`] over a live `async-snmp` client.
struct ClientAgent {
    client: Client,
}

#[async_trait]
impl SnmpAgent for ClientAgent {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        Ok(self.client.get_many(oids).await?)
    }

    async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        Ok(self.client.get_next_many(oids).await?)
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
