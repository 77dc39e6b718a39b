//! # SNMP Engine
//!
//! Everything that talks SNMP goes through the [`SnmpAgent`] seam: one batched
//! GET or GET-NEXT exchange at a time, answered with varbinds or a typed
//! [`ExchangeError`]. The production agent ([`session::SessionDescriptor::open`])
//! wraps an `async-snmp` client; tests plug in an in-memory agent instead.
//!
//! On top of the seam sit the two request shapes the inventory pipeline needs:
//! * [`fetch`]: one batched GET mapped positionally onto host fields.
//! * [`walk`]: lock-step GET-NEXT over several table columns.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_snmp::{Oid, VarBind};
use async_trait::async_trait;
use thiserror::Error;

pub mod fetch;
pub mod oids;
pub mod session;
pub mod value;
pub mod walk;

/// Failure of a single protocol exchange.
///
/// Never fatal for a scan: the pipeline logs it and moves on to the next step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Transport-level trouble: timeout, unreachable agent, authentication
    /// failure, undecodable response.
    #[error("{0}")]
    Indication(String),

    /// The agent answered with a non-zero error-status. `index` is the 1-based
    /// position of the offending varbind, 0 when the agent did not say.
    #[error("{status} at index {index}")]
    Protocol { status: String, index: u32 },
}

impl ExchangeError {
    pub fn is_indication(&self) -> bool {
        matches!(self, Self::Indication(_))
    }

    /// The requested OID the agent blamed, if the index resolves.
    pub fn offending_oid<'a>(&self, requested: &'a [Oid]) -> Option<&'a Oid> {
        match self {
            Self::Protocol { index, .. } => index
                .checked_sub(1)
                .and_then(|position| requested.get(position as usize)),
            Self::Indication(_) => None,
        }
    }
}

impl From<Box<async_snmp::Error>> for ExchangeError {
    fn from(err: Box<async_snmp::Error>) -> Self {
        match *err {
            async_snmp::Error::Snmp { status, index, .. } => Self::Protocol {
                status: status.to_string(),
                index,
            },
            other => Self::Indication(other.to_string()),
        }
    }
}

/// One SNMP agent, as seen by the fetcher and the walker.
#[async_trait]
pub trait SnmpAgent: Send + Sync {
    /// Batched GET. Varbinds come back in request order.
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError>;

    /// Batched GET-NEXT. Varbinds come back in request order.
    async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError>;
}

#[async_trait]
impl<A: SnmpAgent + ?Sized> SnmpAgent for Arc<A> {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        (**self).get(oids).await
    }

    async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        (**self).get_next(oids).await
    }
}

/// Hands out an [`SnmpAgent`] per host.
#[async_trait]
pub trait AgentConnector: Send + Sync {
    async fn open(&self, host: Ipv4Addr) -> Result<Box<dyn SnmpAgent>, ExchangeError>;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
