//! In-memory doubles for the engine's seams.
//!
//! [`MockAgent`] answers GET and GET-NEXT from a sorted OID map exactly the way
//! an SNMP agent would, records every exchange, and can be scripted to fail
//! chosen exchanges. The fixture builders mirror what real switches expose.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::Ipv4Addr;
use std::ops::Bound;
use std::sync::{Arc, Mutex};

use async_snmp::{Oid, Value, VarBind, oid};
use async_trait::async_trait;

use crate::network::icmp::Pinger;
use crate::snmp::{AgentConnector, ExchangeError, SnmpAgent, oids};

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum Exchange {
    Get(Vec<Oid>),
    GetNext(Vec<Oid>),
}

impl Exchange {
    pub fn oids(&self) -> &[Oid] {
        match self {
            Exchange::Get(oids) | Exchange::GetNext(oids) => oids,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockAgent {
    data: BTreeMap<Oid, Value>,
    get_response: Option<Vec<VarBind>>,
    failing_exchanges: HashMap<usize, ExchangeError>,
    failing_walks: Vec<(Oid, ExchangeError)>,
    log: Mutex<Vec<Exchange>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: BTreeMap<Oid, Value>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with(mut self, oid: Oid, value: impl Into<Value>) -> Self {
        self.data.insert(oid, value.into());
        self
    }

    pub fn with_data(mut self, data: BTreeMap<Oid, Value>) -> Self {
        self.data.extend(data);
        self
    }

    /// Every GET is answered with exactly these varbinds, whatever was asked.
    pub fn with_get_response(mut self, varbinds: Vec<(Oid, Value)>) -> Self {
        self.get_response = Some(
            varbinds
                .into_iter()
                .map(|(oid, value)| VarBind::new(oid, value))
                .collect(),
        );
        self
    }

    /// The `n`-th exchange (0-based, GET and GET-NEXT alike) fails with `err`.
    pub fn fail_exchange(mut self, n: usize, err: ExchangeError) -> Self {
        self.failing_exchanges.insert(n, err);
        self
    }

    /// Every GET-NEXT touching the subtree of `column` fails with `err`.
    pub fn fail_walk(mut self, column: Oid, err: ExchangeError) -> Self {
        self.failing_walks.push((column, err));
        self
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.lock_log().clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.lock_log().len()
    }

    /// GET-NEXT exchanges whose first OID lies under `column`.
    pub fn walk_steps(&self, column: &Oid) -> usize {
        self.lock_log()
            .iter()
            .filter(|exchange| matches!(exchange, Exchange::GetNext(_)))
            .filter(|exchange| {
                exchange
                    .oids()
                    .first()
                    .is_some_and(|first| first.starts_with(column))
            })
            .count()
    }

    fn lock_log(&self) -> std::sync::MutexGuard<'_, Vec<Exchange>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, exchange: Exchange) -> Result<(), ExchangeError> {
        let mut log = self.lock_log();
        let position = log.len();
        let walk_failure = match &exchange {
            Exchange::GetNext(oids) => self
                .failing_walks
                .iter()
                .find(|(column, _)| oids.iter().any(|oid| oid.starts_with(column)))
                .map(|(_, err)| err.clone()),
            Exchange::Get(_) => None,
        };
        log.push(exchange);

        if let Some(err) = self.failing_exchanges.get(&position) {
            return Err(err.clone());
        }
        walk_failure.map_or(Ok(()), Err)
    }

    fn lookup(&self, oid: &Oid) -> VarBind {
        let value = self.data.get(oid).cloned().unwrap_or(Value::NoSuchObject);
        VarBind::new(oid.clone(), value)
    }

    fn successor(&self, oid: &Oid) -> VarBind {
        match self
            .data
            .range((Bound::Excluded(oid.clone()), Bound::Unbounded))
            .next()
        {
            Some((next, value)) => VarBind::new(next.clone(), value.clone()),
            None => VarBind::new(oid.clone(), Value::EndOfMibView),
        }
    }
}

#[async_trait]
impl SnmpAgent for MockAgent {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        self.record(Exchange::Get(oids.to_vec()))?;
        if let Some(response) = &self.get_response {
            return Ok(response.clone());
        }
        Ok(oids.iter().map(|oid| self.lookup(oid)).collect())
    }

    async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>, ExchangeError> {
        self.record(Exchange::GetNext(oids.to_vec()))?;
        Ok(oids.iter().map(|oid| self.successor(oid)).collect())
    }
}

/// Hands out shared [`MockAgent`]s by address. Unknown addresses fail to open.
#[derive(Debug, Default)]
pub struct MockConnector {
    agents: HashMap<Ipv4Addr, Arc<MockAgent>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, host: Ipv4Addr, agent: MockAgent) -> Self {
        self.agents.insert(host, Arc::new(agent));
        self
    }

    pub fn agent(&self, host: Ipv4Addr) -> Option<&MockAgent> {
        self.agents.get(&host).map(Arc::as_ref)
    }
}

#[async_trait]
impl AgentConnector for MockConnector {
    async fn open(&self, host: Ipv4Addr) -> Result<Box<dyn SnmpAgent>, ExchangeError> {
        match self.agents.get(&host) {
            Some(agent) => Ok(Box::new(Arc::clone(agent))),
            None => Err(ExchangeError::Indication(format!(
                "No SNMP response received before timeout from {host}"
            ))),
        }
    }
}

/// Answers echo for a fixed set of addresses.
#[derive(Debug, Default, Clone)]
pub struct StaticPinger {
    reachable: HashSet<Ipv4Addr>,
}

impl StaticPinger {
    pub fn new(reachable: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        Self {
            reachable: reachable.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Pinger for StaticPinger {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        self.reachable.contains(&addr)
    }
}

// -- Fixtures --

/// System group plus ENTITY-MIB identity of a generic switch.
pub fn system_mib() -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();
    data.insert(oids::sys_descr(), Value::OctetString("Test Switch OS 1.0".into()));
    data.insert(oids::sys_contact(), Value::OctetString("noc@example.net".into()));
    data.insert(oids::sys_name(), Value::OctetString("sw-test-01".into()));
    data.insert(oids::sys_location(), Value::OctetString("Lab rack 2".into()));
    data.insert(oids::ent_physical_software_rev(), Value::OctetString("1.0.4".into()));
    data.insert(oids::ent_physical_serial_num(), Value::OctetString("SN0001".into()));
    data.insert(oids::ent_physical_mfg_name(), Value::OctetString("Example Networks".into()));
    data.insert(oids::ent_physical_model_name(), Value::OctetString("EX-24".into()));
    data
}

/// `ifNumber` plus `count` rows of `ifTable` and `ifXTable`.
///
/// Interface `i` is `eth{i-1}`, MAC `00:11:22:33:44:{i}`, MTU 1500, up/up.
pub fn interface_table(count: u32) -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();
    data.insert(oids::if_number(), Value::Integer(count as i32));

    for i in 1..=count {
        data.insert(oids::if_index().child(i), Value::Integer(i as i32));
        data.insert(
            oids::if_descr().child(i),
            Value::OctetString(format!("eth{}", i - 1).into()),
        );
        data.insert(oids::if_type().child(i), Value::Integer(6));
        data.insert(oids::if_mtu().child(i), Value::Integer(1500));
        data.insert(
            oids::if_phys_address().child(i),
            Value::OctetString(vec![0x00, 0x11, 0x22, 0x33, 0x44, i as u8].into()),
        );
        data.insert(oids::if_admin_status().child(i), Value::Integer(1));
        data.insert(oids::if_oper_status().child(i), Value::Integer(1));
        data.insert(
            oids::if_name().child(i),
            Value::OctetString(format!("Eth{i}").into()),
        );
        data.insert(
            oids::if_alias().child(i),
            Value::OctetString(format!("uplink {i}").into()),
        );
    }
    data
}

/// `ipAddrTable` rows of `(ifIndex, address, mask)`.
pub fn ip_address_table(entries: &[(u32, Ipv4Addr, Ipv4Addr)]) -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();
    for &(if_index, address, mask) in entries {
        let row = |column: Oid| -> Oid {
            let mut arcs = column.arcs().to_vec();
            arcs.extend(address.octets().map(u32::from));
            Oid::from_slice(&arcs)
        };
        data.insert(row(oids::ip_ad_ent_addr()), Value::IpAddress(address.octets()));
        data.insert(row(oids::ip_ad_ent_if_index()), Value::Integer(if_index as i32));
        data.insert(row(oids::ip_ad_ent_net_mask()), Value::IpAddress(mask.octets()));
    }
    data
}

/// Fortinet identity as seen on a FortiGate firewall.
pub fn fortigate_mib() -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();
    data.insert(oids::sys_name(), Value::OctetString("fgt-edge".into()));
    data.insert(oids::ent_physical_mfg_name(), Value::OctetString("Fortinet".into()));
    data.insert(oids::ent_physical_model_name(), Value::OctetString("FGT60F".into()));
    data.insert(
        oids::ent_physical_software_rev(),
        Value::OctetString("FortiGate-60F v7.2.5".into()),
    );
    data.insert(oids::ent_logical_descr(), Value::OctetString("FortiGate-60F".into()));
    data.insert(
        Oid::from_slice(oids::FG_SYS_VERSION),
        Value::OctetString("v7.2.5,build1517,230606 (GA.F)".into()),
    );
    data.insert(
        Oid::from_slice(oids::FN_SYS_SERIAL),
        Value::OctetString("FGT60FTK00000000".into()),
    );
    data
}

/// An OID outside every subtree the inventory reads.
pub fn unrelated_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99, 0)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
