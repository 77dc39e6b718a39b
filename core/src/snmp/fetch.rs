//! # Scalar Fetcher
//!
//! One batched GET whose answer is mapped back onto host fields **by
//! position**: value *i* belongs to the *i*-th [`ScalarRequest`] of the
//! [`ScalarQuery`]. The fetcher never re-matches by OID, so the order in which
//! requests are added to a query is what gives each value its meaning.
//!
//! A short answer (fewer varbinds than requested) is not an error; the
//! unanswered fields simply stay absent.

use async_snmp::Oid;
use netaudit_common::network::host::{HostField, HostRecord};

use super::value::render_clean;
use super::{ExchangeError, SnmpAgent, oids};

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarRequest {
    pub field: HostField,
    pub oid: Oid,
}

/// An ordered batch of scalar requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarQuery {
    requests: Vec<ScalarRequest>,
}

impl ScalarQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: HostField, oid: Oid) -> Self {
        self.requests.push(ScalarRequest { field, oid });
        self
    }

    /// Base identity fetch of the inventory pipeline.
    pub fn identity() -> Self {
        Self::new()
            .with(HostField::SystemName, oids::sys_name())
            .with(HostField::Manufacturer, oids::ent_physical_mfg_name())
            .with(HostField::Model, oids::ent_physical_model_name())
            .with(HostField::Firmware, oids::ent_physical_software_rev())
            .with(HostField::SerialNumber, oids::ent_physical_serial_num())
            .with(HostField::Location, oids::sys_location())
            .with(HostField::Description, oids::sys_descr())
            .with(HostField::Contact, oids::sys_contact())
            .with(HostField::Comment, oids::ent_logical_descr())
            .with(HostField::InterfaceCount, oids::if_number())
    }

    pub fn requests(&self) -> &[ScalarRequest] {
        &self.requests
    }

    pub fn fields(&self) -> Vec<HostField> {
        self.requests.iter().map(|request| request.field).collect()
    }

    pub fn oids(&self) -> Vec<Oid> {
        self.requests.iter().map(|request| request.oid.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Sanitized values of a [`ScalarQuery`], in request order.
///
/// May be shorter than the query. An entry is `None` when the agent had no
/// usable value for that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarResponse {
    values: Vec<Option<String>>,
}

impl ScalarResponse {
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// At least one position carried a usable value.
    pub fn has_usable(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }

    /// Pairs each answered request with its value.
    pub fn paired<'q>(
        &'q self,
        query: &'q ScalarQuery,
    ) -> impl Iterator<Item = (&'q ScalarRequest, Option<&'q str>)> {
        query
            .requests
            .iter()
            .zip(self.values.iter())
            .map(|(request, value)| (request, value.as_deref()))
    }

    /// Writes every non-empty value into its field. Returns how many fields
    /// were written.
    pub fn apply(&self, query: &ScalarQuery, host: &mut HostRecord) -> usize {
        let mut written = 0;
        for (request, value) in self.paired(query) {
            if let Some(value) = value {
                if host.set_field(request.field, value.to_string()) {
                    written += 1;
                }
            }
        }
        written
    }
}

/// Issues one GET for every OID of `query`.
///
/// Values are rendered to text and sanitized against `delimiter`.
pub async fn fetch_scalars(
    agent: &dyn SnmpAgent,
    query: &ScalarQuery,
    delimiter: &str,
) -> Result<ScalarResponse, ExchangeError> {
    let varbinds = agent.get(&query.oids()).await?;

    let values = varbinds
        .iter()
        .take(query.len())
        .map(|varbind| render_clean(&varbind.value, delimiter))
        .collect();

    Ok(ScalarResponse { values })
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
    use crate::testing::MockAgent;
    use async_snmp::Value;
    use std::net::Ipv4Addr;

    #[test]
    fn test_identity_order_is_fixed() {
        assert_eq!(
            ScalarQuery::identity().fields(),
            vec![
                HostField::SystemName,
                HostField::Manufacturer,
                HostField::Model,
                HostField::Firmware,
                HostField::SerialNumber,
                HostField::Location,
                HostField::Description,
                HostField::Contact,
                HostField::Comment,
                HostField::InterfaceCount,
            ]
        );

        let oids: Vec<String> = ScalarQuery::identity()
            .oids()
            .iter()
            .map(|oid| oid.to_string())
            .collect();
        assert_eq!(
            oids,
            vec![
                "1.3.6.1.2.1.1.5.0",
                "1.3.6.1.2.1.47.1.1.1.1.12.1",
                "1.3.6.1.2.1.47.1.1.1.1.13.1",
                "1.3.6.1.2.1.47.1.1.1.1.10.1",
                "1.3.6.1.2.1.47.1.1.1.1.11.1",
                "1.3.6.1.2.1.1.6.0",
                "1.3.6.1.2.1.1.1.0",
                "1.3.6.1.2.1.1.4.0",
                "1.3.6.1.2.1.47.1.2.1.1.2.1",
                "1.3.6.1.2.1.2.1.0",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_is_one_exchange() {
        let agent = MockAgent::new()
            .with(oids::sys_name(), "edge-01")
            .with(oids::sys_location(), "DC1;Row 3\r\n");

        let query = ScalarQuery::new()
            .with(HostField::SystemName, oids::sys_name())
            .with(HostField::Location, oids::sys_location());
        let response = fetch_scalars(&agent, &query, ";").await.unwrap();

        assert_eq!(agent.exchange_count(), 1);
        assert_eq!(
            response.values(),
            &[Some("edge-01".to_string()), Some("DC1 Row 3  ".to_string())]
        );
    }

    #[tokio::test]
    async fn test_values_map_by_position_not_by_oid() {
        // The agent answers with the varbinds swapped; position wins.
        let agent = MockAgent::new().with_get_response(vec![
            (oids::sys_location(), Value::from("first")),
            (oids::sys_name(), Value::from("second")),
        ]);

        let query = ScalarQuery::new()
            .with(HostField::SystemName, oids::sys_name())
            .with(HostField::Location, oids::sys_location());
        let response = fetch_scalars(&agent, &query, ";").await.unwrap();

        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        assert_eq!(response.apply(&query, &mut host), 2);
        assert_eq!(host.system_name.as_deref(), Some("first"));
        assert_eq!(host.location.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_partial_response_leaves_the_tail_absent() {
        let answered: Vec<(Oid, Value)> = ScalarQuery::identity()
            .oids()
            .into_iter()
            .take(6)
            .enumerate()
            .map(|(i, oid)| (oid, Value::from(format!("value-{i}"))))
            .collect();
        let agent = MockAgent::new().with_get_response(answered);

        let query = ScalarQuery::identity();
        let response = fetch_scalars(&agent, &query, ";").await.unwrap();
        assert_eq!(response.values().len(), 6);
        assert!(response.has_usable());

        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        assert_eq!(response.apply(&query, &mut host), 6);
        assert_eq!(host.system_name.as_deref(), Some("value-0"));
        assert_eq!(host.location.as_deref(), Some("value-5"));
        assert_eq!(host.description, None);
        assert_eq!(host.contact, None);
        assert_eq!(host.comment, None);
    }

    #[tokio::test]
    async fn test_missing_objects_stay_absent() {
        let agent = MockAgent::new().with(oids::sys_name(), "edge-01");
        let query = ScalarQuery::identity();
        let response = fetch_scalars(&agent, &query, ";").await.unwrap();

        let mut host = HostRecord::new(Ipv4Addr::LOCALHOST);
        assert_eq!(response.apply(&query, &mut host), 1);
        assert_eq!(host.system_name.as_deref(), Some("edge-01"));
        assert_eq!(host.manufacturer, None);
    }

    #[tokio::test]
    async fn test_failures_are_returned_not_raised() {
        let agent = MockAgent::new().fail_exchange(0, ExchangeError::Indication("timeout".into()));
        let result = fetch_scalars(&agent, &ScalarQuery::identity(), ";").await;
        assert_eq!(result, Err(ExchangeError::Indication("timeout".into())));
    }
}
