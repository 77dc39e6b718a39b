//! # Table Walker
//!
//! Lock-step GET-NEXT over several columns of one conceptual table. Each step
//! advances every live column by one row in a single exchange and yields the
//! row as a [`TableRow`].
//!
//! The walk ends when:
//! * every column has left its subtree or returned an exception (end of table),
//! * an exchange fails (the error is yielded once, then the walk ends),
//! * `budget` exchanges have been spent.
//!
//! Rows are pulled one at a time with [`TableWalk::next`]; nothing is fetched
//! ahead and a walk cannot be restarted.

use async_snmp::{Oid, Value, VarBind};

use super::{ExchangeError, SnmpAgent};

pub type RowOutcome = Result<TableRow, ExchangeError>;

/// One step of a walk: a cell per requested column, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    columns: Vec<Oid>,
    cells: Vec<Option<VarBind>>,
}

impl TableRow {
    pub fn cell(&self, column: usize) -> Option<&VarBind> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    pub fn value(&self, column: usize) -> Option<&Value> {
        self.cell(column).map(|varbind| &varbind.value)
    }

    pub fn cells(&self) -> &[Option<VarBind>] {
        &self.cells
    }

    /// Instance suffix of the cell in `column`, the arcs after the column OID.
    pub fn suffix(&self, column: usize) -> Option<&[u32]> {
        let varbind = self.cell(column)?;
        let prefix = self.columns.get(column)?.len();
        varbind.oid.arcs().get(prefix..)
    }

    /// Single-arc instance of the cell in `column` (`ifTable`, `ifXTable`).
    pub fn instance(&self, column: usize) -> Option<u32> {
        match self.suffix(column)? {
            [index] => Some(*index),
            _ => None,
        }
    }

    /// Present cells as `(column, instance, value)`.
    ///
    /// A column with gaps runs ahead of the others under GET-NEXT, so the
    /// cells of one row may belong to different instances.
    pub fn instances(&self) -> impl Iterator<Item = (usize, u32, &Value)> + '_ {
        (0..self.cells.len()).filter_map(move |column| {
            Some((column, self.instance(column)?, self.value(column)?))
        })
    }
}

pub struct TableWalk<'a> {
    agent: &'a dyn SnmpAgent,
    columns: Vec<Oid>,
    /// Last OID seen per column; `None` once the column is exhausted.
    cursors: Vec<Option<Oid>>,
    remaining: u32,
    steps: u32,
    finished: bool,
}

impl<'a> TableWalk<'a> {
    pub fn new(agent: &'a dyn SnmpAgent, columns: Vec<Oid>, budget: u32) -> Self {
        let cursors = columns.iter().cloned().map(Some).collect();
        Self {
            agent,
            columns,
            cursors,
            remaining: budget,
            steps: 0,
            finished: false,
        }
    }

    pub fn columns(&self) -> &[Oid] {
        &self.columns
    }

    /// Exchanges issued so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub async fn next(&mut self) -> Option<RowOutcome> {
        if self.finished {
            return None;
        }

        let live: Vec<(usize, Oid)> = self
            .cursors
            .iter()
            .enumerate()
            .filter_map(|(position, cursor)| cursor.clone().map(|oid| (position, oid)))
            .collect();

        if live.is_empty() || self.remaining == 0 {
            self.finished = true;
            return None;
        }

        self.remaining -= 1;
        self.steps += 1;

        let request: Vec<Oid> = live.iter().map(|(_, oid)| oid.clone()).collect();
        let varbinds = match self.agent.get_next(&request).await {
            Ok(varbinds) => varbinds,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        };

        let mut cells: Vec<Option<VarBind>> = vec![None; self.columns.len()];
        for (slot, (position, previous)) in live.into_iter().enumerate() {
            match varbinds.get(slot) {
                Some(varbind) if self.in_column(position, &previous, varbind) => {
                    self.cursors[position] = Some(varbind.oid.clone());
                    cells[position] = Some(varbind.clone());
                }
                _ => self.cursors[position] = None,
            }
        }

        if cells.iter().all(Option::is_none) {
            self.finished = true;
            return None;
        }

        Some(Ok(TableRow {
            columns: self.columns.clone(),
            cells,
        }))
    }

    /// A varbind continues its column when it is a real value strictly past
    /// the previous OID and still inside the column subtree.
    fn in_column(&self, position: usize, previous: &Oid, varbind: &VarBind) -> bool {
        let column = &self.columns[position];
        !varbind.value.is_exception()
            && varbind.oid.len() > column.len()
            && varbind.oid.starts_with(column)
            && varbind.oid > *previous
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
