//! The nine source tables of one computation run.

use std::collections::BTreeMap;

use mlr_model::TableKind;
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Immutable snapshot of every table the engine reads.
///
/// Construction requires all nine tables, so a value of this type is
/// always complete.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub group_contract: DataFrame,
    pub pre_authorization: DataFrame,
    pub claims: DataFrame,
    pub group_directory: DataFrame,
    pub debit_note: DataFrame,
    pub active_enrollee: DataFrame,
    pub member_plan: DataFrame,
    pub group_plan: DataFrame,
    pub plan: DataFrame,
}

impl SourceTables {
    /// Build a snapshot from a table map, failing on the first missing table.
    pub fn from_map(mut tables: BTreeMap<TableKind, DataFrame>) -> Result<Self> {
        let mut take = |table: TableKind| {
            tables
                .remove(&table)
                .ok_or(IngestError::MissingTable { table })
        };
        Ok(Self {
            group_contract: take(TableKind::GroupContract)?,
            pre_authorization: take(TableKind::PreAuthorization)?,
            claims: take(TableKind::Claims)?,
            group_directory: take(TableKind::GroupDirectory)?,
            debit_note: take(TableKind::DebitNote)?,
            active_enrollee: take(TableKind::ActiveEnrollee)?,
            member_plan: take(TableKind::MemberPlan)?,
            group_plan: take(TableKind::GroupPlan)?,
            plan: take(TableKind::Plan)?,
        })
    }

    pub fn table(&self, kind: TableKind) -> &DataFrame {
        match kind {
            TableKind::GroupContract => &self.group_contract,
            TableKind::PreAuthorization => &self.pre_authorization,
            TableKind::Claims => &self.claims,
            TableKind::GroupDirectory => &self.group_directory,
            TableKind::DebitNote => &self.debit_note,
            TableKind::ActiveEnrollee => &self.active_enrollee,
            TableKind::MemberPlan => &self.member_plan,
            TableKind::GroupPlan => &self.group_plan,
            TableKind::Plan => &self.plan,
        }
    }

    pub fn row_counts(&self) -> BTreeMap<TableKind, usize> {
        TableKind::ALL
            .into_iter()
            .map(|kind| (kind, self.table(kind).height()))
            .collect()
    }
}
