//! Catalogue of the nine source tables and the columns each must carry.
//!
//! Every pipeline stage projects only the columns declared here, so extra
//! warehouse columns never reach a join.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{
    AMOUNT, APPROVED_AMOUNT, COMPANY_NAME, COUNT_OF_FAMILY, COUNT_OF_INDIVIDUAL, DESCRIPTION,
    EFFECTIVE_DATE, ENCOUNTER_DATE_FROM, END_DATE, FAMILY_PRICE, FROM, GRANTED, GROUP_ID,
    GROUPNAME, IID, INDIVIDUAL_PRICE, IS_CURRENT, LEGACY_CODE, MAX_NUM_DEPENDANT, MEMBER_ID,
    NHIS_GROUP_ID, PLAN_ID, PLAN_NAME, REQUEST_DATE, START_DATE, TERMINATION_DATE,
};

/// Logical type a source column must be normalizable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Free text or identifier; integers are cast to their string form.
    Text,
    /// 64-bit integer identifier or count.
    Integer,
    /// 64-bit float amount.
    Decimal,
    /// Date or datetime.
    Timestamp,
    /// String flag compared literally against "true".
    Flag,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Timestamp => "timestamp",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required column of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn spec(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

const GROUP_CONTRACT_COLUMNS: &[ColumnSpec] = &[
    spec(GROUPNAME, ColumnKind::Text),
    spec(START_DATE, ColumnKind::Timestamp),
    spec(END_DATE, ColumnKind::Timestamp),
];

const PRE_AUTHORIZATION_COLUMNS: &[ColumnSpec] = &[
    spec(GROUPNAME, ColumnKind::Text),
    spec(REQUEST_DATE, ColumnKind::Timestamp),
    spec(GRANTED, ColumnKind::Decimal),
    spec(IID, ColumnKind::Text),
];

const CLAIM_COLUMNS: &[ColumnSpec] = &[
    spec(NHIS_GROUP_ID, ColumnKind::Text),
    spec(APPROVED_AMOUNT, ColumnKind::Decimal),
    spec(ENCOUNTER_DATE_FROM, ColumnKind::Timestamp),
];

const GROUP_DIRECTORY_COLUMNS: &[ColumnSpec] = &[
    spec(GROUP_ID, ColumnKind::Text),
    spec(GROUPNAME, ColumnKind::Text),
];

const DEBIT_NOTE_COLUMNS: &[ColumnSpec] = &[
    spec(COMPANY_NAME, ColumnKind::Text),
    spec(FROM, ColumnKind::Timestamp),
    spec(AMOUNT, ColumnKind::Decimal),
    spec(DESCRIPTION, ColumnKind::Text),
];

const ACTIVE_ENROLLEE_COLUMNS: &[ColumnSpec] = &[
    spec(LEGACY_CODE, ColumnKind::Text),
    spec(MEMBER_ID, ColumnKind::Integer),
    spec(EFFECTIVE_DATE, ColumnKind::Timestamp),
    spec(TERMINATION_DATE, ColumnKind::Timestamp),
];

const MEMBER_PLAN_COLUMNS: &[ColumnSpec] = &[
    spec(MEMBER_ID, ColumnKind::Integer),
    spec(PLAN_ID, ColumnKind::Integer),
    spec(IS_CURRENT, ColumnKind::Flag),
];

const GROUP_PLAN_COLUMNS: &[ColumnSpec] = &[
    spec(PLAN_ID, ColumnKind::Integer),
    spec(GROUP_ID, ColumnKind::Integer),
    spec(INDIVIDUAL_PRICE, ColumnKind::Decimal),
    spec(FAMILY_PRICE, ColumnKind::Decimal),
    spec(COUNT_OF_INDIVIDUAL, ColumnKind::Integer),
    spec(COUNT_OF_FAMILY, ColumnKind::Integer),
    spec(MAX_NUM_DEPENDANT, ColumnKind::Integer),
];

const PLAN_COLUMNS: &[ColumnSpec] = &[
    spec(PLAN_ID, ColumnKind::Integer),
    spec(PLAN_NAME, ColumnKind::Text),
];

/// The nine tables the warehouse loader must supply for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    GroupContract,
    PreAuthorization,
    Claims,
    GroupDirectory,
    DebitNote,
    ActiveEnrollee,
    MemberPlan,
    GroupPlan,
    Plan,
}

impl TableKind {
    pub const ALL: [TableKind; 9] = [
        TableKind::GroupContract,
        TableKind::PreAuthorization,
        TableKind::Claims,
        TableKind::GroupDirectory,
        TableKind::DebitNote,
        TableKind::ActiveEnrollee,
        TableKind::MemberPlan,
        TableKind::GroupPlan,
        TableKind::Plan,
    ];

    /// Table name in the source warehouse, also used as the CSV file stem.
    pub fn warehouse_name(self) -> &'static str {
        match self {
            Self::GroupContract => "group_contract",
            Self::PreAuthorization => "total_pa_procedures",
            Self::Claims => "claims",
            Self::GroupDirectory => "all_group",
            Self::DebitNote => "debit_note",
            Self::ActiveEnrollee => "all_active_member",
            Self::MemberPlan => "member_plans",
            Self::GroupPlan => "group_plan",
            Self::Plan => "plans",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GroupContract => "Contract periods per client group",
            Self::PreAuthorization => "Pre-authorization requests with granted amounts",
            Self::Claims => "Claim encounters with approved amounts",
            Self::GroupDirectory => "Group id to group name directory",
            Self::DebitNote => "Billed premium (debit notes)",
            Self::ActiveEnrollee => "Active members with enrollment windows",
            Self::MemberPlan => "Member to plan assignments",
            Self::GroupPlan => "Plan pricing per group",
            Self::Plan => "Plan names",
        }
    }

    pub fn required_columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::GroupContract => GROUP_CONTRACT_COLUMNS,
            Self::PreAuthorization => PRE_AUTHORIZATION_COLUMNS,
            Self::Claims => CLAIM_COLUMNS,
            Self::GroupDirectory => GROUP_DIRECTORY_COLUMNS,
            Self::DebitNote => DEBIT_NOTE_COLUMNS,
            Self::ActiveEnrollee => ACTIVE_ENROLLEE_COLUMNS,
            Self::MemberPlan => MEMBER_PLAN_COLUMNS,
            Self::GroupPlan => GROUP_PLAN_COLUMNS,
            Self::Plan => PLAN_COLUMNS,
        }
    }

    /// Look up a table by its warehouse name (case-insensitive).
    pub fn from_warehouse_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.warehouse_name().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.warehouse_name())
    }
}
