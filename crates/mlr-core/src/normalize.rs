//! Typed projections of the source tables.
//!
//! Each function selects only the columns a stage needs and casts them to
//! one dtype per role: identifiers to text or Int64, amounts to Float64,
//! dates to microsecond datetimes (text dates are parsed strictly). Keys compared across tables therefore
//! always share a dtype.

use mlr_model::columns::{
    AMOUNT, APPROVED_AMOUNT, COMPANY_NAME, COUNT_OF_FAMILY, COUNT_OF_INDIVIDUAL, DESCRIPTION,
    EFFECTIVE_DATE, ENCOUNTER_DATE_FROM, END_DATE, FAMILY_PRICE, FROM, GRANTED, GROUP_ID,
    GROUPNAME, IID, INDIVIDUAL_PRICE, IS_CURRENT, LEGACY_CODE, MAX_NUM_DEPENDANT, MEMBER_ID,
    NHIS_GROUP_ID, PLAN_ID, PLAN_NAME, REQUEST_DATE, START_DATE, TERMINATION_DATE,
};
use polars::prelude::*;

use crate::frame_utils::{as_decimal, as_integer, as_text, as_timestamp};

pub fn contract_periods(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_text(GROUPNAME),
        as_timestamp(df, START_DATE),
        as_timestamp(df, END_DATE),
    ])
}

pub fn pre_authorizations(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_text(GROUPNAME),
        as_timestamp(df, REQUEST_DATE),
        as_decimal(GRANTED),
        as_text(IID),
    ])
}

pub fn claims(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_text(NHIS_GROUP_ID),
        as_decimal(APPROVED_AMOUNT),
        as_timestamp(df, ENCOUNTER_DATE_FROM),
    ])
}

/// Group directory keyed by the textual group id, as claims reference it.
pub fn group_names_by_text_id(df: &DataFrame) -> LazyFrame {
    df.clone()
        .lazy()
        .select([as_text(GROUP_ID), as_text(GROUPNAME)])
}

/// Group directory keyed by the integer group id, as plan pricing references it.
pub fn group_names_by_integer_id(df: &DataFrame) -> LazyFrame {
    df.clone()
        .lazy()
        .select([as_integer(GROUP_ID), as_text(GROUPNAME)])
}

/// Debit notes with the company name exposed as `groupname`.
pub fn debit_notes(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_text(COMPANY_NAME).alias(GROUPNAME),
        as_timestamp(df, FROM),
        as_decimal(AMOUNT),
        as_text(DESCRIPTION),
    ])
}

pub fn enrollees(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_text(LEGACY_CODE),
        as_integer(MEMBER_ID),
        as_timestamp(df, EFFECTIVE_DATE),
        as_timestamp(df, TERMINATION_DATE),
    ])
}

pub fn member_plans(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_integer(MEMBER_ID),
        as_integer(PLAN_ID),
        as_text(IS_CURRENT),
    ])
}

pub fn group_plans(df: &DataFrame) -> LazyFrame {
    df.clone().lazy().select([
        as_integer(PLAN_ID),
        as_integer(GROUP_ID),
        as_decimal(INDIVIDUAL_PRICE),
        as_decimal(FAMILY_PRICE),
        as_integer(COUNT_OF_INDIVIDUAL),
        as_integer(COUNT_OF_FAMILY),
        as_integer(MAX_NUM_DEPENDANT),
    ])
}

pub fn plans(df: &DataFrame) -> LazyFrame {
    df.clone()
        .lazy()
        .select([as_integer(PLAN_ID), as_text(PLAN_NAME)])
}
