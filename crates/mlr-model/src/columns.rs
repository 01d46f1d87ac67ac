//! Column names of source and result tables.

// Source columns.
pub const GROUPNAME: &str = "groupname";
pub const START_DATE: &str = "startdate";
pub const END_DATE: &str = "enddate";
pub const REQUEST_DATE: &str = "requestdate";
pub const GRANTED: &str = "granted";
pub const IID: &str = "iid";
pub const NHIS_GROUP_ID: &str = "nhisgroupid";
pub const APPROVED_AMOUNT: &str = "approvedamount";
pub const ENCOUNTER_DATE_FROM: &str = "encounterdatefrom";
pub const GROUP_ID: &str = "groupid";
pub const COMPANY_NAME: &str = "company_name";
pub const FROM: &str = "from";
pub const AMOUNT: &str = "amount";
pub const DESCRIPTION: &str = "description";
pub const LEGACY_CODE: &str = "legacycode";
pub const MEMBER_ID: &str = "memberid";
pub const EFFECTIVE_DATE: &str = "effectivedate";
pub const TERMINATION_DATE: &str = "terminationdate";
pub const PLAN_ID: &str = "planid";
pub const IS_CURRENT: &str = "iscurrent";
pub const INDIVIDUAL_PRICE: &str = "individualprice";
pub const FAMILY_PRICE: &str = "familyprice";
pub const COUNT_OF_INDIVIDUAL: &str = "countofindividual";
pub const COUNT_OF_FAMILY: &str = "countoffamily";
pub const MAX_NUM_DEPENDANT: &str = "maxnumdependant";
pub const PLAN_NAME: &str = "planname";

// Aggregates.
pub const TOTAL: &str = "total";
pub const DEBIT_TOTAL: &str = "debit_total";
pub const PA_TOTAL: &str = "pa_total";
pub const CLAIMS_TOTAL: &str = "claims_total";
pub const PA_LOADED: &str = "PA40%";
pub const COMMISSION: &str = "commission";
pub const MLR_PA: &str = "MLR(PA) (%)";
pub const MLR_CLAIMS: &str = "MLR(CLAIMS) (%)";

// Retail.
pub const PREMIUM: &str = "premium";
pub const TOTAL_PREMIUM: &str = "total_premium";
pub const TOTAL_COST: &str = "total_cost";
