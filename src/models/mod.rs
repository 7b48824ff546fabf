//! Shared data types for the MPF fund catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One constituent fund of an MPF scheme.
///
/// Loaded once from the embedded catalog at startup and treated as
/// read-only afterwards. The `name` (constituent fund name) is the unique
/// display name the extraction engine matches against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MpfFund {
    pub scheme_name: String,
    /// Canonical constituent fund name, e.g. "Manulife MPF Core Accumulation Fund"
    pub name: String,
    /// MPF trustee managing the fund, e.g. "Manulife", "HSBC"
    pub trustee: String,
    pub fund_type: String,
    pub launch_date: Option<NaiveDate>,
    /// Fund size in HKD millions
    pub fund_size_m: f64,
    /// MPFA risk class, 1 (lowest) to 7 (highest)
    pub risk_class: u8,
    /// Latest fund expense ratio, percent
    pub fee_ratio: f64,
    pub return_1y: f64,
    pub return_3y: f64,
    pub return_5y: f64,
    pub return_2024: f64,
    pub return_2023: f64,
    pub return_2022: f64,
    pub return_2021: f64,
    pub return_2020: f64,
}

/// Per-trustee aggregate used by the catalog overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeStats {
    pub name: String,
    /// Number of constituent funds under this trustee
    pub fund_count: usize,
    /// Combined fund size in HKD millions
    pub aum_m: f64,
}
