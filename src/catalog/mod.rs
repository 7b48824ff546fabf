//! Embedded MPF fund catalog.
//!
//! The fund table ships with the binary as a CSV snapshot of public MPFA
//! data. The extraction engine treats the parsed list as read-only; its
//! order also fixes the match priority during scenario extraction.

use chrono::NaiveDate;

use crate::models::{MpfFund, TrusteeStats};

/// Column count of the embedded fund table
const COLUMNS: usize = 16;

const RAW_CSV_DATA: &str = include_str!("funds.csv");

/// Load the embedded fund catalog.
pub fn load_funds() -> Vec<MpfFund> {
    parse_funds_csv(RAW_CSV_DATA)
}

/// Parse a fund table in the catalog CSV layout.
///
/// Lossy on purpose: rows with too few columns are skipped with a warning,
/// numeric fields that fail to parse fall back to 0 and unparseable launch
/// dates become `None`. Fund names in the source data contain no embedded
/// commas, so a plain comma split is sufficient.
pub fn parse_funds_csv(csv: &str) -> Vec<MpfFund> {
    let mut funds = Vec::new();

    for (line_no, line) in csv.trim().lines().enumerate().skip(1) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < COLUMNS {
            log::warn!(
                "Skipping catalog row {}: expected {} columns, got {}",
                line_no + 1,
                COLUMNS,
                fields.len()
            );
            continue;
        }

        funds.push(MpfFund {
            scheme_name: fields[0].to_string(),
            name: fields[1].to_string(),
            trustee: fields[2].to_string(),
            fund_type: fields[3].to_string(),
            launch_date: parse_launch_date(fields[4]),
            fund_size_m: parse_num(fields[5]),
            risk_class: fields[6].parse().unwrap_or(0),
            fee_ratio: parse_num(fields[7]),
            return_1y: parse_num(fields[8]),
            return_3y: parse_num(fields[9]),
            return_5y: parse_num(fields[10]),
            return_2024: parse_num(fields[11]),
            return_2023: parse_num(fields[12]),
            return_2022: parse_num(fields[13]),
            return_2021: parse_num(fields[14]),
            return_2020: parse_num(fields[15]),
        });
    }

    funds
}

fn parse_num(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}

fn parse_launch_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field, "%d-%m-%Y").ok()
}

/// Aggregate funds by trustee: fund count and combined AUM, largest
/// trustees first, capped at the top 5 for the overview panel.
pub fn trustee_stats(funds: &[MpfFund]) -> Vec<TrusteeStats> {
    let mut by_trustee: Vec<TrusteeStats> = Vec::new();

    for fund in funds {
        match by_trustee.iter_mut().find(|s| s.name == fund.trustee) {
            Some(stats) => {
                stats.fund_count += 1;
                stats.aum_m += fund.fund_size_m;
            }
            None => by_trustee.push(TrusteeStats {
                name: fund.trustee.clone(),
                fund_count: 1,
                aum_m: fund.fund_size_m,
            }),
        }
    }

    by_trustee.sort_by(|a, b| b.aum_m.total_cmp(&a.aum_m));
    by_trustee.truncate(5);
    by_trustee
}
