//! Generic CSV ledger parser
//!
//! Expected header (case-insensitive, any column order, extra columns ignored):
//!   Date,Merchant,Amount
//!
//! `Date` is optional. Amounts may carry a `$` sign and thousands separators.

use chrono::{Datelike, NaiveDate};
use spendsight_core::{Error, Result, TransactionRecord};
use std::io::Read;
use tracing::debug;

// `%y` before `%Y`: chrono's `%Y` also accepts two digits and would read "24" as year 24
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

struct Columns {
    merchant: usize,
    amount: usize,
    date: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let merchant = find("Merchant")
            .ok_or_else(|| Error::Format("missing required column: Merchant".to_string()))?;
        let amount = find("Amount")
            .ok_or_else(|| Error::Format("missing required column: Amount".to_string()))?;

        Ok(Self {
            merchant,
            amount,
            date: find("Date"),
        })
    }
}

/// `1,234` style integer part: leading group of 1-3 digits, then groups of exactly 3
fn is_grouped_thousands(int_part: &str) -> bool {
    let mut groups = int_part.split(',');
    let first_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    first_ok && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_amount(raw: &str, row: usize) -> Result<f64> {
    let not_numeric = || Error::Format(format!("row {row}: amount {raw:?} is not numeric"));

    let s = raw.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);

    // After the optional sign and currency symbol only digits and '.' may start the number
    if !s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(not_numeric());
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let int_part = if int_part.contains(',') {
        if !is_grouped_thousands(int_part) {
            return Err(not_numeric());
        }
        int_part.replace(',', "")
    } else {
        int_part.to_string()
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part.as_str()) || !frac_part.is_none_or(all_digits) {
        return Err(not_numeric());
    }
    let cleaned = match frac_part {
        Some(f) => format!("{int_part}.{f}"),
        None => int_part,
    };

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(if negative { -v } else { v }),
        _ => Err(not_numeric()),
    }
}

fn parse_date(raw: &str, row: usize) -> Result<Option<NaiveDate>> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(|d| d.year() >= 1000)
        .map(Some)
        .ok_or_else(|| Error::Format(format!("row {row}: unrecognized date {s:?}")))
}

/// Parse CSV ledger text into uncategorized records, preserving row order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| Error::Format(format!("reading header: {e}")))?
        .clone();
    let cols = Columns::locate(&headers)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| Error::Format(format!("row {row}: {e}")))?;

        // Skip fully blank trailing lines
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let merchant = record.get(cols.merchant).unwrap_or("").trim();
        let amount = parse_amount(record.get(cols.amount).unwrap_or(""), row)?;
        let date = match cols.date {
            Some(idx) => parse_date(record.get(idx).unwrap_or(""), row)?,
            None => None,
        };

        records.push(TransactionRecord::new(date, merchant, amount));
    }

    debug!(rows = records.len(), "parsed ledger csv");
    Ok(records)
}
