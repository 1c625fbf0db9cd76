//! Transaction table loading and validation

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Result, SegmentError};

/// One raw transaction row: the validated input contract of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Customer identifier (non-empty)
    pub customer_id: String,
    /// Transaction timestamp
    pub timestamp: NaiveDateTime,
    /// Transaction amount (finite, non-negative)
    pub amount: f64,
}

/// Header hints for the three canonical column roles.
const CUSTOMER_HINTS: [&str; 4] = ["customer_id", "customerid", "id_pelanggan", "pelanggan"];
const TIMESTAMP_HINTS: [&str; 4] = ["timestamp", "date", "tanggal", "tgl"];
const AMOUNT_HINTS: [&str; 4] = ["amount", "total", "nilai", "monetary"];

/// Resolved indices of the three canonical columns in a CSV header.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub customer_id: usize,
    pub timestamp: usize,
    pub amount: usize,
}

/// Match the header row against the hint table, substring and
/// case-insensitive, first hit per role wins.
pub fn detect_columns(headers: &[&str]) -> Result<ColumnMap> {
    let find = |hints: &[&str]| {
        headers.iter().position(|h| {
            let h = h.trim().to_lowercase();
            hints.iter().any(|hint| h.contains(hint))
        })
    };

    let customer_id = find(&CUSTOMER_HINTS);
    let timestamp = find(&TIMESTAMP_HINTS);
    let amount = find(&AMOUNT_HINTS);

    match (customer_id, timestamp, amount) {
        (Some(customer_id), Some(timestamp), Some(amount)) => Ok(ColumnMap {
            customer_id,
            timestamp,
            amount,
        }),
        _ => {
            let mut missing = Vec::new();
            if customer_id.is_none() {
                missing.push("customer id");
            }
            if timestamp.is_none() {
                missing.push("timestamp");
            }
            if amount.is_none() {
                missing.push("amount");
            }
            Err(SegmentError::Validation(format!(
                "required column(s) not found in header: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Accepted timestamp formats, tried in order.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a timestamp cell: RFC 3339 first, then the fixed format list.
/// Date-only values land at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Load and validate a transaction table from a CSV file.
///
/// The header is resolved through [detect_columns]; every row must carry a
/// non-empty customer id, a parseable timestamp, and a finite non-negative
/// amount. Any violation aborts the load with a row-numbered error.
pub fn load_transactions(path: &str) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let header_fields: Vec<&str> = headers.iter().collect();
    let columns = detect_columns(&header_fields)?;

    let mut transactions = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1, first data row is line 2.
        let line = i + 2;

        let customer_id = record
            .get(columns.customer_id)
            .map(str::trim)
            .unwrap_or_default();
        if customer_id.is_empty() {
            return Err(SegmentError::Validation(format!(
                "empty customer id at line {}",
                line
            )));
        }

        let raw_timestamp = record.get(columns.timestamp).unwrap_or_default();
        let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
            SegmentError::Validation(format!(
                "unparseable timestamp '{}' at line {}",
                raw_timestamp, line
            ))
        })?;

        let raw_amount = record.get(columns.amount).unwrap_or_default().trim();
        let amount: f64 = raw_amount.parse().map_err(|_| {
            SegmentError::Validation(format!(
                "non-numeric amount '{}' at line {}",
                raw_amount, line
            ))
        })?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(SegmentError::Validation(format!(
                "amount must be finite and non-negative, got {} at line {}",
                amount, line
            )));
        }

        transactions.push(Transaction {
            customer_id: customer_id.to_string(),
            timestamp,
            amount,
        });
    }

    if transactions.is_empty() {
        return Err(SegmentError::Validation(
            "no transaction rows found after the header".to_string(),
        ));
    }

    log::debug!("loaded {} transactions from {}", transactions.len(), path);
    Ok(transactions)
}
