//! RFM aggregation: one Recency/Frequency/Monetary row per customer

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

use crate::data::Transaction;
use crate::error::{Result, SegmentError};

/// Aggregated metrics for a single customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmRecord {
    pub customer_id: String,
    /// Whole days between the snapshot date and the customer's most recent
    /// transaction. Always >= 0 because the snapshot is the global maximum.
    pub recency: i64,
    /// Number of transactions attributed to the customer.
    pub frequency: u64,
    /// Sum of transaction amounts attributed to the customer.
    pub monetary: f64,
}

/// Reduce a transaction table to one RFM row per distinct customer.
///
/// The snapshot date is the maximum timestamp across the whole input, so
/// recency is comparable across customers at a single point in time; the
/// most recent customer in the batch has recency 0. Output rows follow the
/// first-appearance order of each customer, which carries no meaning
/// downstream.
pub fn compute_rfm(transactions: &[Transaction]) -> Result<Vec<RfmRecord>> {
    let snapshot = snapshot_date(transactions)?;

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (NaiveDateTime, u64, f64)> = HashMap::new();

    for tx in transactions {
        let entry = groups
            .entry(tx.customer_id.as_str())
            .or_insert_with(|| {
                order.push(tx.customer_id.as_str());
                (tx.timestamp, 0, 0.0)
            });
        if tx.timestamp > entry.0 {
            entry.0 = tx.timestamp;
        }
        entry.1 += 1;
        entry.2 += tx.amount;
    }

    let records = order
        .into_iter()
        .map(|customer_id| {
            let (last_seen, frequency, monetary) = groups[customer_id];
            RfmRecord {
                customer_id: customer_id.to_string(),
                recency: (snapshot - last_seen).num_days(),
                frequency,
                monetary,
            }
        })
        .collect();

    Ok(records)
}

/// The reference "now" for recency: the maximum timestamp in the batch.
pub fn snapshot_date(transactions: &[Transaction]) -> Result<NaiveDateTime> {
    transactions
        .iter()
        .map(|tx| tx.timestamp)
        .max()
        .ok_or_else(|| {
            SegmentError::Validation("cannot aggregate an empty transaction table".to_string())
        })
}
