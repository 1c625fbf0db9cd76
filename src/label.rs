//! Cluster ranking and semantic labeling
//!
//! Raw cluster ids are arbitrary integers, so clusters are re-ordered on a
//! fixed business scale before naming: the most recently active, most
//! frequent, highest spending cluster ranks first.

use serde::Serialize;

use crate::error::{Result, SegmentError};
use crate::rfm::RfmRecord;

/// The three-segment vocabulary used when k = 3, best rank first.
pub const DEFAULT_LABELS: [&str; 3] = ["Loyal", "Potensial", "Tidak Aktif"];

/// Unnormalized per-cluster means, used for ranking and reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfile {
    /// Raw cluster id as produced by the cluster engine
    pub cluster_id: usize,
    pub mean_recency: f64,
    pub mean_frequency: f64,
    pub mean_monetary: f64,
    pub size: usize,
}

/// How ranks map to label names.
#[derive(Debug, Clone)]
pub enum LabelScheme {
    /// "Loyal"/"Potensial"/"Tidak Aktif" when k = 3, "Rank 1".."Rank k"
    /// otherwise.
    Auto,
    /// Caller-supplied names, best rank first; must have exactly k entries.
    Custom(Vec<String>),
}

/// Compute per-cluster mean R/F/M from the original (unnormalized) records,
/// then sort by recency ascending, frequency descending, monetary
/// descending, with ascending cluster id as the final tie-break. The
/// returned order is the ranking: index 0 is the best cluster. A cluster
/// with no members (possible only for assignments not produced by the
/// cluster engine) sorts behind every populated cluster, so its zero means
/// cannot claim the best rank.
pub fn rank_clusters(records: &[RfmRecord], labels: &[usize], k: usize) -> Vec<ClusterProfile> {
    debug_assert_eq!(records.len(), labels.len());

    let mut sums = vec![(0.0f64, 0.0f64, 0.0f64, 0usize); k];
    for (record, &cluster) in records.iter().zip(labels) {
        let entry = &mut sums[cluster];
        entry.0 += record.recency as f64;
        entry.1 += record.frequency as f64;
        entry.2 += record.monetary;
        entry.3 += 1;
    }

    let mut profiles: Vec<ClusterProfile> = sums
        .into_iter()
        .enumerate()
        .map(|(cluster_id, (recency, frequency, monetary, size))| {
            let n = size.max(1) as f64;
            ClusterProfile {
                cluster_id,
                mean_recency: recency / n,
                mean_frequency: frequency / n,
                mean_monetary: monetary / n,
                size,
            }
        })
        .collect();

    profiles.sort_by(|a, b| {
        (a.size == 0)
            .cmp(&(b.size == 0))
            .then(a.mean_recency.total_cmp(&b.mean_recency))
            .then(b.mean_frequency.total_cmp(&a.mean_frequency))
            .then(b.mean_monetary.total_cmp(&a.mean_monetary))
            .then(a.cluster_id.cmp(&b.cluster_id))
    });
    profiles
}

/// Resolve the label vocabulary for k ranks, best rank first.
pub fn label_vocabulary(k: usize, scheme: &LabelScheme) -> Result<Vec<String>> {
    match scheme {
        LabelScheme::Auto => {
            if k == DEFAULT_LABELS.len() {
                Ok(DEFAULT_LABELS.iter().map(|s| s.to_string()).collect())
            } else {
                Ok((1..=k).map(|rank| format!("Rank {}", rank)).collect())
            }
        }
        LabelScheme::Custom(names) => {
            if names.len() != k {
                return Err(SegmentError::Config(format!(
                    "label vocabulary has {} entries but k = {}",
                    names.len(),
                    k
                )));
            }
            Ok(names.clone())
        }
    }
}

/// Assign a label name to every raw cluster id via the ranked profiles.
/// Returned vector is indexed by cluster id.
pub fn assign_labels(ranked: &[ClusterProfile], scheme: &LabelScheme) -> Result<Vec<String>> {
    let vocabulary = label_vocabulary(ranked.len(), scheme)?;
    let mut names = vec![String::new(); ranked.len()];
    for (rank, profile) in ranked.iter().enumerate() {
        names[profile.cluster_id] = vocabulary[rank].clone();
    }
    Ok(names)
}
