//! Per-segment summary rows with interpretation text

use serde::Serialize;

use crate::label::ClusterProfile;

/// One report row per segment, best rank first. Means are rounded to two
/// decimal places for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub label: String,
    pub count: usize,
    pub mean_recency: f64,
    pub mean_frequency: f64,
    pub mean_monetary: f64,
    pub interpretation: String,
}

/// Build summary rows from ranked cluster profiles and their label names
/// (indexed by raw cluster id).
pub fn summarize(ranked: &[ClusterProfile], names: &[String]) -> Vec<SegmentSummary> {
    ranked
        .iter()
        .map(|profile| {
            let label = names[profile.cluster_id].clone();
            let interpretation = interpretation_for(&label, profile);
            SegmentSummary {
                count: profile.size,
                mean_recency: round2(profile.mean_recency),
                mean_frequency: round2(profile.mean_frequency),
                mean_monetary: round2(profile.mean_monetary),
                interpretation,
                label,
            }
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Fixed interpretation template keyed by label name.
fn interpretation_for(label: &str, profile: &ClusterProfile) -> String {
    let stats = format!(
        "on average last active {:.2} days ago, {:.2} transactions, {:.2} spent",
        profile.mean_recency, profile.mean_frequency, profile.mean_monetary
    );
    match label {
        "Loyal" => format!(
            "Recently active, frequent, high-spending customers; {}. Reward and retain them.",
            stats
        ),
        "Potensial" => format!(
            "Moderately engaged customers with room to grow; {}. Nudge them toward repeat purchases.",
            stats
        ),
        "Tidak Aktif" => format!(
            "Customers who have gone quiet; {}. Win them back with reactivation offers.",
            stats
        ),
        other => format!("Segment {}; {}.", other, stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(cluster_id: usize, recency: f64, frequency: f64, monetary: f64, size: usize) -> ClusterProfile {
        ClusterProfile {
            cluster_id,
            mean_recency: recency,
            mean_frequency: frequency,
            mean_monetary: monetary,
            size,
        }
    }

    #[test]
    fn test_summarize_rounds_to_two_decimals() {
        let ranked = vec![profile(0, 1.2345, 5.6789, 500.005, 4)];
        let names = vec!["Rank 1".to_string()];
        let rows = summarize(&ranked, &names);
        assert_eq!(rows[0].mean_recency, 1.23);
        assert_eq!(rows[0].mean_frequency, 5.68);
        assert_eq!(rows[0].mean_monetary, 500.01);
        assert_eq!(rows[0].count, 4);
    }

    #[test]
    fn test_summarize_follows_rank_order() {
        let ranked = vec![
            profile(2, 1.0, 9.0, 900.0, 3),
            profile(0, 10.0, 4.0, 200.0, 5),
            profile(1, 40.0, 1.0, 20.0, 2),
        ];
        let names = vec![
            "Potensial".to_string(),
            "Tidak Aktif".to_string(),
            "Loyal".to_string(),
        ];
        let rows = summarize(&ranked, &names);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Loyal", "Potensial", "Tidak Aktif"]);
    }

    #[test]
    fn test_interpretation_keyed_by_label() {
        let ranked = vec![profile(0, 40.0, 1.0, 20.0, 2)];
        let names = vec!["Tidak Aktif".to_string()];
        let rows = summarize(&ranked, &names);
        assert!(rows[0].interpretation.contains("reactivation"));

        let names = vec!["Rank 1".to_string()];
        let rows = summarize(&ranked, &names);
        assert!(rows[0].interpretation.contains("Segment Rank 1"));
    }
}
