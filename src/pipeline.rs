//! End-to-end segmentation pipeline
//!
//! A pure function chain: aggregate -> normalize -> cluster -> rank/label ->
//! summarize. Every intermediate result is passed explicitly; nothing is
//! cached between runs, so two runs with the same input and configuration
//! produce identical reports.

use serde::Serialize;

use crate::error::Result;
use crate::kmeans::{fit_kmeans, KMeansConfig};
use crate::label::{assign_labels, rank_clusters, ClusterProfile, LabelScheme};
use crate::rfm::compute_rfm;
use crate::scale::normalize;
use crate::summary::{summarize, SegmentSummary};
use crate::data::Transaction;

/// Pipeline configuration surfaced to the caller.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub n_clusters: usize,
    pub n_init: usize,
    pub max_iters: usize,
    pub seed: u64,
    pub labels: LabelScheme,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            n_clusters: 3,
            n_init: 10,
            max_iters: 300,
            seed: 42,
            labels: LabelScheme::Auto,
        }
    }
}

/// One fully labeled output row per customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCustomer {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: u64,
    pub monetary: f64,
    pub cluster: usize,
    pub label: String,
}

/// Everything a reporting collaborator needs to render the result.
#[derive(Debug, Clone)]
pub struct SegmentationReport {
    /// One labeled row per distinct customer
    pub customers: Vec<LabeledCustomer>,
    /// Cluster profiles in rank order, best first
    pub profiles: Vec<ClusterProfile>,
    /// Per-segment summary rows in rank order
    pub summaries: Vec<SegmentSummary>,
    /// Objective value of the winning clustering run
    pub inertia: f64,
    /// False when the winning run stopped at the iteration cap
    pub converged: bool,
}

/// Run the full segmentation pipeline over a validated transaction table.
pub fn run_pipeline(
    transactions: &[Transaction],
    config: &PipelineConfig,
) -> Result<SegmentationReport> {
    let rfm = compute_rfm(transactions)?;
    log::debug!("aggregated {} customers", rfm.len());

    let (features, _scaler) = normalize(&rfm)?;

    let kmeans_config = KMeansConfig {
        n_clusters: config.n_clusters,
        n_init: config.n_init,
        max_iters: config.max_iters,
        seed: config.seed,
    };
    let model = fit_kmeans(&features, &kmeans_config)?;

    let profiles = rank_clusters(&rfm, &model.labels, config.n_clusters);
    let names = assign_labels(&profiles, &config.labels)?;
    let summaries = summarize(&profiles, &names);

    let customers = rfm
        .into_iter()
        .zip(&model.labels)
        .map(|(record, &cluster)| LabeledCustomer {
            customer_id: record.customer_id,
            recency: record.recency,
            frequency: record.frequency,
            monetary: record.monetary,
            label: names[cluster].clone(),
            cluster,
        })
        .collect();

    Ok(SegmentationReport {
        customers,
        profiles,
        summaries,
        inertia: model.inertia,
        converged: model.converged,
    })
}
