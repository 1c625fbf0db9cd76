//! rfmkit: customer segmentation from raw transaction records
//!
//! The crate derives Recency/Frequency/Monetary metrics per customer,
//! normalizes them, clusters customers with seeded multi-restart K-Means,
//! ranks the clusters on a fixed business scale, and labels and summarizes
//! the resulting segments.

pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod kmeans;
pub mod label;
pub mod pipeline;
pub mod rfm;
pub mod scale;
pub mod summary;
pub mod viz;

// Re-export the pipeline surface for easier access
pub use cli::Args;
pub use data::{load_transactions, Transaction};
pub use error::{Result, SegmentError};
pub use kmeans::{fit_kmeans, KMeansConfig, KMeansModel};
pub use label::{assign_labels, rank_clusters, ClusterProfile, LabelScheme};
pub use pipeline::{run_pipeline, LabeledCustomer, PipelineConfig, SegmentationReport};
pub use rfm::{compute_rfm, RfmRecord};
pub use scale::{normalize, MinMaxScaler};
pub use summary::{summarize, SegmentSummary};
