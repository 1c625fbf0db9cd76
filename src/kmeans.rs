//! Seeded multi-restart Lloyd's K-Means over normalized RFM space

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Result, SegmentError};

/// Clustering parameters exposed to the caller.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub n_clusters: usize,
    /// Independent restarts; the lowest-inertia run is kept
    pub n_init: usize,
    /// Iteration cap per restart
    pub max_iters: usize,
    /// RNG seed for centroid initialization
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        KMeansConfig {
            n_clusters: 3,
            n_init: 10,
            max_iters: 300,
            seed: 42,
        }
    }
}

/// Fitted model: assignments, centroids, and the objective value.
#[derive(Debug, Clone)]
pub struct KMeansModel {
    /// Number of clusters
    pub n_clusters: usize,
    /// Cluster id in [0, k) for each input row
    pub labels: Vec<usize>,
    /// Final centroid per cluster id, in normalized feature space
    pub centroids: Array2<f64>,
    /// Within-cluster sum of squared distances of the winning run
    pub inertia: f64,
    /// False when the winning run hit the iteration cap before the
    /// assignment stabilized (non-fatal; best assignment at cap is kept)
    pub converged: bool,
    /// Iterations executed by the winning run
    pub n_iters: usize,
}

impl KMeansModel {
    /// Nearest-centroid cluster for a new point in normalized space,
    /// ties broken by lowest cluster index.
    pub fn predict(&self, point: &Array1<f64>) -> usize {
        nearest_centroid(point.view(), &self.centroids)
    }

    /// Number of assigned points per cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Fit K-Means on a feature matrix.
///
/// Runs `n_init` independent Forgy-initialized Lloyd's loops from a single
/// seeded RNG and keeps the run with the strictly lowest inertia (the first
/// run wins ties), so the reduction over restarts is explicit and the whole
/// fit is reproducible for a fixed (input, k, seed).
pub fn fit_kmeans(features: &Array2<f64>, config: &KMeansConfig) -> Result<KMeansModel> {
    let n_samples = features.nrows();
    if n_samples == 0 {
        return Err(SegmentError::Validation(
            "cannot cluster an empty feature matrix".to_string(),
        ));
    }
    if config.n_clusters < 1 || config.n_clusters > n_samples {
        return Err(SegmentError::Config(format!(
            "n_clusters must be in [1, {}], got {}",
            n_samples, config.n_clusters
        )));
    }
    if config.n_init < 1 {
        return Err(SegmentError::Config(
            "n_init must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut best: Option<LloydRun> = None;

    for run_idx in 0..config.n_init {
        let run = lloyd_run(features, config.n_clusters, config.max_iters, &mut rng);
        log::debug!(
            "restart {}: inertia={:.6}, iters={}, converged={}",
            run_idx,
            run.inertia,
            run.n_iters,
            run.converged
        );
        let improved = match &best {
            Some(current) => run.inertia < current.inertia,
            None => true,
        };
        if improved {
            best = Some(run);
        }
    }

    let winner = best.expect("n_init >= 1 produces at least one run");
    if !winner.converged {
        log::warn!(
            "k-means hit the {}-iteration cap without stabilizing; using the assignment at cap",
            config.max_iters
        );
    }

    Ok(KMeansModel {
        n_clusters: config.n_clusters,
        labels: winner.labels,
        centroids: winner.centroids,
        inertia: winner.inertia,
        converged: winner.converged,
        n_iters: winner.n_iters,
    })
}

struct LloydRun {
    labels: Vec<usize>,
    centroids: Array2<f64>,
    inertia: f64,
    converged: bool,
    n_iters: usize,
}

/// One initialize -> assign -> update loop to convergence or the cap.
fn lloyd_run(features: &Array2<f64>, k: usize, max_iters: usize, rng: &mut StdRng) -> LloydRun {
    let n_samples = features.nrows();
    let n_features = features.ncols();

    // Forgy initialization: k distinct input rows become the centroids.
    let picks = rand::seq::index::sample(rng, n_samples, k);
    let mut centroids = Array2::zeros((k, n_features));
    for (cluster, row) in picks.into_iter().enumerate() {
        centroids.row_mut(cluster).assign(&features.row(row));
    }

    let mut labels = assign_all(features, &centroids);
    fix_empty_clusters(features, &mut labels, &centroids);
    let mut converged = false;
    let mut n_iters = 0;

    for iter in 0..max_iters {
        n_iters = iter + 1;
        update_centroids(features, &labels, &mut centroids);
        let mut next = assign_all(features, &centroids);
        fix_empty_clusters(features, &mut next, &centroids);
        if next == labels {
            converged = true;
            break;
        }
        labels = next;
    }

    let inertia = compute_inertia(features, &labels, &centroids);
    LloydRun {
        labels,
        centroids,
        inertia,
        converged,
        n_iters,
    }
}

/// Assign every point to its nearest centroid (lowest index on ties).
fn assign_all(features: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
    features
        .outer_iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

fn nearest_centroid(point: ArrayView1<f64>, centroids: &Array2<f64>) -> usize {
    let mut best_cluster = 0;
    let mut best_distance = f64::INFINITY;
    for (cluster, centroid) in centroids.outer_iter().enumerate() {
        let distance = squared_distance(point, centroid);
        // Strict comparison keeps ties on the lowest cluster index.
        if distance < best_distance {
            best_distance = distance;
            best_cluster = cluster;
        }
    }
    best_cluster
}

/// Move each centroid to the mean of its members. Callers run
/// [fix_empty_clusters] on the labels first, so every cluster has at least
/// one member here.
fn update_centroids(features: &Array2<f64>, labels: &[usize], centroids: &mut Array2<f64>) {
    let k = centroids.nrows();
    let n_features = centroids.ncols();

    let mut sums = Array2::<f64>::zeros((k, n_features));
    let mut counts = vec![0usize; k];
    for (i, point) in features.outer_iter().enumerate() {
        let cluster = labels[i];
        counts[cluster] += 1;
        let mut sum = sums.row_mut(cluster);
        sum += &point;
    }

    for cluster in 0..k {
        if counts[cluster] > 0 {
            let mean = sums.row(cluster).mapv(|v| v / counts[cluster] as f64);
            centroids.row_mut(cluster).assign(&mean);
        }
    }
}

/// Nearest-centroid assignment can leave a cluster empty: duplicate points
/// tie toward the lowest index, so a higher-indexed centroid sitting on the
/// same coordinates captures nothing. Each empty cluster is handed the
/// point farthest from its own centroid, drawn only from clusters that keep
/// at least one member, so the model always carries exactly k non-empty
/// clusters. With k <= n_samples an empty cluster implies some cluster has
/// two or more members, so a donor point always exists.
fn fix_empty_clusters(features: &Array2<f64>, labels: &mut [usize], centroids: &Array2<f64>) {
    let k = centroids.nrows();
    let mut sizes = vec![0usize; k];
    for &label in labels.iter() {
        sizes[label] += 1;
    }

    for cluster in 0..k {
        if sizes[cluster] > 0 {
            continue;
        }
        let mut farthest: Option<usize> = None;
        let mut farthest_distance = f64::NEG_INFINITY;
        for (i, point) in features.outer_iter().enumerate() {
            if sizes[labels[i]] < 2 {
                continue;
            }
            let distance = squared_distance(point, centroids.row(labels[i]));
            if distance > farthest_distance {
                farthest_distance = distance;
                farthest = Some(i);
            }
        }
        if let Some(donor) = farthest {
            sizes[labels[donor]] -= 1;
            labels[donor] = cluster;
            sizes[cluster] = 1;
        }
    }
}

/// Within-cluster sum of squared distances.
pub fn compute_inertia(features: &Array2<f64>, labels: &[usize], centroids: &Array2<f64>) -> f64 {
    features
        .outer_iter()
        .zip(labels)
        .map(|(point, &cluster)| squared_distance(point, centroids.row(cluster)))
        .sum()
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
