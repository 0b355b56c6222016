use crate::rclib::{
    metrics::{euclidean, squared_distance},
    ClusterError,
};
use ndarray::Array2;
use ordered_float::OrderedFloat;
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    Rng, SeedableRng,
};
use std::cmp::Ordering;

pub type Point = Vec<f64>;
pub type Centroid = Point;

#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams {
    pub k: usize,
    /// Hard cap on assign/update rounds per restart
    pub max_iter: usize,
    /// Independent restarts, best inertia wins
    pub n_init: usize,
    pub seed: u64,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: 300,
            n_init: 10,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct KMeansResult {
    /// Cluster label per input row
    pub labels: Vec<usize>,
    pub centroids: Vec<Centroid>,
    /// Sum of squared distances from each row to its centroid
    pub inertia: f64,
    pub iterations: usize,
}

#[derive(Debug)]
struct Cluster {
    centroid: Centroid,
    points_idx: Vec<usize>,
}

impl Cluster {
    fn new(centroid: Centroid) -> Self {
        Self {
            centroid,
            points_idx: Vec::new(),
        }
    }

    // Empty clusters hold their previous centroid
    fn update_centroid(&mut self, points: &[Point]) {
        if self.points_idx.is_empty() {
            return;
        }
        let mut new_centroid = vec![0.0; self.centroid.len()];

        for &idx in &self.points_idx {
            for (i, &coord) in points[idx].iter().enumerate() {
                new_centroid[i] += coord;
            }
        }

        for coord in &mut new_centroid {
            *coord /= self.points_idx.len() as f64;
        }

        self.centroid = new_centroid;
    }
}

/// Lowest label wins ties
fn nearest_cluster(point: &[f64], clusters: &[Cluster]) -> usize {
    clusters
        .iter()
        .enumerate()
        .min_by(|(_, c1), (_, c2)| {
            euclidean(point, &c1.centroid)
                .partial_cmp(&euclidean(point, &c2.centroid))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// k-means++ seeding. Once no row has a positive distance left (k > n, duplicate rows)
/// a random row is reused as the centroid.
fn choose_centroids(points: &[Point], k: usize, rng: &mut StdRng) -> Vec<Centroid> {
    let mut centroids: Vec<Centroid> = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| squared_distance(p, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        // non-finite weights would panic the sampler
        let sampler = if weights.iter().all(|w| w.is_finite()) {
            WeightedIndex::<f64>::new(&weights).ok()
        } else {
            None
        };
        let idx = match sampler {
            Some(dist) => dist.sample(rng),
            None => rng.gen_range(0..points.len()),
        };
        centroids.push(points[idx].clone());
    }

    centroids
}

fn run_once(points: &[Point], k: usize, max_iter: usize, rng: &mut StdRng) -> KMeansResult {
    let mut clusters: Vec<Cluster> = choose_centroids(points, k, rng)
        .into_iter()
        .map(Cluster::new)
        .collect();

    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    let mut converged = false;
    while iterations < max_iter {
        iterations += 1;
        let new_labels: Vec<usize> = points
            .iter()
            .map(|point| nearest_cluster(point, &clusters))
            .collect();
        if new_labels == labels {
            converged = true;
            break;
        }
        labels = new_labels;

        for cluster in clusters.iter_mut() {
            cluster.points_idx.clear();
        }
        for (idx, &label) in labels.iter().enumerate() {
            clusters[label].points_idx.push(idx);
        }
        for cluster in clusters.iter_mut() {
            cluster.update_centroid(points);
        }
    }

    // Hitting the cap leaves labels one update behind the centroids
    if !converged {
        labels = points
            .iter()
            .map(|point| nearest_cluster(point, &clusters))
            .collect();
    }

    let inertia = labels
        .iter()
        .zip(points)
        .map(|(&label, point)| squared_distance(point, &clusters[label].centroid))
        .sum();

    KMeansResult {
        labels,
        centroids: clusters.into_iter().map(|c| c.centroid).collect(),
        inertia,
        iterations,
    }
}

/// Partitions the rows of `data` into `params.k` groups with Lloyd's algorithm.
/// Each restart seeds with k-means++ and iterates until the labels stop changing or
/// `max_iter` rounds pass. The restart with the smallest inertia is returned.
///
/// The same data and seed always produce the same labels. Labels are only partition keys.
/// When `k` exceeds the number of rows the surplus clusters come back empty.
pub fn kmeans(data: &Array2<f64>, params: &KMeansParams) -> Result<KMeansResult, ClusterError> {
    if params.k < 1 {
        return Err(ClusterError::InvalidClusterCount(params.k));
    }
    if data.nrows() == 0 {
        return Err(ClusterError::EmptyInput);
    }
    if params.max_iter < 1 {
        return Err(ClusterError::InvalidParameter {
            name: "max_iter",
            reason: "must be at least 1".to_string(),
        });
    }

    let points: Vec<Point> = data.rows().into_iter().map(|r| r.to_vec()).collect();
    let mut rng = StdRng::seed_from_u64(params.seed);

    let runs: Vec<KMeansResult> = (0..params.n_init)
        .map(|run| {
            let mut m_rng = StdRng::seed_from_u64(rng.gen());
            let ret = run_once(&points, params.k, params.max_iter, &mut m_rng);
            trace!(
                "restart {} stopped after {} iterations, inertia {}",
                run,
                ret.iterations,
                ret.inertia
            );
            ret
        })
        .collect();

    runs.into_iter()
        .min_by_key(|r| OrderedFloat(r.inertia))
        .ok_or_else(|| ClusterError::InvalidParameter {
            name: "n_init",
            reason: "must be at least 1".to_string(),
        })
}
