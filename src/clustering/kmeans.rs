//! Seeded k-means with k-means++ initialisation

use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parameters of one k-means fit
#[derive(Debug, Clone, Copy)]
pub struct KMeansParams {
    pub k: usize,
    pub seed: u64,
    pub max_iter: usize,
    pub n_init: usize,
    /// Stop when the summed squared centroid shift falls below this
    pub tolerance: f64,
}

/// Result of the best restart
#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub labels: Vec<usize>,
    pub centroids: Array2<f64>,
    pub inertia: f64,
    pub iterations: usize,
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Pick an index with probability proportional to `weights`; uniform when
/// every weight is zero
fn weighted_choice(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return rng.gen_range(0..weights.len());
    }

    let mut target = rng.gen::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if target < w {
            return i;
        }
        target -= w;
    }
    weights.len() - 1
}

fn kmeans_plus_plus(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let mut centroids: Array2<f64> = Array2::zeros((k, data.ncols()));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut closest: Vec<f64> = (0..n)
        .map(|i| squared_distance(data.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let pick = weighted_choice(&closest, rng);
        centroids.row_mut(c).assign(&data.row(pick));

        for (i, dist) in closest.iter_mut().enumerate() {
            *dist = dist.min(squared_distance(data.row(i), centroids.row(c)));
        }
    }

    centroids
}

/// Assign each point to its nearest centroid; returns labels, per-point
/// distances and the inertia
fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> (Vec<usize>, Vec<f64>, f64) {
    let mut labels = Vec::with_capacity(data.nrows());
    let mut distances = Vec::with_capacity(data.nrows());

    for point in data.axis_iter(Axis(0)) {
        let (best, dist) = centroids
            .axis_iter(Axis(0))
            .enumerate()
            .map(|(c, centroid)| (c, squared_distance(point, centroid)))
            .fold((0, f64::INFINITY), |acc, cur| if cur.1 < acc.1 { cur } else { acc });
        labels.push(best);
        distances.push(dist);
    }

    let inertia = distances.iter().sum();
    (labels, distances, inertia)
}

fn update_centroids(
    data: &Array2<f64>,
    labels: &[usize],
    distances: &[f64],
    k: usize,
) -> Array2<f64> {
    let mut centroids: Array2<f64> = Array2::zeros((k, data.ncols()));
    let mut counts = vec![0usize; k];

    for (i, &label) in labels.iter().enumerate() {
        let mut row = centroids.row_mut(label);
        row += &data.row(i);
        counts[label] += 1;
    }

    // Empty clusters take the points farthest from their centroids
    let mut far: Vec<usize> = (0..data.nrows()).collect();
    far.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
    let mut donors = far.into_iter();

    for c in 0..k {
        if counts[c] > 0 {
            centroids.row_mut(c).mapv_inplace(|v| v / counts[c] as f64);
        } else if let Some(donor) = donors.next() {
            centroids.row_mut(c).assign(&data.row(donor));
        }
    }

    centroids
}

fn fit_once(data: &Array2<f64>, params: &KMeansParams, rng: &mut StdRng) -> KMeansFit {
    let mut centroids = kmeans_plus_plus(data, params.k, rng);
    let (mut labels, mut distances, mut inertia) = assign(data, &centroids);
    let mut iterations = 0;

    for _ in 0..params.max_iter {
        iterations += 1;
        let updated = update_centroids(data, &labels, &distances, params.k);
        let shift: f64 = updated
            .axis_iter(Axis(0))
            .zip(centroids.axis_iter(Axis(0)))
            .map(|(a, b)| squared_distance(a, b))
            .sum();

        centroids = updated;
        (labels, distances, inertia) = assign(data, &centroids);

        if shift <= params.tolerance {
            break;
        }
    }

    KMeansFit {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// Fit k-means on the rows of `data`, keeping the restart with the lowest
/// inertia.
///
/// Requires `1 <= k <= data.nrows()`; callers handle the degenerate cases.
/// All restarts draw from a single `StdRng` seeded with `params.seed`, so
/// identical inputs give identical labels.
pub fn kmeans(data: &Array2<f64>, params: &KMeansParams) -> KMeansFit {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut best: Option<KMeansFit> = None;

    for _ in 0..params.n_init.max(1) {
        let fit = fit_once(data, params, &mut rng);
        if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
            best = Some(fit);
        }
    }

    let best = best.unwrap_or_else(|| KMeansFit {
        labels: vec![0; data.nrows()],
        centroids: Array2::zeros((params.k, data.ncols())),
        inertia: 0.0,
        iterations: 0,
    });
    log::debug!(
        "k-means (k = {}) finished with inertia {:.4} after {} iterations",
        params.k,
        best.inertia,
        best.iterations
    );
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn params(k: usize, seed: u64) -> KMeansParams {
        KMeansParams {
            k,
            seed,
            max_iter: 300,
            n_init: 10,
            tolerance: 1e-4,
        }
    }

    fn blobs() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [5.0, 5.0],
            [5.1, 5.0],
            [5.0, 5.1],
        ]
    }

    #[test]
    fn separates_two_blobs() {
        let fit = kmeans(&blobs(), &params(2, 42));

        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[0], fit.labels[2]);
        assert_eq!(fit.labels[3], fit.labels[4]);
        assert_eq!(fit.labels[3], fit.labels[5]);
        assert_ne!(fit.labels[0], fit.labels[3]);
        assert!(fit.inertia < 0.1);
    }

    #[test]
    fn same_seed_same_labels() {
        let a = kmeans(&blobs(), &params(3, 7));
        let b = kmeans(&blobs(), &params(3, 7));
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn labels_stay_in_range() {
        let fit = kmeans(&blobs(), &params(6, 1));
        assert!(fit.labels.iter().all(|&l| l < 6));
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn identical_points_do_not_break_seeding() {
        let data = Array2::zeros((4, 3));
        let fit = kmeans(&data, &params(2, 3));
        assert!(fit.labels.iter().all(|&l| l < 2));
        assert_eq!(fit.inertia, 0.0);
    }
}
