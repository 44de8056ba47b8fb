//! Average-linkage agglomerative clustering.
//!
//! The full dendrogram is built with the nearest-neighbour-chain algorithm,
//! which is exact for reducible linkages such as average linkage. Clusters
//! live in the slots of the original points: merging the clusters in slots
//! `x < y` empties `x` and stores the union in `y`.
//!
//! Tie-breaking: the nearest-neighbour search keeps the previous chain
//! element on ties, otherwise the lowest slot index wins. Merges are sorted
//! by distance with a stable sort.

use serde::Serialize;

use super::similarity::CondensedDistances;

/// One agglomeration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Merge {
    /// Slot emptied by the merge.
    pub left: usize,
    /// Slot that holds the merged cluster afterwards.
    pub right: usize,
    /// Average linkage distance between the two clusters.
    pub distance: f64,
    /// Number of points in the merged cluster.
    pub size: usize,
}

/// The complete merge history of `n_points` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dendrogram {
    n_points: usize,
    /// `n_points - 1` merges in ascending distance order.
    merges: Vec<Merge>,
}

impl Dendrogram {
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Number of clusters left after applying every merge whose distance is
    /// strictly below `threshold`.
    pub fn cluster_count(&self, threshold: f64) -> usize {
        let applied = self.merges.iter().filter(|m| m.distance < threshold).count();
        self.n_points - applied
    }

    /// Flat cluster labels after cutting at `threshold`.
    ///
    /// Exactly the merges with distance strictly below `threshold` are
    /// applied. Labels are `0..k`, numbered by the first point of each
    /// cluster in point order.
    pub fn cut(&self, threshold: f64) -> Vec<usize> {
        let mut sets = DisjointSets::new(self.n_points);
        for merge in self.merges.iter().filter(|m| m.distance < threshold) {
            sets.union(merge.left, merge.right);
        }

        let mut label_of_root: Vec<Option<usize>> = vec![None; self.n_points];
        let mut next = 0;
        (0..self.n_points)
            .map(|point| {
                let root = sets.find(point);
                *label_of_root[root].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }
}

/// Build the average-linkage dendrogram for the points of `distances`.
pub fn average_linkage(distances: &CondensedDistances) -> Dendrogram {
    let n = distances.len();
    let mut d = distances.clone();
    let mut size = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for _ in 0..n.saturating_sub(1) {
        if chain.is_empty() {
            if let Some(first) = (0..n).find(|&i| size[i] > 0) {
                chain.push(first);
            }
        }

        // Grow the chain until two points are reciprocal nearest neighbours.
        let (x, y, dist) = loop {
            let x = chain[chain.len() - 1];
            let (mut y, mut current_min) = if chain.len() > 1 {
                let prev = chain[chain.len() - 2];
                (prev, d.get(x, prev))
            } else {
                (x, f64::INFINITY)
            };

            for i in 0..n {
                if size[i] == 0 || i == x {
                    continue;
                }
                let dist = d.get(x, i);
                if dist < current_min {
                    current_min = dist;
                    y = i;
                }
            }

            if chain.len() > 1 && y == chain[chain.len() - 2] {
                break (x, y, current_min);
            }
            chain.push(y);
        };

        chain.truncate(chain.len() - 2);

        let (x, y) = if x < y { (x, y) } else { (y, x) };
        let (nx, ny) = (size[x], size[y]);
        merges.push(Merge {
            left: x,
            right: y,
            distance: dist,
            size: nx + ny,
        });

        size[x] = 0;
        size[y] = nx + ny;

        // Lance-Williams update for average linkage.
        for i in 0..n {
            if size[i] == 0 || i == y {
                continue;
            }
            let updated = (nx as f64 * d.get(i, x) + ny as f64 * d.get(i, y)) / (nx + ny) as f64;
            d.set(i, y, updated);
        }
    }

    merges.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Dendrogram {
        n_points: n,
        merges,
    }
}

/// Union-find over point indices with path halving.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condensed(n: usize, data: &[f64]) -> CondensedDistances {
        CondensedDistances::from_vec(n, data.to_vec()).unwrap()
    }

    #[test]
    fn empty_and_single_point() {
        let d0 = average_linkage(&condensed(0, &[]));
        assert!(d0.merges().is_empty());
        assert!(d0.cut(0.5).is_empty());

        let d1 = average_linkage(&condensed(1, &[]));
        assert!(d1.merges().is_empty());
        assert_eq!(d1.cut(0.5), vec![0]);
        assert_eq!(d1.cluster_count(0.5), 1);
    }

    #[test]
    fn two_points_merge_below_their_distance() {
        let d = average_linkage(&condensed(2, &[0.4]));
        assert_eq!(d.merges().len(), 1);
        assert_eq!(d.merges()[0].distance, 0.4);
        assert_eq!(d.cut(0.4), vec![0, 1]);
        assert_eq!(d.cut(0.41), vec![0, 0]);
    }

    #[test]
    fn average_linkage_distances() {
        // Points 0 and 1 are close; 2 is far from both.
        // d(0,1)=0.1, d(0,2)=0.8, d(1,2)=0.6 -> second merge at (0.8+0.6)/2.
        let d = average_linkage(&condensed(3, &[0.1, 0.8, 0.6]));
        let distances: Vec<f64> = d.merges().iter().map(|m| m.distance).collect();
        assert_eq!(distances.len(), 2);
        assert!((distances[0] - 0.1).abs() < 1e-12);
        assert!((distances[1] - 0.7).abs() < 1e-12);
        assert_eq!(d.merges()[1].size, 3);
    }

    #[test]
    fn four_points_two_pairs() {
        // Pairs (0,2) and (1,3) are tight; cross distances are 0.9.
        // Condensed order: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        let d = average_linkage(&condensed(4, &[0.9, 0.1, 0.9, 0.9, 0.2, 0.9]));
        assert_eq!(d.cut(0.5), vec![0, 1, 0, 1]);
        assert_eq!(d.cluster_count(0.5), 2);
        assert_eq!(d.cut(0.15), vec![0, 1, 0, 2]);
        assert_eq!(d.cut(1.0), vec![0, 0, 0, 0]);
        assert_eq!(d.cut(0.0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn merges_are_sorted_ascending() {
        let d = average_linkage(&condensed(
            5,
            &[0.5, 0.3, 0.9, 0.7, 0.2, 0.6, 0.4, 0.8, 0.1, 0.35],
        ));
        assert_eq!(d.merges().len(), 4);
        assert!(d.merges().windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(d.merges().last().unwrap().size, 5);
    }

    #[test]
    fn ties_prefer_lowest_index() {
        // All pairwise distances equal: first merge is (0, 1).
        let d = average_linkage(&condensed(3, &[0.5, 0.5, 0.5]));
        assert_eq!((d.merges()[0].left, d.merges()[0].right), (0, 1));
    }

    #[test]
    fn cluster_count_matches_cut() {
        let d = average_linkage(&condensed(4, &[0.3, 0.6, 0.9, 0.2, 0.5, 0.4]));
        for t in [0.0, 0.25, 0.35, 0.45, 0.55, 0.7, 1.0] {
            let labels = d.cut(t);
            let k = labels.iter().max().map_or(0, |m| m + 1);
            assert_eq!(k, d.cluster_count(t), "threshold {t}");
        }
    }
}
