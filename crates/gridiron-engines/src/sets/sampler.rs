use super::pool::LineupPool;
use gridiron_core::{Diversity, Fingerprint, LineupMatrix, random_provider};
use tracing::debug;

/// Buckets per requested lineup when clustering the pool.
const CLUSTERS_PER_LINEUP: usize = 8;

/// Seeds `k` candidate sets of `n` lineups each by fingerprint
/// clustering: every pool row hashes into one of ~8n buckets (similar
/// rows collide more than dissimilar ones), and each set draws its `n`
/// lineups from `n` distinct buckets in a freshly permuted order.
/// Near-linear in `k * n`; falls back to uniform sampling when
/// clustering yields too few non-empty buckets.
pub fn fingerprint_sets(pool: &LineupPool, k: usize, n: usize) -> Vec<LineupMatrix> {
    let clusters = (CLUSTERS_PER_LINEUP * n).max(1);
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); clusters];

    for r in 0..pool.len() {
        let bucket = Fingerprint::of(pool.row(r)).bucket(clusters);
        buckets[bucket].push(r);
    }

    let non_empty: Vec<usize> = (0..clusters).filter(|&b| !buckets[b].is_empty()).collect();
    if non_empty.len() < n {
        debug!(
            non_empty = non_empty.len(),
            wanted = n,
            "too few clusters, falling back to uniform set sampling"
        );
        return uniform_sets(pool, k, n);
    }

    let mut sets = Vec::with_capacity(k);
    for _ in 0..k {
        let order = random_provider::sample_indices(0..non_empty.len(), n);

        let mut set = LineupMatrix::with_capacity(n, pool.lineup_len());
        for cluster in order {
            let bucket = &buckets[non_empty[cluster]];
            let pick = bucket[random_provider::range(0..bucket.len())];
            set.push_row(pool.row(pick));
        }
        sets.push(set);
    }

    sets
}

/// Uniform fallback: each set is `n` distinct pool rows drawn without
/// replacement.
pub fn uniform_sets(pool: &LineupPool, k: usize, n: usize) -> Vec<LineupMatrix> {
    let mut sets = Vec::with_capacity(k);
    for _ in 0..k {
        let rows = random_provider::sample_indices(0..pool.len(), n.min(pool.len()));

        let mut set = LineupMatrix::with_capacity(n, pool.lineup_len());
        for r in rows {
            set.push_row(pool.row(r));
        }
        sets.push(set);
    }

    sets
}

/// Pairwise-similarity seeding for small pools: each set starts from a
/// random elite row and greedily adds the row with the smallest
/// maximum similarity to what the set already holds, breaking ties
/// toward higher fitness. O(n * |pool|) per set, so only used when
/// `|pool| * n` is small.
pub fn greedy_sets(
    pool: &LineupPool,
    k: usize,
    n: usize,
    diversity: &dyn Diversity,
) -> Vec<LineupMatrix> {
    let len = pool.len();
    let mut sets = Vec::with_capacity(k);

    for _ in 0..k {
        let mut chosen: Vec<usize> = Vec::with_capacity(n);
        let mut max_sim = vec![0.0f32; len];

        let seed = random_provider::range(0..len.div_ceil(5).max(1));
        chosen.push(seed);
        for (r, slot) in max_sim.iter_mut().enumerate() {
            *slot = diversity.measure(pool.row(r), pool.row(seed));
        }

        while chosen.len() < n.min(len) {
            let mut pick = None;
            let mut pick_sim = f32::MAX;
            let mut pick_fit = f32::MIN;
            for r in 0..len {
                if chosen.contains(&r) {
                    continue;
                }

                let sim = max_sim[r];
                if sim < pick_sim || (sim == pick_sim && pool.fitness(r) > pick_fit) {
                    pick = Some(r);
                    pick_sim = sim;
                    pick_fit = pool.fitness(r);
                }
            }

            let Some(r) = pick else { break };
            chosen.push(r);
            for (candidate, slot) in max_sim.iter_mut().enumerate() {
                let sim = diversity.measure(pool.row(candidate), pool.row(r));
                if sim > *slot {
                    *slot = sim;
                }
            }
        }

        let mut set = LineupMatrix::with_capacity(n, pool.lineup_len());
        for r in chosen {
            set.push_row(pool.row(r));
        }
        sets.push(set);
    }

    sets
}
