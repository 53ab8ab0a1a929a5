use crate::pool::PlayerId;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Modulus for the leading-slot product component. Fixed so
/// fingerprints are stable across runs.
const PRODUCT_PRIME: u64 = 10_007;

/// A compact, hashable summary of a lineup used for cheap
/// locality-sensitive clustering: two lineups sharing most players
/// collide in all four components far more often than dissimilar
/// ones. Components: the id sums of the front and back halves, the
/// xor of all ids, and the product of the three leading slots mod a
/// fixed prime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub front_sum: u64,
    pub back_sum: u64,
    pub xor: u32,
    pub lead_product: u64,
}

impl Fingerprint {
    pub fn of(row: &[PlayerId]) -> Self {
        let half = row.len() / 2;
        let front_sum = row[..half].iter().map(|&id| id as u64).sum();
        let back_sum = row[half..].iter().map(|&id| id as u64).sum();
        let xor = row.iter().fold(0u32, |acc, &id| acc ^ id);
        let lead_product = row
            .iter()
            .take(3)
            .fold(1u64, |acc, &id| (acc * (id as u64 + 1)) % PRODUCT_PRIME);

        Fingerprint {
            front_sum,
            back_sum,
            xor,
            lead_product,
        }
    }

    /// The bucket this fingerprint lands in, for a clustering with
    /// `buckets` cells. Deterministic for a given fingerprint and
    /// bucket count.
    pub fn bucket(&self, buckets: usize) -> usize {
        debug_assert!(buckets > 0);
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        (hasher.finish() % buckets as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_rows_share_fingerprints() {
        let row = [3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(Fingerprint::of(&row), Fingerprint::of(&row));
        assert_eq!(Fingerprint::of(&row).bucket(64), Fingerprint::of(&row).bucket(64));
    }

    #[test]
    fn different_rows_usually_differ() {
        let a = Fingerprint::of(&[1, 2, 3, 4, 5, 6]);
        let b = Fingerprint::of(&[7, 8, 9, 10, 11, 12]);
        assert_ne!(a, b);
    }

    #[test]
    fn buckets_are_in_range() {
        for seed in 0..100u32 {
            let row = [seed, seed + 1, seed + 2, seed + 3];
            assert!(Fingerprint::of(&row).bucket(16) < 16);
        }
    }

    #[test]
    fn short_rows_are_fingerprintable() {
        let fp = Fingerprint::of(&[5, 9]);
        assert_eq!(fp.front_sum, 5);
        assert_eq!(fp.back_sum, 9);
    }
}
