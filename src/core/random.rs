//! Seeded sampling primitives
//!
//! Every generator draws from a `RandomSource`. Top-level entities get their
//! own stream derived from `(global seed, stream, index)`, so a species or
//! system is generated identically no matter which worker thread runs it.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

/// Independent RNG streams, one per top-level tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum Stream {
    Galaxy = 1,
    Species = 2,
    System = 3,
    Civilization = 4,
}

/// SplitMix64 finalizer, used to spread seeds across streams
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive the seed of one entity stream
pub fn derive_seed(global_seed: u64, stream: Stream, index: u64) -> u64 {
    mix(mix(global_seed ^ mix(stream as u64)).wrapping_add(index))
}

/// Deterministic random source (ChaCha8)
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Stream for the `index`-th entity of a tier
    pub fn for_entity(global_seed: u64, stream: Stream, index: u64) -> Self {
        Self::seeded(derive_seed(global_seed, stream, index))
    }

    /// Uniform integer in `[min, max]`; returns `min` when the range is empty
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform `usize` in `[min, max]`
    pub fn range_usize(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `[min, max)`; returns `min` when the range is empty
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.rng.gen_bool(p)
        }
    }

    /// Uniform pick from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Weighted pick from a non-empty `(item, weight)` table
    ///
    /// Falls back to the first entry if the weights are unusable.
    pub fn weighted<'a, T>(&mut self, table: &'a [(T, f64)]) -> &'a T {
        match WeightedIndex::new(table.iter().map(|(_, w)| *w)) {
            Ok(dist) => &table[dist.sample(&mut self.rng)].0,
            Err(_) => &table[0].0,
        }
    }

    /// Up to `count` distinct items, in the order they were drawn
    pub fn subset<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let count = count.min(items.len());
        rand::seq::index::sample(&mut self.rng, items.len(), count)
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }

    /// Random v4 UUID built from this stream
    pub fn uuid(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.gen();
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.range(0, 1000), b.range(0, 1000));
        }
        assert_eq!(a.uuid(), b.uuid());
    }

    #[test]
    fn test_streams_differ() {
        assert_ne!(
            derive_seed(1, Stream::Species, 0),
            derive_seed(1, Stream::System, 0)
        );
        assert_ne!(
            derive_seed(1, Stream::System, 0),
            derive_seed(1, Stream::System, 1)
        );
    }

    #[test]
    fn test_range_is_inclusive_and_total() {
        let mut rng = RandomSource::seeded(7);
        for _ in 0..200 {
            let v = rng.range(3, 5);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(rng.range(4, 4), 4);
        assert_eq!(rng.range(9, 2), 9);
    }

    #[test]
    fn test_subset_has_no_duplicates() {
        let mut rng = RandomSource::seeded(3);
        let items = [1, 2, 3, 4, 5];
        let picked = rng.subset(&items, 3);
        assert_eq!(picked.len(), 3);
        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);

        assert_eq!(rng.subset(&items, 10).len(), 5);
    }

    #[test]
    fn test_weighted_skips_zero_weight() {
        let mut rng = RandomSource::seeded(11);
        let table = [("never", 0.0), ("always", 1.0)];
        for _ in 0..50 {
            assert_eq!(*rng.weighted(&table), "always");
        }
    }

    #[test]
    fn test_uuid_is_v4() {
        let mut rng = RandomSource::seeded(5);
        assert_eq!(rng.uuid().get_version_num(), 4);
    }
}
