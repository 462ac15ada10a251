//! Generation of ids for synthesized elements.
//!
//! Pools, lanes, components and flows bring their own ids. The compiler
//! still has to invent ids for the elements the model leaves implicit: the
//! definitions root, the collaboration, each process, lane sets and the
//! diagram plane. Those come from an [`IdGenerator`] owned by a single compile
//! call, so two compiles never share state.

use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng};

/// A source of fresh element ids.
pub trait IdGenerator {
    /// Returns a new id of the form `{prefix}_{suffix}`.
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Deterministic ids: `Process_1`, `Process_2`, `LaneSet_3`, ...
///
/// The counter is shared across prefixes, so the output only depends on the
/// order of requests.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::{IdGenerator, SequentialIds};
///
/// let mut ids = SequentialIds::new();
/// assert_eq!(ids.next_id("Process"), "Process_1");
/// assert_eq!(ids.next_id("LaneSet"), "LaneSet_2");
/// ```
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: usize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}_{}", self.counter)
    }
}

/// Random alphanumeric suffixes, as diagram editors generate them.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::{IdGenerator, RandomIds};
///
/// let mut first = RandomIds::seeded(7);
/// let mut second = RandomIds::seeded(7);
/// assert_eq!(first.next_id("Process"), second.next_id("Process"));
/// ```
#[derive(Debug)]
pub struct RandomIds<R = StdRng> {
    rng: R,
    length: usize,
}

impl RandomIds<StdRng> {
    /// Suffix length used by [`RandomIds::seeded`] and [`RandomIds::from_os_rng`].
    pub const DEFAULT_LENGTH: usize = 6;

    /// Creates a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng(), Self::DEFAULT_LENGTH)
    }

    /// Creates a reproducible generator from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Self::DEFAULT_LENGTH)
    }
}

impl<R: Rng> RandomIds<R> {
    /// Creates a generator drawing `length` characters per id from `rng`.
    pub fn new(rng: R, length: usize) -> Self {
        Self { rng, length }
    }
}

impl<R: Rng> IdGenerator for RandomIds<R> {
    fn next_id(&mut self, prefix: &str) -> String {
        let suffix: String = (0..self.length)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect();
        format!("{prefix}_{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sequential_ids_count_across_prefixes() {
        let mut ids = SequentialIds::new();
        let generated: Vec<_> = ["Definitions", "Collaboration", "Process"]
            .iter()
            .map(|prefix| ids.next_id(prefix))
            .collect();

        assert_eq!(
            generated,
            vec!["Definitions_1", "Collaboration_2", "Process_3"]
        );
    }

    #[test]
    fn test_random_ids_shape() {
        let mut ids = RandomIds::seeded(42);
        let id = ids.next_id("Process");

        let suffix = id.strip_prefix("Process_").unwrap();
        assert_eq!(suffix.len(), RandomIds::DEFAULT_LENGTH);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_ids_are_reproducible_with_seed() {
        let mut a = RandomIds::seeded(99);
        let mut b = RandomIds::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.next_id("Lane"), b.next_id("Lane"));
        }
    }

    #[test]
    fn test_random_ids_do_not_repeat_quickly() {
        let mut ids = RandomIds::seeded(1);
        let unique: HashSet<_> = (0..100).map(|_| ids.next_id("X")).collect();
        assert_eq!(unique.len(), 100);
    }
}
