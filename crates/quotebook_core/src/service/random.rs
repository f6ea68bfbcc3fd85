//! Index sources for random quote selection.

use rand::Rng;

/// Supplies indexes in `[0, upper)`.
///
/// `upper` is always greater than zero when called by core code.
pub trait RandomSource {
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Uniform source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Replays a fixed sequence of indexes, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::{RandomSource, SequenceRandom, ThreadRandom};

    #[test]
    fn thread_random_stays_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert!(rng.next_index(3) < 3);
        }
    }

    #[test]
    fn sequence_random_cycles_and_wraps() {
        let mut rng = SequenceRandom::new(vec![1, 5]);
        assert_eq!(rng.next_index(4), 1);
        assert_eq!(rng.next_index(4), 1);
        assert_eq!(rng.next_index(4), 1);
    }
}
