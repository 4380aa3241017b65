//! Product identifier generation.
//!
//! Identifiers are short random alphanumeric strings. Generation sits behind the
//! [`IdGenerator`] trait so tests can supply deterministic sequences.

use rand::distributions::Alphanumeric;
use rand::Rng;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Length of every generated product id.
pub const PRODUCT_ID_LEN: usize = 5;

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws `[A-Za-z0-9]{len}` from the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    len: usize,
}

impl RandomIdGenerator {
    pub fn with_len(len: usize) -> Self {
        Self { len }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::with_len(PRODUCT_ID_LEN)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.len)
            .map(char::from)
            .collect()
    }
}

/// Hands out a fixed list of ids in order, wrapping around at the end.
#[cfg(test)]
pub(crate) struct SequenceIdGenerator {
    ids: Vec<String>,
    next: AtomicUsize,
}

#[cfg(test)]
impl SequenceIdGenerator {
    pub(crate) fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl IdGenerator for SequenceIdGenerator {
    fn generate(&self) -> String {
        if self.ids.is_empty() {
            return String::new();
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.ids.len();
        self.ids[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_five_alphanumeric_chars() {
        let id_gen = RandomIdGenerator::default();
        for _ in 0..200 {
            let id = id_gen.generate();
            assert_eq!(id.len(), PRODUCT_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "bad id {id}");
        }
    }

    #[test]
    fn random_ids_rarely_repeat() {
        let id_gen = RandomIdGenerator::default();
        let ids: HashSet<String> = (0..1000).map(|_| id_gen.generate()).collect();
        // 62^5 possible ids; a handful of repeats in 1000 draws would already be suspicious.
        assert!(ids.len() >= 995);
    }

    #[test]
    fn sequence_wraps_around() {
        let id_gen = SequenceIdGenerator::new(["AAAAA", "BBBBB"]);
        assert_eq!(id_gen.generate(), "AAAAA");
        assert_eq!(id_gen.generate(), "BBBBB");
        assert_eq!(id_gen.generate(), "AAAAA");
    }
}
