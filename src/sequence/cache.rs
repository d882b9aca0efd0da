use std::sync::Arc;

use crate::{
    foundation::math::{Fnv1a64, fingerprint_bytes},
    sequence::{
        normalize::{Sequence, normalize},
        stats::Statistics,
    },
};

/// Content key of a raw sequence input. `None` input hashes differently from `Some("")`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RawKey {
    hash: u64,
    raw: Option<String>,
}

impl RawKey {
    fn new(raw: Option<&str>) -> Self {
        Self {
            hash: Self::hash_of(raw),
            raw: raw.map(str::to_owned),
        }
    }

    fn hash_of(raw: Option<&str>) -> u64 {
        match raw {
            None => {
                let mut h = Fnv1a64::new_default();
                h.write_u8(0);
                h.finish()
            }
            Some(r) => fingerprint_bytes(r.as_bytes()),
        }
    }

    fn matches(&self, raw: Option<&str>) -> bool {
        self.hash == Self::hash_of(raw) && self.raw.as_deref() == raw
    }
}

/// Memoized derivations of a raw sequence input.
///
/// The normalized [`Sequence`] is recomputed only when the raw content changes; [`Statistics`]
/// are computed lazily and invalidated together with the sequence.
#[derive(Debug, Default)]
pub struct SequenceCache {
    key: Option<RawKey>,
    sequence: Option<Arc<Sequence>>,
    stats: Option<Arc<Statistics>>,
    recomputes: u64,
}

impl SequenceCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized sequence for `raw`, recomputed only on content change.
    ///
    /// Returns `(sequence, changed)`.
    pub fn sequence_for(&mut self, raw: Option<&str>) -> (Arc<Sequence>, bool) {
        if let (Some(key), Some(seq)) = (&self.key, &self.sequence)
            && key.matches(raw)
        {
            return (Arc::clone(seq), false);
        }

        let key = RawKey::new(raw);
        tracing::debug!(hash = key.hash, "normalizing sequence input");
        let seq = Arc::new(normalize(raw));
        self.key = Some(key);
        self.sequence = Some(Arc::clone(&seq));
        self.stats = None;
        self.recomputes += 1;
        (seq, true)
    }

    /// Statistics for the current sequence. `None` until [`Self::sequence_for`] has run.
    pub fn statistics(&mut self) -> Option<Arc<Statistics>> {
        let seq = self.sequence.as_ref()?;
        let stats = self
            .stats
            .get_or_insert_with(|| Arc::new(Statistics::from_sequence(seq)));
        Some(Arc::clone(stats))
    }

    /// How many times the sequence was (re)normalized.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/cache.rs"]
mod tests;
