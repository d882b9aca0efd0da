use std::collections::BTreeMap;

use crate::{
    foundation::math::round1,
    sequence::{alphabet::AminoAcid, normalize::Sequence},
};

/// Count and share of one residue within a sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResidueStat {
    /// Occurrences, always `>= 1`.
    pub count: usize,
    /// `count / total * 100`, rounded to one decimal.
    pub percentage: f64,
    /// Index of the first occurrence; the tie-break key for ordered views.
    #[serde(skip)]
    pub first_seen: usize,
}

impl ResidueStat {
    /// Percentage formatted with exactly one decimal, e.g. `"75.0"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Per-residue composition of a [`Sequence`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Statistics {
    total: usize,
    entries: BTreeMap<AminoAcid, ResidueStat>,
}

impl Statistics {
    /// Count every residue of `seq`.
    pub fn from_sequence(seq: &Sequence) -> Self {
        let total = seq.len();
        let mut entries = BTreeMap::<AminoAcid, ResidueStat>::new();
        for (idx, &aa) in seq.residues().iter().enumerate() {
            entries
                .entry(aa)
                .or_insert(ResidueStat {
                    count: 0,
                    percentage: 0.0,
                    first_seen: idx,
                })
                .count += 1;
        }
        for stat in entries.values_mut() {
            stat.percentage = round1((stat.count as f64) / (total as f64) * 100.0);
        }
        Self { total, entries }
    }

    /// Length of the sequence the statistics were computed from.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct residues.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Stat for one residue, if present.
    pub fn get(&self, aa: AminoAcid) -> Option<&ResidueStat> {
        self.entries.get(&aa)
    }

    /// Entries in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (AminoAcid, &ResidueStat)> {
        self.entries.iter().map(|(aa, s)| (*aa, s))
    }

    /// Entries sorted by count descending; ties broken by first appearance, ascending.
    pub fn by_count_desc(&self) -> Vec<(AminoAcid, ResidueStat)> {
        let mut out: Vec<_> = self.entries.iter().map(|(aa, s)| (*aa, *s)).collect();
        out.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/stats.rs"]
mod tests;
