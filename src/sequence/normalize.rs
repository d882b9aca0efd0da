use crate::sequence::alphabet::AminoAcid;

/// Sequence substituted when the input is absent, the sentinel, or filters to nothing.
pub const FALLBACK_SEQUENCE: &str =
    "MKTVRQERLKSIVRILERSKEPVSGAQLAEELSVSRQVIVQDIAYLRSLGYNIVATPRGYVLAGG";

/// Marker the upstream search layer writes when a record carries no sequence.
pub const UNAVAILABLE_SENTINEL: &str = "Secuencia no disponible";

/// Normalized, never-empty amino-acid sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequence {
    residues: Vec<AminoAcid>,
    fallback: bool,
}

impl Sequence {
    /// Residues in draw order.
    pub fn residues(&self) -> &[AminoAcid] {
        &self.residues
    }

    /// Number of residues (always at least 1).
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residue at `index`.
    pub fn get(&self, index: usize) -> Option<AminoAcid> {
        self.residues.get(index).copied()
    }

    /// Whether the fallback sequence was substituted for the raw input.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// One-letter string form.
    pub fn to_letters(&self) -> String {
        self.residues.iter().map(|aa| aa.as_char()).collect()
    }

    pub(crate) fn fallback() -> Self {
        Self {
            residues: filter_alphabet(FALLBACK_SEQUENCE),
            fallback: true,
        }
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for aa in &self.residues {
            write!(f, "{aa}")?;
        }
        Ok(())
    }
}

/// Filter raw input to the amino-acid alphabet.
///
/// Characters outside the alphabet are dropped with relative order preserved. Absent input, the
/// [`UNAVAILABLE_SENTINEL`], and inputs that filter to nothing all produce the
/// [`FALLBACK_SEQUENCE`], so the result is never empty.
pub fn normalize(raw: Option<&str>) -> Sequence {
    let Some(raw) = raw.filter(|r| *r != UNAVAILABLE_SENTINEL) else {
        return Sequence::fallback();
    };
    let residues = filter_alphabet(raw);
    if residues.is_empty() {
        return Sequence::fallback();
    }
    Sequence {
        residues,
        fallback: false,
    }
}

fn filter_alphabet(raw: &str) -> Vec<AminoAcid> {
    raw.chars().filter_map(AminoAcid::from_char).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/normalize.rs"]
mod tests;
