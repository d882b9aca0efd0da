use crate::foundation::core::Rgba8;

/// Chemical-property class of an amino acid. Drives color grouping and outline styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Water-repelling residues that form the protein core.
    Hydrophobic,
    /// Residues that interact with water, typically on the surface.
    Polar,
    /// Positively charged residues.
    Basic,
    /// Negatively charged residues.
    Acidic,
    /// Glycine: smallest and most flexible residue.
    Special,
}

impl Category {
    /// All categories in legend order.
    pub const ALL: [Category; 5] = [
        Category::Hydrophobic,
        Category::Polar,
        Category::Basic,
        Category::Acidic,
        Category::Special,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hydrophobic => "hydrophobic",
            Self::Polar => "polar",
            Self::Basic => "basic",
            Self::Acidic => "acidic",
            Self::Special => "special",
        }
    }

    /// One-line legend description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Hydrophobic => "Repel water, form the protein core",
            Self::Polar => "Interact with water, protein surface",
            Self::Basic => "Positive charge, active sites",
            Self::Acidic => "Negative charge, ionic bonds",
            Self::Special => "Smallest and most flexible residue",
        }
    }

    /// Representative legend swatch color.
    pub fn legend_color(self) -> Rgba8 {
        match self {
            Self::Hydrophobic => Rgba8::from_hex(0x3B82F6),
            Self::Polar => Rgba8::from_hex(0xEAB308),
            Self::Basic => Rgba8::from_hex(0xEF4444),
            Self::Acidic => Rgba8::from_hex(0xA855F7),
            Self::Special => Rgba8::from_hex(0xFFFFFF),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the 20 standard amino acids, in one-letter code.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AminoAcid {
    /// Alanine.
    A,
    /// Cysteine.
    C,
    /// Aspartic acid.
    D,
    /// Glutamic acid.
    E,
    /// Phenylalanine.
    F,
    /// Glycine.
    G,
    /// Histidine.
    H,
    /// Isoleucine.
    I,
    /// Lysine.
    K,
    /// Leucine.
    L,
    /// Methionine.
    M,
    /// Asparagine.
    N,
    /// Proline.
    P,
    /// Glutamine.
    Q,
    /// Arginine.
    R,
    /// Serine.
    S,
    /// Threonine.
    T,
    /// Valine.
    V,
    /// Tryptophan.
    W,
    /// Tyrosine.
    Y,
}

struct Props {
    name: &'static str,
    category: Category,
    size: f64,
    color: u32,
}

impl AminoAcid {
    /// The alphabet in canonical one-letter order.
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::A,
        AminoAcid::C,
        AminoAcid::D,
        AminoAcid::E,
        AminoAcid::F,
        AminoAcid::G,
        AminoAcid::H,
        AminoAcid::I,
        AminoAcid::K,
        AminoAcid::L,
        AminoAcid::M,
        AminoAcid::N,
        AminoAcid::P,
        AminoAcid::Q,
        AminoAcid::R,
        AminoAcid::S,
        AminoAcid::T,
        AminoAcid::V,
        AminoAcid::W,
        AminoAcid::Y,
    ];

    /// Parse a one-letter code. Only upper-case letters belong to the alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'A' => Self::A,
            'C' => Self::C,
            'D' => Self::D,
            'E' => Self::E,
            'F' => Self::F,
            'G' => Self::G,
            'H' => Self::H,
            'I' => Self::I,
            'K' => Self::K,
            'L' => Self::L,
            'M' => Self::M,
            'N' => Self::N,
            'P' => Self::P,
            'Q' => Self::Q,
            'R' => Self::R,
            'S' => Self::S,
            'T' => Self::T,
            'V' => Self::V,
            'W' => Self::W,
            'Y' => Self::Y,
            _ => return None,
        })
    }

    /// One-letter code.
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::I => 'I',
            Self::K => 'K',
            Self::L => 'L',
            Self::M => 'M',
            Self::N => 'N',
            Self::P => 'P',
            Self::Q => 'Q',
            Self::R => 'R',
            Self::S => 'S',
            Self::T => 'T',
            Self::V => 'V',
            Self::W => 'W',
            Self::Y => 'Y',
        }
    }

    fn props(self) -> Props {
        use Category::*;

        let (name, category, size, color) = match self {
            Self::A => ("Alanine", Hydrophobic, 0.8, 0x4A90E2),
            Self::V => ("Valine", Hydrophobic, 1.2, 0x357ABD),
            Self::L => ("Leucine", Hydrophobic, 1.3, 0x2E5984),
            Self::I => ("Isoleucine", Hydrophobic, 1.3, 0x1E3A5F),
            Self::M => ("Methionine", Hydrophobic, 1.4, 0x50C878),
            Self::F => ("Phenylalanine", Hydrophobic, 1.6, 0x228B22),
            Self::W => ("Tryptophan", Hydrophobic, 1.8, 0x006400),
            Self::P => ("Proline", Hydrophobic, 1.0, 0x32CD32),
            Self::S => ("Serine", Polar, 0.9, 0xFFD700),
            Self::T => ("Threonine", Polar, 1.1, 0xFFA500),
            Self::N => ("Asparagine", Polar, 1.2, 0xFF8C00),
            Self::Q => ("Glutamine", Polar, 1.3, 0xFF7F50),
            Self::Y => ("Tyrosine", Polar, 1.7, 0xFF6347),
            Self::C => ("Cysteine", Polar, 1.0, 0xFFFF00),
            Self::K => ("Lysine", Basic, 1.4, 0xDC143C),
            Self::R => ("Arginine", Basic, 1.6, 0xB22222),
            Self::H => ("Histidine", Basic, 1.3, 0x8B0000),
            Self::D => ("Aspartic acid", Acidic, 1.1, 0x9932CC),
            Self::E => ("Glutamic acid", Acidic, 1.2, 0x8A2BE2),
            Self::G => ("Glycine", Special, 0.6, 0xFFFFFF),
        };
        Props {
            name,
            category,
            size,
            color,
        }
    }

    /// Full residue name.
    pub fn name(self) -> &'static str {
        self.props().name
    }

    /// Chemical-property category.
    pub fn category(self) -> Category {
        self.props().category
    }

    /// Relative size multiplier in `[0.6, 1.8]`, used to scale the base node radius.
    pub fn size(self) -> f64 {
        self.props().size
    }

    /// Opaque display color.
    pub fn color(self) -> Rgba8 {
        Rgba8::from_hex(self.props().color)
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/alphabet.rs"]
mod tests;
