use std::{fs::File, io::BufReader, path::Path};

use crate::{
    anim::state::{AnimationState, validate_speed},
    foundation::error::{AminovizError, AminovizResult},
    layout::engine::LayoutMode,
};

/// Name shown in the caption when the record has none.
pub const DEFAULT_DISPLAY_NAME: &str = "Example protein";

/// Host record describing one protein.
///
/// Only `sequence` and `display_name` are consumed; everything else is carried in `extra`
/// and written back out unchanged.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProteinRecord {
    /// Raw sequence text; may be missing, empty, or the "unavailable" sentinel.
    #[serde(default, alias = "secuencia")]
    pub sequence: Option<String>,
    /// Human-readable protein name.
    #[serde(default, alias = "nombre", alias = "displayName")]
    pub display_name: Option<String>,
    /// Fields passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProteinRecord {
    /// Record with just a sequence.
    pub fn with_sequence(sequence: impl Into<String>) -> Self {
        Self {
            sequence: Some(sequence.into()),
            ..Self::default()
        }
    }

    /// Parse a record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AminovizResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AminovizError::validation(format!("parse protein record JSON: {e}")))
    }

    /// Parse a record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AminovizResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AminovizError::validation(format!("open protein record '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Display name, or [`DEFAULT_DISPLAY_NAME`] when missing or blank.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// Host-facing knobs of a visualization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VizOptions {
    /// Placement algorithm.
    pub layout_mode: LayoutMode,
    /// Time multiplier in `[0, 3]`.
    pub speed: f64,
    /// Initial play state.
    pub running: bool,
}

impl Default for VizOptions {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::Spiral,
            speed: 1.0,
            running: true,
        }
    }
}

impl VizOptions {
    /// Parse options from a JSON reader and validate them.
    pub fn from_reader<R: std::io::Read>(r: R) -> AminovizResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| AminovizError::validation(format!("parse options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AminovizResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AminovizError::validation(format!("open options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject a speed outside `[0, 3]`.
    pub fn validate(&self) -> AminovizResult<()> {
        validate_speed(self.speed).map(|_| ())
    }

    /// Initial animation state for these options, with the speed snapped to its step.
    pub fn animation_state(&self) -> AminovizResult<AnimationState> {
        Ok(AnimationState {
            running: self.running,
            speed: validate_speed(self.speed)?,
            elapsed_ms: 0.0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
