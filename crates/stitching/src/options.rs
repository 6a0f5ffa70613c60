use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::LensProjection;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StitchOptions {
    pub propagation: PropagationOptions,
    pub overlap: OverlapOptions,
    /// Lens given to images that are first seen through a mapping.
    pub lens: LensProjection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropagationOptions {
    /// Candidates from this matcher iteration are only trusted above `min_first_iteration_score`.
    pub low_confidence_iteration: u32,
    pub min_first_iteration_score: f64,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self {
            low_confidence_iteration: 0,
            min_first_iteration_score: 20.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlapOptions {
    /// When `None`, twice the number of crossings plus corners.
    pub max_walk_steps: Option<usize>,
}

impl OverlapOptions {
    pub fn walk_step_limit(&self, num_crossings: usize) -> usize {
        self.max_walk_steps.unwrap_or(2 * (num_crossings + 8))
    }
}

impl StitchOptions {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read options {}: {}", path.display(), e))?;
        Self::from_json_str(&data)
            .map_err(|e| format!("Failed to parse options {}: {}", path.display(), e))
    }
}
