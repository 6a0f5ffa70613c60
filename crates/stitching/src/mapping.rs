use derive_more::{Constructor, Display, From};
use getset::{CopyGetters, Getters};
use utility::*;

use crate::PropagationOptions;

/// Stable name of an image. Propagation order is derived from these.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
pub struct ImageId(String);

impl ImageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        ImageId(value.to_string())
    }
}

/// Which way round a stored relative orientation reads.
///
/// `Forward` records map this image to the neighbour. `Reverse` records were
/// measured from the neighbour's side and are inverted before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MappingDirection {
    Reverse,
    Forward,
}

impl MappingDirection {
    pub fn flag(&self) -> u8 {
        match self {
            MappingDirection::Reverse => 0,
            MappingDirection::Forward => 1,
        }
    }

    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            MappingDirection::Reverse
        } else {
            MappingDirection::Forward
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            MappingDirection::Reverse => MappingDirection::Forward,
            MappingDirection::Forward => MappingDirection::Reverse,
        }
    }
}

/// One estimate from the feature matcher.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Constructor)]
#[get_copy = "pub"]
pub struct OrientationCandidate {
    iteration: u32,
    score: f64,
    relative_orientation: RelativeOrientation,
    starting_orientation: RelativeOrientation,
}

impl OrientationCandidate {
    /// Quaternions as `[r, i, j, k]`, the order the matcher writes them in.
    pub fn from_rijk(iteration: u32, score: f64, relative: [f64; 4], starting: [f64; 4]) -> Self {
        let [r, i, j, k] = relative;
        let [sr, si, sj, sk] = starting;
        Self::new(
            iteration,
            score,
            relative_orientation_from_rijk(r, i, j, k),
            relative_orientation_from_rijk(sr, si, sj, sk),
        )
    }

    pub fn is_low_confidence(&self, options: &PropagationOptions) -> bool {
        self.iteration == options.low_confidence_iteration
            && self.score < options.min_first_iteration_score
    }
}

/// Candidates for one pair of images, ranked worst to best.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchRecord {
    best_qs: Vec<OrientationCandidate>,
}

impl MatchRecord {
    pub fn new(best_qs: Vec<OrientationCandidate>) -> Self {
        Self { best_qs }
    }

    pub fn push(&mut self, candidate: OrientationCandidate) {
        self.best_qs.push(candidate);
    }

    pub fn best_qs(&self) -> &[OrientationCandidate] {
        &self.best_qs
    }

    pub fn best(&self) -> Option<&OrientationCandidate> {
        self.best_qs.last()
    }

    pub fn is_empty(&self) -> bool {
        self.best_qs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Getters, Constructor)]
#[get = "pub"]
pub struct MappingEdge {
    target: ImageId,
    direction: MappingDirection,
    record: MatchRecord,
}

impl MappingEdge {
    pub fn sort_key(&self) -> (&ImageId, u8) {
        (&self.target, self.direction.flag())
    }

    pub fn set_record(&mut self, record: MatchRecord) {
        self.record = record;
    }

    /// The candidate's relative orientation read from this edge's source
    /// towards its target.
    pub fn directed_relative_orientation(
        &self,
        candidate: &OrientationCandidate,
    ) -> RelativeOrientation {
        match self.direction {
            MappingDirection::Forward => candidate.relative_orientation(),
            MappingDirection::Reverse => candidate.relative_orientation().inverse(),
        }
    }
}
