use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

use getset::{CopyGetters, Getters};
use great_circle::GeometryError;
use itertools::Itertools;
use utility::*;

use crate::{
    ImageFrustum, ImageId, LensProjection, MappingDirection, MappingEdge, MatchRecord,
    OverlapError, OverlapOptions, OverlapPolygon,
};

/// One image in the mapping graph.
#[derive(Clone, Debug, Getters, CopyGetters)]
pub struct ImageData {
    #[get = "pub"]
    id: ImageId,
    #[get_copy = "pub"]
    lens: LensProjection,
    edges: Vec<MappingEdge>,
    #[get_copy = "pub"]
    base_orientation: Option<Orientation>,
    /// Built from `base_orientation` on first use.
    frustum: OnceCell<Result<ImageFrustum, GeometryError>>,
}

impl ImageData {
    pub fn new(id: impl Into<ImageId>, lens: LensProjection) -> Self {
        Self {
            id: id.into(),
            lens,
            edges: vec![],
            base_orientation: None,
            frustum: OnceCell::new(),
        }
    }

    /// Replaces any record already stored for the same neighbour and direction.
    pub fn add_map_data(
        &mut self,
        other: ImageId,
        direction: MappingDirection,
        record: MatchRecord,
    ) {
        match self
            .edges
            .iter_mut()
            .find(|edge| *edge.target() == other && *edge.direction() == direction)
        {
            Some(edge) => edge.set_record(record),
            None => self.edges.push(MappingEdge::new(other, direction, record)),
        }
    }

    pub fn map_data(
        &self,
        other: &ImageId,
        direction: MappingDirection,
    ) -> Option<&MatchRecord> {
        self.edges
            .iter()
            .find(|edge| edge.target() == other && *edge.direction() == direction)
            .map(|edge| edge.record())
    }

    pub fn edges(&self) -> &[MappingEdge] {
        &self.edges
    }

    /// Edges sorted by neighbour name, then direction flag.
    pub fn edges_in_propagation_order(&self) -> Vec<&MappingEdge> {
        self.edges
            .iter()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .collect()
    }

    pub fn neighbours(&self) -> Vec<&ImageId> {
        self.edges
            .iter()
            .map(|edge| edge.target())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn is_oriented(&self) -> bool {
        self.base_orientation.is_some()
    }

    /// The image's outline on the sphere. `Ok(None)` while unoriented.
    pub fn frustum(&self) -> Result<Option<&ImageFrustum>, GeometryError> {
        let Some(orientation) = self.base_orientation else {
            return Ok(None);
        };
        self.frustum
            .get_or_init(|| ImageFrustum::from_lens(&self.lens, &orientation))
            .as_ref()
            .map(Some)
            .map_err(|e| e.clone())
    }

    /// Sets the orientation unless one is already set. Returns the orientation
    /// now in effect and whether it was newly set.
    pub fn orient_once(&mut self, orientation: Orientation) -> (Orientation, bool) {
        match self.base_orientation {
            Some(existing) => (existing, false),
            None => {
                self.base_orientation = Some(orientation);
                (orientation, true)
            }
        }
    }

    /// Returns whether anything changed.
    pub fn set_base_orientation(&mut self, orientation: Orientation) -> bool {
        self.orient_once(orientation).1
    }

    fn frustum_for_overlap(&self) -> Result<Option<&ImageFrustum>, OverlapError> {
        self.frustum().map_err(|source| OverlapError::Frustum {
            image: self.id.clone(),
            source,
        })
    }

    /// `Ok(None)` if either image is unoriented or they do not overlap.
    pub fn find_overlap(
        &self,
        other: &ImageData,
        options: &OverlapOptions,
    ) -> Result<Option<OverlapPolygon>, OverlapError> {
        match (self.frustum_for_overlap()?, other.frustum_for_overlap()?) {
            (Some(own), Some(theirs)) => own.find_overlap_with(theirs, options),
            _ => Ok(None),
        }
    }

    /// Overlaps with every other oriented image, by name. `None` if this image
    /// has no orientation yet.
    pub fn find_overlaps<'a>(
        &self,
        others: impl IntoIterator<Item = &'a ImageData>,
        options: &OverlapOptions,
    ) -> Result<Option<BTreeMap<ImageId, OverlapPolygon>>, OverlapError> {
        if !self.is_oriented() {
            return Ok(None);
        }
        let mut result = BTreeMap::new();
        for other in others {
            if other.id == self.id {
                continue;
            }
            if let Some(polygon) = self.find_overlap(other, options)? {
                result.insert(other.id.clone(), polygon);
            }
        }
        Ok(Some(result))
    }
}

impl fmt::Display for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} =>", self.id)?;
        for neighbour in self.neighbours() {
            write!(f, " {}", neighbour)?;
        }
        Ok(())
    }
}
