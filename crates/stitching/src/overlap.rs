use enum_as_inner::EnumAsInner;
use getset::Getters;
use great_circle::{ArcIntersection, QuadrantPosition};
use itertools::iproduct;
use log::{debug, warn};
use utility::*;

use crate::{ImageFrustum, OverlapError, OverlapOptions};

/// Which frustum's edge the walk is travelling along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Own,
    Other,
}

/// A corner of the overlap polygon.
#[derive(Clone, Copy, Debug, PartialEq, EnumAsInner)]
pub enum OverlapVertex {
    /// Where `own_edge` of this frustum crosses `other_edge` of the other.
    Crossing {
        own_edge: usize,
        other_edge: usize,
        intersection: ArcIntersection,
    },
    /// A corner of this frustum lying inside the other.
    OwnCorner(usize),
    /// A corner of the other frustum lying inside this one.
    OtherCorner(usize),
}

impl OverlapVertex {
    pub fn is_crossing(&self) -> bool {
        matches!(self, OverlapVertex::Crossing { .. })
    }

    pub fn is_own_corner(&self) -> bool {
        matches!(self, OverlapVertex::OwnCorner(_))
    }

    pub fn is_other_corner(&self) -> bool {
        matches!(self, OverlapVertex::OtherCorner(_))
    }

    fn edge_on(&self, side: Side) -> Option<usize> {
        match (self, side) {
            (OverlapVertex::Crossing { own_edge, .. }, Side::Own) => Some(*own_edge),
            (OverlapVertex::Crossing { other_edge, .. }, Side::Other) => Some(*other_edge),
            _ => None,
        }
    }

    fn position_on(&self, side: Side) -> Option<QuadrantPosition> {
        self.as_crossing().map(|(_, _, intersection)| match side {
            Side::Own => intersection.self_position(),
            Side::Other => intersection.other_position(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Getters)]
#[get = "pub"]
pub struct OverlapPolygon {
    vertices: Vec<OverlapVertex>,
    points: UnitVectorList,
}

impl OverlapPolygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn num_crossings(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_crossing()).count()
    }
}

impl ImageFrustum {
    pub fn find_overlap(
        &self,
        other: &ImageFrustum,
    ) -> Result<Option<OverlapPolygon>, OverlapError> {
        self.find_overlap_with(other, &OverlapOptions::default())
    }

    /// The region both frusta see, walked along their boundaries.
    ///
    /// `Ok(None)` when no edges cross. A frustum entirely inside the other has
    /// no crossings either, so it is also reported as no overlap.
    pub fn find_overlap_with(
        &self,
        other: &ImageFrustum,
        options: &OverlapOptions,
    ) -> Result<Option<OverlapPolygon>, OverlapError> {
        let crossings = self.edge_crossings(other);
        let Some(&first) = crossings.first() else {
            return Ok(None);
        };

        let max_steps = options.walk_step_limit(crossings.len());
        let mut vertices = vec![];
        let mut current = Some(first);
        while let Some(vertex) = current {
            if vertices.len() >= max_steps {
                warn!("overlap walk gave up after {} steps", max_steps);
                return Err(OverlapError::WalkDidNotTerminate { steps: max_steps });
            }
            vertices.push(vertex);
            current = match vertex {
                OverlapVertex::OwnCorner(corner) => {
                    next_along_edge(&crossings, Side::Own, corner, None)
                }
                OverlapVertex::OtherCorner(corner) => {
                    next_along_edge(&crossings, Side::Other, corner, None)
                }
                OverlapVertex::Crossing {
                    own_edge,
                    other_edge,
                    intersection,
                } => {
                    if intersection.other_sense_across_self().is_negative() {
                        next_along_edge(
                            &crossings,
                            Side::Own,
                            own_edge,
                            Some(intersection.self_position()),
                        )
                    } else {
                        next_along_edge(
                            &crossings,
                            Side::Other,
                            other_edge,
                            Some(intersection.other_position()),
                        )
                    }
                }
            };
            debug!("overlap walk: {:?} -> {:?}", vertex, current);
        }

        let points = vertices
            .iter()
            .map(|vertex| match vertex {
                OverlapVertex::Crossing { intersection, .. } => intersection.point(),
                OverlapVertex::OwnCorner(corner) => self.corner(*corner),
                OverlapVertex::OtherCorner(corner) => other.corner(*corner),
            })
            .collect();
        Ok(Some(OverlapPolygon { vertices, points }))
    }

    /// Every crossing of one of our edges with one of theirs, own edge major.
    fn edge_crossings(&self, other: &ImageFrustum) -> Vec<OverlapVertex> {
        iproduct!(0..4, 0..4)
            .filter_map(|(own_edge, other_edge)| {
                match self.arcs()[own_edge].intersect(&other.arcs()[other_edge]) {
                    Ok(found) => found.map(|intersection| OverlapVertex::Crossing {
                        own_edge,
                        other_edge,
                        intersection,
                    }),
                    Err(e) => {
                        debug!("skipping edges {} and {}: {}", own_edge, other_edge, e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// The first crossing on `edge` of `side` strictly beyond `after` (anywhere on
/// the edge when `None`). With none left, the walk turns the corner at the end
/// of the edge. Returns `None` once the walk is back at the first crossing.
fn next_along_edge(
    crossings: &[OverlapVertex],
    side: Side,
    edge: usize,
    after: Option<QuadrantPosition>,
) -> Option<OverlapVertex> {
    let found = crossings
        .iter()
        .enumerate()
        .filter(|(_, c)| c.edge_on(side) == Some(edge))
        .filter_map(|(index, c)| c.position_on(side).map(|position| (index, position)))
        .filter(|(_, position)| after.map_or(true, |after| *position > after))
        .min_by_key(|(_, position)| position.ordered());

    match found {
        Some((0, _)) => None,
        Some((index, _)) => Some(crossings[index]),
        None => {
            let corner = (edge + 1) % 4;
            Some(match side {
                Side::Own => OverlapVertex::OwnCorner(corner),
                Side::Other => OverlapVertex::OtherCorner(corner),
            })
        }
    }
}
