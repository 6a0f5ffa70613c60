use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use enum_as_inner::EnumAsInner;
use getset::Getters;
use log::{info, warn};
use utility::*;

use crate::{
    GraphError, ImageData, ImageId, MappingDirection, MatchRecord, OverlapPolygon, StitchOptions,
};

#[derive(Clone, Copy, Debug, PartialEq, EnumAsInner)]
pub enum NodeOrientation {
    Oriented(Orientation),
    Unoriented,
}

impl From<Option<Orientation>> for NodeOrientation {
    fn from(value: Option<Orientation>) -> Self {
        value.map_or(NodeOrientation::Unoriented, NodeOrientation::Oriented)
    }
}

/// `source` gave `target` its orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationStep {
    pub source: ImageId,
    pub target: ImageId,
}

/// An edge skipped because its best candidate was not trusted.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedEdge {
    pub source: ImageId,
    pub target: ImageId,
    pub iteration: u32,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Getters)]
#[get = "pub"]
pub struct PropagationReport {
    root: ImageId,
    /// Every image in the graph, oriented or not.
    orientations: BTreeMap<ImageId, NodeOrientation>,
    /// In the order the walk made them.
    steps: Vec<PropagationStep>,
    rejected: Vec<RejectedEdge>,
}

impl PropagationReport {
    pub fn orientation_of(&self, id: &ImageId) -> Option<Orientation> {
        self.orientations
            .get(id)
            .and_then(|node| node.as_oriented().copied())
    }

    pub fn unoriented(&self) -> Vec<&ImageId> {
        self.orientations
            .iter()
            .filter(|(_, node)| **node == NodeOrientation::Unoriented)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn num_oriented(&self) -> usize {
        self.orientations.len() - self.unoriented().len()
    }
}

impl fmt::Display for PropagationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, node) in &self.orientations {
            match node {
                NodeOrientation::Oriented(q) => writeln!(
                    f,
                    "{} r={:.6} i={:.6} j={:.6} k={:.6}",
                    id, q.r, q.i, q.j, q.k
                )?,
                NodeOrientation::Unoriented => writeln!(f, "# {} has no orientation", id)?,
            }
        }
        Ok(())
    }
}

/// Images and the pairwise mappings between them.
#[derive(Clone, Debug, Default)]
pub struct MappingGraph {
    images: BTreeMap<ImageId, ImageData>,
    options: StitchOptions,
}

impl MappingGraph {
    pub fn new(options: StitchOptions) -> Self {
        Self {
            images: BTreeMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &StitchOptions {
        &self.options
    }

    /// Returns the image previously stored under the same name.
    pub fn add_image(&mut self, image: ImageData) -> Option<ImageData> {
        self.images.insert(image.id().clone(), image)
    }

    fn image_mut_or_insert(&mut self, id: &ImageId) -> &mut ImageData {
        let lens = self.options.lens;
        self.images
            .entry(id.clone())
            .or_insert_with(|| ImageData::new(id.clone(), lens))
    }

    /// Stores a mapping measured from `from` to `to` on both images, creating
    /// either image if it is new.
    pub fn add_mapping(
        &mut self,
        from: impl Into<ImageId>,
        to: impl Into<ImageId>,
        record: MatchRecord,
    ) {
        let (from, to) = (from.into(), to.into());
        self.image_mut_or_insert(&from)
            .add_map_data(to.clone(), MappingDirection::Forward, record.clone());
        self.image_mut_or_insert(&to)
            .add_map_data(from, MappingDirection::Reverse, record);
    }

    pub fn image(&self, id: &ImageId) -> Option<&ImageData> {
        self.images.get(id)
    }

    /// Sorted by name.
    pub fn images(&self) -> impl Iterator<Item = &ImageData> {
        self.images.values()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn orientation_of(&self, id: &ImageId) -> Option<Orientation> {
        self.images.get(id).and_then(|image| image.base_orientation())
    }

    /// First edge target, in name order, that is not an image of this graph.
    fn missing_target(&self) -> Option<&ImageId> {
        self.images
            .values()
            .flat_map(|image| image.edges())
            .map(|edge| edge.target())
            .find(|target| !self.images.contains_key(*target))
    }

    /// Breadth first from `root`, giving each reachable image
    /// `orientation(source) * relative` along the first trusted edge that
    /// reaches it. Images that already have an orientation keep it.
    ///
    /// Fails before changing anything if `root` or any edge target is not in
    /// the graph.
    pub fn propagate(
        &mut self,
        root: &ImageId,
        seed: Orientation,
    ) -> Result<PropagationReport, GraphError> {
        if let Some(missing) = self.missing_target() {
            return Err(GraphError::UnknownImage(missing.clone()));
        }
        let root_image = self
            .images
            .get_mut(root)
            .ok_or_else(|| GraphError::UnknownImage(root.clone()))?;
        let (root_orientation, newly_set) = root_image.orient_once(seed);
        if !newly_set {
            warn!(
                "{} is already oriented, propagating from its existing orientation",
                root
            );
        }

        let mut queue = VecDeque::from([(root.clone(), root_orientation)]);
        let mut queued = BTreeSet::from([root.clone()]);
        let mut visited = BTreeSet::new();
        let mut steps = vec![];
        let mut rejected = vec![];

        while let Some((id, base)) = queue.pop_front() {
            visited.insert(id.clone());

            let mut assignments = vec![];
            for edge in self.images[&id].edges_in_propagation_order() {
                if visited.contains(edge.target()) {
                    continue;
                }
                let Some(candidate) = edge.record().best() else {
                    continue;
                };
                if candidate.is_low_confidence(&self.options.propagation) {
                    info!("Ignoring poor match {} => {}", id, edge.target());
                    rejected.push(RejectedEdge {
                        source: id.clone(),
                        target: edge.target().clone(),
                        iteration: candidate.iteration(),
                        score: candidate.score(),
                    });
                    continue;
                }
                let relative = edge.directed_relative_orientation(candidate);
                assignments.push((
                    edge.target().clone(),
                    compose_orientation(&base, &relative),
                ));
            }

            for (target, orientation) in assignments {
                let Some(target_image) = self.images.get_mut(&target) else {
                    continue;
                };
                let (kept, newly_set) = target_image.orient_once(orientation);
                if newly_set {
                    info!("{} --> {}", id, target);
                    steps.push(PropagationStep {
                        source: id.clone(),
                        target: target.clone(),
                    });
                }
                if queued.insert(target.clone()) {
                    queue.push_back((target, kept));
                }
            }
        }

        Ok(PropagationReport {
            root: root.clone(),
            orientations: self
                .images
                .iter()
                .map(|(id, image)| (id.clone(), image.base_orientation().into()))
                .collect(),
            steps,
            rejected,
        })
    }

    /// Overlap polygons of `id` against every other oriented image.
    pub fn find_overlaps(
        &self,
        id: &ImageId,
    ) -> Result<Option<BTreeMap<ImageId, OverlapPolygon>>, GraphError> {
        let image = self
            .image(id)
            .ok_or_else(|| GraphError::UnknownImage(id.clone()))?;
        Ok(image.find_overlaps(self.images(), &self.options.overlap)?)
    }
}

impl fmt::Display for MappingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for image in self.images() {
            writeln!(f, "{}", image)?;
        }
        Ok(())
    }
}
