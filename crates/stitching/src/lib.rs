//! Orienting overlapping photographs on the unit sphere.
//!
//! Every image is a node carrying a lens, a write-once world orientation and
//! ranked relative-orientation estimates towards its neighbours. One image is
//! given an orientation and [`MappingGraph::propagate`] spreads it breadth
//! first. Once oriented, an image's field of view is an [`ImageFrustum`] and
//! two frusta can be intersected into an [`OverlapPolygon`].

use utility::pub_mod_and_use;

pub_mod_and_use!(error, frustum, image_data, lens, mapping, mapping_graph, options, overlap);
