//! Directed arcs of great circles on the unit sphere, and where two of them cross.
//!
//! Positions along an arc are measured with [`QuadrantPosition`], a monotone
//! stand-in for the angle from the arc's start that needs no inverse trig.

use utility::pub_mod_and_use;

pub_mod_and_use!(arc, error, intersection, quadrant_position);
