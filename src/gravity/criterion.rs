use crate::tree::{Cell, NodeID};
use glam::DVec3;

/// Displacement from an evaluation point to a node, computed by the opening test and handed to
/// [`Field::accumulate`](super::Field::accumulate) so it is not computed twice.
///
/// Only valid for the node it was computed for and only until the next node is examined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    /// Node the displacement was computed for.
    pub node: NodeID,
    /// Node position minus evaluation point.
    pub dr: DVec3,
    /// Squared norm of `dr`, unsoftened.
    pub drsq: f64,
}

impl Separation {
    /// Computes the separation between a node at `position` and the point `at`.
    #[inline]
    pub fn between(node: NodeID, position: DVec3, at: DVec3) -> Self {
        let dr = position - at;
        Self {
            node,
            dr,
            drsq: dr.length_squared(),
        }
    }
}

/// Decides whether `cell` is too close to `at` to be accepted as a single term.
///
/// Returns `true` when the cell must be opened, along with the separation that was computed.
#[inline]
pub fn subdivide(id: NodeID, cell: &Cell, at: DVec3) -> (bool, Separation) {
    let separation = Separation::between(id, cell.position, at);
    (separation.drsq < cell.rcrit2, separation)
}
