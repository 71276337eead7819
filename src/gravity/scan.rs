use super::{criterion::subdivide, Field};
use crate::tree::{Node, NodeID, TreeView};
use glam::DVec3;
use std::ops::{Add, AddAssign};

/// Number of terms accumulated during a tree scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Bodies accumulated as single terms.
    pub body_terms: u64,
    /// Cells accepted and accumulated as single terms.
    pub cell_terms: u64,
}

impl ScanStats {
    /// Total number of accumulated terms.
    #[inline]
    pub const fn terms(&self) -> u64 {
        self.body_terms + self.cell_terms
    }
}

impl Add for ScanStats {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            body_terms: self.body_terms + rhs.body_terms,
            cell_terms: self.cell_terms + rhs.cell_terms,
        }
    }
}

impl AddAssign for ScanStats {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Result of a [`tree_scan`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scanned {
    /// Field accumulated from the tree.
    pub field: Field,
    /// `true` if the skipped node was reached as a single term.
    pub skipped_self: bool,
    /// Accumulated term counts.
    pub stats: ScanStats,
}

/// Walks `tree` in preorder and accumulates the field at `at`, opening cells that fail the
/// critical radius test and skipping `skip` if it is reached.
///
/// The walk is iterative: cells that must be opened are entered through their `more` link,
/// everything else is accumulated as a single term before following `next`.
pub fn tree_scan<T>(
    tree: &T,
    at: DVec3,
    skip: Option<NodeID>,
    softening: f64,
    use_quadrupole: bool,
) -> Scanned
where
    T: TreeView + ?Sized,
{
    let mut scanned = Scanned::default();
    let mut current = tree.root();

    while let Some(id) = current {
        let node = tree.node(id);
        let link = tree.link(id);

        let memo = match node {
            Node::Cell(cell) => {
                let (open, separation) = subdivide(id, cell, at);
                if open {
                    current = link.more;
                    continue;
                }
                Some(separation)
            }
            Node::Body(_) => None,
        };

        if skip == Some(id) {
            scanned.skipped_self = true;
        } else {
            scanned
                .field
                .accumulate(id, node, at, memo, softening, use_quadrupole);

            match node {
                Node::Body(_) => scanned.stats.body_terms += 1,
                Node::Cell(_) => scanned.stats.cell_terms += 1,
            }
        }

        current = link.next;
    }

    scanned
}
