/// Assembly of a [`Tree`] from parent/child declarations.
pub mod builder;

pub use builder::TreeBuilder;

use crate::error::BuildError;
use glam::{DMat3, DVec3};

/// Index of a [`Node`] in a [`Tree`]. Also the identity of a body for self-exclusion.
pub type NodeID = u32;

/// Fails if `len` nodes cannot all be addressed by a [`NodeID`].
#[inline]
pub(crate) fn check_len(len: usize) -> Result<(), BuildError> {
    match len.checked_sub(1).map(NodeID::try_from) {
        Some(Err(_)) => Err(BuildError::TooManyNodes { nodes: len }),
        _ => Ok(()),
    }
}

/// A single particle of the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    /// Position of the body.
    pub position: DVec3,
    /// Velocity of the body. Carried for the integrator, unused by the force evaluation.
    pub velocity: DVec3,
    /// Mass of the body, non-negative.
    pub mass: f64,
}

impl Body {
    /// Creates a new [`Body`] at rest.
    #[inline]
    pub const fn new(position: DVec3, mass: f64) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            mass,
        }
    }
}

/// Aggregate of the bodies below a node of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Centre of mass of the cell.
    pub position: DVec3,
    /// Total mass of the cell.
    pub mass: f64,
    /// Symmetric quadrupole moment about the centre of mass.
    pub quad: DMat3,
    /// Squared critical radius. A point closer than this to the centre of mass must open the cell.
    pub rcrit2: f64,
}

impl Cell {
    /// Creates a new [`Cell`] without a quadrupole moment.
    #[inline]
    pub const fn new(position: DVec3, mass: f64, rcrit2: f64) -> Self {
        Self {
            position,
            mass,
            quad: DMat3::ZERO,
            rcrit2,
        }
    }

    /// Returns this cell with the given quadrupole moment.
    #[inline]
    pub fn with_quad(mut self, quad: DMat3) -> Self {
        self.quad = quad;
        self
    }
}

/// Builds a symmetric tensor from its six unique components.
#[inline]
pub fn symmetric(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(xx, xy, xz),
        DVec3::new(xy, yy, yz),
        DVec3::new(xz, yz, zz),
    )
}

/// Node of a [`Tree`], either a body or a cell aggregating the nodes below it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Leaf holding one body.
    Body(Body),
    /// Internal node.
    Cell(Cell),
}

impl Node {
    /// Position of the body or centre of mass of the cell.
    #[inline]
    pub const fn position(&self) -> DVec3 {
        match self {
            Self::Body(body) => body.position,
            Self::Cell(cell) => cell.position,
        }
    }

    /// Mass of the body or total mass of the cell.
    #[inline]
    pub const fn mass(&self) -> f64 {
        match self {
            Self::Body(body) => body.mass,
            Self::Cell(cell) => cell.mass,
        }
    }

    /// Returns `true` if the node is a [`Cell`].
    #[inline]
    pub const fn is_cell(&self) -> bool {
        matches!(self, Self::Cell(_))
    }
}

/// Traversal links of a node, set once by whoever builds the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    /// Preorder successor once the subtree rooted at this node is skipped.
    pub next: Option<NodeID>,
    /// First child. Only set on cells.
    pub more: Option<NodeID>,
}

/// Read-only access to a prebuilt tree.
///
/// Implementors guarantee that descending through `more` at every cell and following `next`
/// everywhere else visits every node exactly once, in preorder, before reaching `None`. Following
/// `next` from a cell instead of `more` skips its whole subtree.
pub trait TreeView {
    /// Returns the root of the tree, or `None` if it is empty.
    fn root(&self) -> Option<NodeID>;

    /// Returns the node with the given id.
    ///
    /// May panic if `id` is not a node of the tree.
    fn node(&self, id: NodeID) -> &Node;

    /// Returns the node with the given id, or `None` if `id` is not a node of the tree.
    fn get(&self, id: NodeID) -> Option<&Node>;

    /// Returns the traversal links of the node with the given id.
    fn link(&self, id: NodeID) -> Link;
}

/// Arena of nodes addressed by [`NodeID`] with parallel traversal links.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    root: Option<NodeID>,
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Tree {
    /// Creates a new [`Tree`] from parts produced by an external builder.
    ///
    /// Only the lengths and ranges of the links are checked; the traversal invariant of
    /// [`TreeView`] is the caller's responsibility.
    pub fn new(
        root: Option<NodeID>,
        nodes: Vec<Node>,
        links: Vec<Link>,
    ) -> Result<Self, BuildError> {
        check_len(nodes.len())?;

        if nodes.len() != links.len() {
            return Err(BuildError::LengthMismatch {
                nodes: nodes.len(),
                links: links.len(),
            });
        }

        let len = nodes.len();
        let in_range = |target: NodeID| (target as usize) < len;

        if let Some(root) = root.filter(|&root| !in_range(root)) {
            return Err(BuildError::LinkOutOfRange {
                node: root,
                target: root,
            });
        }

        for (id, link) in links.iter().enumerate() {
            for target in [link.next, link.more].into_iter().flatten() {
                if !in_range(target) {
                    return Err(BuildError::LinkOutOfRange {
                        node: id as NodeID,
                        target,
                    });
                }
            }
        }

        Ok(Self { root, nodes, links })
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the nodes, indexed by [`NodeID`].
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the links, parallel to [`Tree::nodes`].
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns an iterator over every node id in preorder.
    #[inline]
    pub fn scan(&self) -> Scan<'_, Self> {
        Scan::new(self)
    }

    /// Returns an iterator over the ids of the bodies in preorder.
    #[inline]
    pub fn bodies(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.scan().filter(|&id| !self.node(id).is_cell())
    }
}

impl TreeView for Tree {
    #[inline]
    fn root(&self) -> Option<NodeID> {
        self.root
    }

    #[inline]
    fn node(&self, id: NodeID) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    fn get(&self, id: NodeID) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    #[inline]
    fn link(&self, id: NodeID) -> Link {
        self.links[id as usize]
    }
}

/// Iterator visiting every node of a [`TreeView`] in preorder by always descending into cells.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Scan<'a, T: ?Sized> {
    tree: &'a T,
    current: Option<NodeID>,
}

impl<'a, T: TreeView + ?Sized> Scan<'a, T> {
    /// Creates a new [`Scan`] starting at the root of the tree.
    #[inline]
    pub fn new(tree: &'a T) -> Self {
        Self {
            tree,
            current: tree.root(),
        }
    }
}

impl<T: TreeView + ?Sized> Iterator for Scan<'_, T> {
    type Item = NodeID;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let link = self.tree.link(id);

        self.current = match self.tree.node(id) {
            Node::Cell(_) => link.more.or(link.next),
            Node::Body(_) => link.next,
        };

        Some(id)
    }
}
