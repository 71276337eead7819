use crate::tree::NodeID;
use thiserror::Error;

/// Failure of a force evaluation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GravityError {
    /// The body was evaluated as a member of a tree that never visited it, meaning the tree was
    /// built from a different or stale set of bodies.
    #[error("tree-incest detected: node {body} was not encountered in the tree it is a member of")]
    TreeIncest {
        /// Identity of the body that was not found.
        body: NodeID,
    },
}

/// Failure to assemble a [`Tree`](crate::tree::Tree) from its parts.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// No node was declared without a parent.
    #[error("no root node was declared")]
    NoRoot,
    /// More than one node was declared without a parent.
    #[error("nodes {first} and {second} were both declared as root")]
    MultipleRoots {
        /// First root encountered.
        first: NodeID,
        /// Second root encountered.
        second: NodeID,
    },
    /// A node references a parent that was not declared before it.
    #[error("node {node} references unknown parent {parent}")]
    UnknownParent {
        /// Offending node.
        node: NodeID,
        /// Missing parent.
        parent: NodeID,
    },
    /// A node was attached to a body.
    #[error("node {node} is attached to body {parent}, only cells can have children")]
    ParentIsBody {
        /// Offending node.
        node: NodeID,
        /// Body used as a parent.
        parent: NodeID,
    },
    /// A cell has no children, so descending into it would end the scan.
    #[error("cell {cell} has no children")]
    EmptyCell {
        /// Childless cell.
        cell: NodeID,
    },
    /// The node and link vectors are not parallel.
    #[error("{nodes} nodes were given with {links} links")]
    LengthMismatch {
        /// Number of nodes.
        nodes: usize,
        /// Number of links.
        links: usize,
    },
    /// More nodes were declared than [`NodeID`] can address.
    #[error("{nodes} nodes cannot all be addressed by a node id")]
    TooManyNodes {
        /// Number of nodes.
        nodes: usize,
    },
    /// A link or the root points outside of the node vector.
    #[error("node {node} links to {target}, which is out of range")]
    LinkOutOfRange {
        /// Node holding the link, or the target itself for the root.
        node: NodeID,
        /// Out of range target.
        target: NodeID,
    },
}

/// Result type used for force evaluations.
pub type Result<T, E = GravityError> = std::result::Result<T, E>;
