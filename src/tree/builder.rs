use super::{Body, Cell, Link, Node, NodeID, Tree};
use crate::error::BuildError;

/// Assembles a [`Tree`] from nodes declared with their parent, then wires the `next` and `more`
/// links in preorder.
///
/// Children are visited in the order they were declared. Node ids returned by the builder are the
/// ids of the built tree, so they can be used as body identities for self-exclusion.
///
/// # Example
///
/// ```
/// use treegrav::prelude::*;
/// use glam::DVec3;
///
/// let mut builder = TreeBuilder::new();
/// let root = builder.cell(None, Cell::new(DVec3::ZERO, 2.0, f64::INFINITY));
/// let a = builder.body(Some(root), Body::new(DVec3::X, 1.0));
/// let b = builder.body(Some(root), Body::new(-DVec3::X, 1.0));
/// let tree = builder.build().unwrap();
///
/// assert_eq!(tree.link(root).more, Some(a));
/// assert_eq!(tree.link(a).next, Some(b));
/// assert_eq!(tree.link(b).next, None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeID>>,
}

impl TreeBuilder {
    /// Creates a new empty [`TreeBuilder`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty [`TreeBuilder`] with room for at least `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
        }
    }

    /// Declares a node under `parent`, or as the root if `parent` is `None`.
    ///
    /// Past [`NodeID::MAX`] nodes the returned id saturates and [`TreeBuilder::build`] fails with
    /// [`BuildError::TooManyNodes`].
    #[inline]
    pub fn push(&mut self, parent: Option<NodeID>, node: Node) -> NodeID {
        let id = NodeID::try_from(self.nodes.len()).unwrap_or(NodeID::MAX);
        self.nodes.push(node);
        self.parents.push(parent);
        id
    }

    /// Declares a cell under `parent`.
    #[inline]
    pub fn cell(&mut self, parent: Option<NodeID>, cell: Cell) -> NodeID {
        self.push(parent, Node::Cell(cell))
    }

    /// Declares a body under `parent`.
    #[inline]
    pub fn body(&mut self, parent: Option<NodeID>, body: Body) -> NodeID {
        self.push(parent, Node::Body(body))
    }

    /// Validates the declared structure and wires the traversal links.
    pub fn build(self) -> Result<Tree, BuildError> {
        let len = self.nodes.len();
        super::check_len(len)?;
        let mut root = None;
        let mut children = vec![Vec::new(); len];

        for (id, &parent) in self.parents.iter().enumerate() {
            let id = id as NodeID;
            match parent {
                None => match root {
                    None => root = Some(id),
                    Some(first) => return Err(BuildError::MultipleRoots { first, second: id }),
                },
                // Parents must be declared first, which also rules out cycles.
                Some(parent) if parent >= id => {
                    return Err(BuildError::UnknownParent { node: id, parent })
                }
                Some(parent) => match self.nodes[parent as usize] {
                    Node::Cell(_) => children[parent as usize].push(id),
                    Node::Body(_) => return Err(BuildError::ParentIsBody { node: id, parent }),
                },
            }
        }

        let Some(root) = root else {
            return if len == 0 {
                Ok(Tree::default())
            } else {
                Err(BuildError::NoRoot)
            };
        };

        let mut links = vec![Link::default(); len];
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let index = id as usize;
            let kids = &children[index];

            if self.nodes[index].is_cell() {
                if kids.is_empty() {
                    return Err(BuildError::EmptyCell { cell: id });
                }
                links[index].more = Some(kids[0]);
            }

            let after = links[index].next;
            for (i, &kid) in kids.iter().enumerate() {
                links[kid as usize].next = kids.get(i + 1).copied().or(after);
            }

            stack.extend(kids.iter().rev());
        }

        Tree::new(Some(root), self.nodes, links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeView;
    use glam::DVec3;

    fn cell() -> Cell {
        Cell::new(DVec3::ZERO, 1.0, 1.0)
    }

    fn body() -> Body {
        Body::new(DVec3::ZERO, 1.0)
    }

    #[test]
    fn wires_preorder_links() {
        let mut builder = TreeBuilder::new();
        let root = builder.cell(None, cell());
        let inner = builder.cell(Some(root), cell());
        let outer = builder.body(Some(root), body());
        let a = builder.body(Some(inner), body());
        let b = builder.body(Some(inner), body());
        let tree = builder.build().unwrap();

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.link(root), Link { next: None, more: Some(inner) });
        assert_eq!(tree.link(inner), Link { next: Some(outer), more: Some(a) });
        assert_eq!(tree.link(a), Link { next: Some(b), more: None });
        assert_eq!(tree.link(b), Link { next: Some(outer), more: None });
        assert_eq!(tree.link(outer), Link { next: None, more: None });

        assert_eq!(tree.scan().collect::<Vec<_>>(), vec![root, inner, a, b, outer]);
        assert_eq!(tree.bodies().collect::<Vec<_>>(), vec![a, b, outer]);
    }

    #[test]
    fn single_body_tree() {
        let mut builder = TreeBuilder::new();
        let only = builder.body(None, body());
        let tree = builder.build().unwrap();

        assert_eq!(tree.scan().collect::<Vec<_>>(), vec![only]);
    }

    #[test]
    fn empty_builder_gives_empty_tree() {
        let tree = TreeBuilder::new().build().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn rejects_invalid_structures() {
        let mut builder = TreeBuilder::new();
        builder.cell(None, cell());
        builder.cell(None, cell());
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::MultipleRoots { first: 0, second: 1 }
        );

        let mut builder = TreeBuilder::new();
        let leaf = builder.body(None, body());
        builder.body(Some(leaf), body());
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::ParentIsBody { node: 1, parent: 0 }
        );

        let mut builder = TreeBuilder::new();
        builder.cell(None, cell());
        builder.body(Some(4), body());
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::UnknownParent { node: 1, parent: 4 }
        );

        let mut builder = TreeBuilder::new();
        let root = builder.cell(None, cell());
        builder.cell(Some(root), cell());
        assert_eq!(builder.build().unwrap_err(), BuildError::EmptyCell { cell: 1 });

        let mut builder = TreeBuilder::new();
        builder.push(Some(1), Node::Body(body()));
        builder.push(Some(0), Node::Body(body()));
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::UnknownParent { node: 0, parent: 1 }
        );
    }
}
