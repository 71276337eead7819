use crate::{
    error::Result,
    gravity::{Field, Gravity, ScanStats},
    potential::ExternalPotential,
    tree::{Node, NodeID, Tree, TreeView},
};
use glam::DVec3;

/// Evaluates the field on every body in `bodies` using one CPU thread, writing each result to the
/// slot at the same index in `outputs`.
///
/// Bodies are evaluated as members of `tree`. The first tree-incest error in strict mode stops the
/// batch; slots of bodies evaluated before it keep their new values.
///
/// # Panics
///
/// Panics if `bodies` and `outputs` have different lengths.
pub fn evaluate_bodies<T, P>(
    gravity: &Gravity,
    tree: &T,
    background: &P,
    bodies: &[NodeID],
    outputs: &mut [Field],
) -> Result<ScanStats>
where
    T: TreeView + ?Sized,
    P: ExternalPotential + ?Sized,
{
    assert_eq!(
        bodies.len(),
        outputs.len(),
        "every body needs exactly one output slot"
    );

    let mut stats = ScanStats::default();
    for (&body, output) in bodies.iter().zip(outputs.iter_mut()) {
        stats += gravity
            .evaluate_body(tree, body, background, true, output)?
            .stats;
    }

    log::debug!(
        "evaluated {} bodies with {} body terms and {} cell terms",
        bodies.len(),
        stats.body_terms,
        stats.cell_terms
    );

    Ok(stats)
}

/// Evaluates the field on every body of `tree` in preorder.
///
/// Returns the ids of the bodies along with their fields.
pub fn evaluate_tree<P>(
    gravity: &Gravity,
    tree: &Tree,
    background: &P,
) -> Result<(Vec<NodeID>, Vec<Field>)>
where
    P: ExternalPotential + ?Sized,
{
    let bodies: Vec<_> = tree.bodies().collect();
    let mut outputs = vec![Field::ZERO; bodies.len()];
    evaluate_bodies(gravity, tree, background, &bodies, &mut outputs)?;

    Ok((bodies, outputs))
}

/// Softened pairwise sum of the field of every body of `tree` at `at`, excluding `skip`.
///
/// Bodies are summed in preorder, which is the order a scan that opens every cell reaches them.
/// Used as the exact reference for the tree walk.
pub fn direct_sum(tree: &Tree, at: DVec3, skip: Option<NodeID>, softening: f64) -> Field {
    tree.bodies()
        .filter(|&id| Some(id) != skip)
        .fold(Field::ZERO, |mut field, id| {
            let node = tree.node(id);
            debug_assert!(matches!(node, Node::Body(_)));
            field.accumulate(id, node, at, None, softening, false);
            field
        })
}
