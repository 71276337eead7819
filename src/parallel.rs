use crate::{
    error::Result,
    gravity::{Field, Gravity, ScanStats},
    potential::ExternalPotential,
    tree::{NodeID, TreeView},
};

/// Evaluates the field on every body in `bodies` using the CPU with
/// [rayon](https://github.com/rayon-rs/rayon), writing each result to the slot at the same index in
/// `outputs`.
///
/// Every body only writes its own slot and reads the shared tree, so the result of each slot is the
/// same as with [`evaluate_bodies`](crate::sequential::evaluate_bodies). The one-shot tree-incest
/// warning is shared between threads through the [`Gravity`] instance.
///
/// On a strict tree-incest error, the batch stops as soon as possible and one of the errors is
/// returned. Which other slots were written is unspecified.
///
/// # Panics
///
/// Panics if `bodies` and `outputs` have different lengths.
pub fn par_evaluate_bodies<T, P>(
    gravity: &Gravity,
    tree: &T,
    background: &P,
    bodies: &[NodeID],
    outputs: &mut [Field],
) -> Result<ScanStats>
where
    T: TreeView + Sync + ?Sized,
    P: ExternalPotential + Sync + ?Sized,
{
    use rayon::iter::{
        IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator,
        ParallelIterator,
    };

    assert_eq!(
        bodies.len(),
        outputs.len(),
        "every body needs exactly one output slot"
    );

    let stats = bodies
        .par_iter()
        .zip(outputs.par_iter_mut())
        .map(|(&body, output)| {
            gravity
                .evaluate_body(tree, body, background, true, output)
                .map(|evaluation| evaluation.stats)
        })
        .try_reduce(ScanStats::default, |a, b| Ok(a + b))?;

    log::debug!(
        "evaluated {} bodies in parallel with {} body terms and {} cell terms",
        bodies.len(),
        stats.body_terms,
        stats.cell_terms
    );

    Ok(stats)
}
