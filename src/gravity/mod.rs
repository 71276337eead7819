/// Critical radius opening test.
pub mod criterion;
/// Monopole and quadrupole accumulation.
pub mod field;
/// Tree-incest policy and one-shot warning.
pub mod incest;
/// Iterative tree walk.
pub mod scan;

pub use criterion::{subdivide, Separation};
pub use field::Field;
pub use incest::{IncestMonitor, IncestPolicy, IncestReport};
pub use scan::{tree_scan, ScanStats, Scanned};

use crate::{
    config::GravityConfig,
    error::Result,
    potential::{evaluate_background, ExternalPotential},
    tree::{Node, NodeID, TreeView},
};
use glam::DVec3;

/// Outcome of a successful evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Terms accumulated from the tree.
    pub stats: ScanStats,
    /// Result of the tree-incest check.
    pub incest: IncestReport,
}

/// Evaluates the gravitational field on bodies from a prebuilt tree and a background potential.
///
/// A [`Gravity`] holds the configuration of a run and its one-shot tree-incest warning, so a single
/// instance should be shared by every evaluation of the run, including across threads.
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
/// builder.body(Some(root), Body::new(-DVec3::X, 1.0));
/// let tree = builder.build().unwrap();
///
/// let gravity = Gravity::new(GravityConfig::new(0.0, IncestPolicy::Strict));
/// let mut output = Field::ZERO;
/// gravity.evaluate_body(&tree, a, &(), true, &mut output).unwrap();
///
/// assert_eq!(output.potential, -0.5);
/// assert_eq!(output.acceleration, DVec3::new(-0.25, 0.0, 0.0));
/// ```
#[derive(Debug)]
pub struct Gravity {
    config: GravityConfig,
    monitor: IncestMonitor,
}

impl Gravity {
    /// Creates a new [`Gravity`] evaluator for a run.
    ///
    /// The lenient tree-incest warning is emitted at most once per instance. Create one instance
    /// per run and share it by reference across steps and threads rather than creating one per
    /// step.
    #[inline]
    pub const fn new(config: GravityConfig) -> Self {
        Self {
            config,
            monitor: IncestMonitor::new(),
        }
    }

    /// Returns the configuration of the run.
    #[inline]
    pub const fn config(&self) -> &GravityConfig {
        &self.config
    }

    /// Returns the tree-incest monitor of the run.
    #[inline]
    pub const fn incest_monitor(&self) -> &IncestMonitor {
        &self.monitor
    }

    /// Evaluates the field on the body `body` of `tree` and writes it to `output`.
    ///
    /// The body excludes itself from the sum. If `in_tree` is set, the body must be reached while
    /// walking the tree or tree-incest is reported according to the configured policy. `output` is
    /// left untouched when an error is returned.
    ///
    /// An id that is not a body of `tree` has no position to evaluate at, so it is always reported
    /// as tree-incest and `output` is left untouched, whatever `in_tree` is.
    #[inline]
    pub fn evaluate_body<T, P>(
        &self,
        tree: &T,
        body: NodeID,
        background: &P,
        in_tree: bool,
        output: &mut Field,
    ) -> Result<Evaluation>
    where
        T: TreeView + ?Sized,
        P: ExternalPotential + ?Sized,
    {
        match tree.get(body) {
            Some(Node::Body(found)) => {
                self.evaluate(tree, found.position, Some(body), background, in_tree, output)
            }
            _ => {
                let incest = self.monitor.check(self.config.incest, body, true, false)?;
                Ok(Evaluation {
                    stats: ScanStats::default(),
                    incest,
                })
            }
        }
    }

    /// Evaluates the field at an arbitrary point that is not a member of `tree`.
    #[inline]
    pub fn evaluate_at<T, P>(&self, tree: &T, at: DVec3, background: &P) -> (Field, ScanStats)
    where
        T: TreeView + ?Sized,
        P: ExternalPotential + ?Sized,
    {
        let scanned = tree_scan(
            tree,
            at,
            None,
            self.config.softening,
            self.config.use_quadrupole,
        );
        let field = scanned.field + evaluate_background([background], at);

        (field, scanned.stats)
    }

    /// Evaluates the field at `position` for a body identified by `skip`, which may belong to a
    /// different tree than `tree`, and writes it to `output`.
    pub fn evaluate<T, P>(
        &self,
        tree: &T,
        position: DVec3,
        skip: Option<NodeID>,
        background: &P,
        in_tree: bool,
        output: &mut Field,
    ) -> Result<Evaluation>
    where
        T: TreeView + ?Sized,
        P: ExternalPotential + ?Sized,
    {
        let Scanned {
            mut field,
            skipped_self,
            stats,
        } = tree_scan(
            tree,
            position,
            skip,
            self.config.softening,
            self.config.use_quadrupole,
        );

        let incest = match skip {
            Some(body) => self
                .monitor
                .check(self.config.incest, body, in_tree, skipped_self)?,
            None => IncestReport::Clean,
        };

        field += evaluate_background([background], position);
        *output = field;

        Ok(Evaluation { stats, incest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GravityError,
        tree::{Body, Cell, Tree, TreeBuilder},
    };

    struct Constant(DVec3);

    impl ExternalPotential for Constant {
        fn potential_at(&self, _: DVec3) -> f64 {
            0.0
        }

        fn acceleration_at(&self, _: DVec3) -> DVec3 {
            self.0
        }
    }

    fn pair() -> (Tree, NodeID, NodeID) {
        let mut builder = TreeBuilder::new();
        let root = builder.cell(None, Cell::new(DVec3::ZERO, 2.0, f64::INFINITY));
        let a = builder.body(Some(root), Body::new(DVec3::X, 1.0));
        let b = builder.body(Some(root), Body::new(-DVec3::X, 1.0));
        (builder.build().unwrap(), a, b)
    }

    fn gravity(policy: IncestPolicy) -> Gravity {
        Gravity::new(GravityConfig::new(0.0, policy))
    }

    #[test]
    fn two_bodies() {
        let (tree, a, b) = pair();
        let gravity = gravity(IncestPolicy::Strict);

        let mut output = Field::ZERO;
        let evaluation = gravity.evaluate_body(&tree, a, &(), true, &mut output).unwrap();
        assert_eq!(output, Field::new(-0.5, DVec3::new(-0.25, 0.0, 0.0)));
        assert_eq!(evaluation.incest, IncestReport::Clean);
        assert_eq!(evaluation.stats.body_terms, 1);

        gravity.evaluate_body(&tree, b, &(), true, &mut output).unwrap();
        assert_eq!(output, Field::new(-0.5, DVec3::new(0.25, 0.0, 0.0)));
    }

    #[test]
    fn background_is_added_exactly() {
        let (tree, a, _) = pair();
        let gravity = gravity(IncestPolicy::Strict);
        let disk = [Constant(DVec3::new(0.0, 0.0, -0.01))];

        let mut bare = Field::ZERO;
        gravity.evaluate_body(&tree, a, &(), true, &mut bare).unwrap();
        let mut output = Field::ZERO;
        gravity.evaluate_body(&tree, a, &disk[..], true, &mut output).unwrap();

        assert_eq!(
            output.acceleration,
            bare.acceleration + DVec3::new(0.0, 0.0, -0.01)
        );
        assert_eq!(output.acceleration, DVec3::new(-0.25, 0.0, -0.01));
        assert_eq!(output.potential, -0.5);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (tree, a, _) = pair();
        let gravity = gravity(IncestPolicy::Lenient);

        let mut first = Field::new(123.0, DVec3::ONE);
        gravity.evaluate_body(&tree, a, &(), true, &mut first).unwrap();
        let mut second = first;
        gravity.evaluate_body(&tree, a, &(), true, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn strict_incest_leaves_output_untouched() {
        let (tree, _, _) = pair();
        let gravity = gravity(IncestPolicy::Strict);
        let stale = Field::new(7.0, DVec3::ONE);

        let mut output = stale;
        let result = gravity.evaluate(&tree, DVec3::Y, Some(42), &(), true, &mut output);
        assert_eq!(result, Err(GravityError::TreeIncest { body: 42 }));
        assert_eq!(output, stale);
    }

    #[test]
    fn lenient_incest_keeps_the_result() {
        let (tree, _, _) = pair();
        let gravity = gravity(IncestPolicy::Lenient);

        let mut output = Field::ZERO;
        let evaluation = gravity
            .evaluate(&tree, DVec3::Y * 2.0, Some(42), &(), true, &mut output)
            .unwrap();
        assert_eq!(evaluation.incest, IncestReport::Warned);
        assert_eq!(evaluation.stats.body_terms, 2);
        assert!(output.potential < 0.0);

        let evaluation = gravity
            .evaluate(&tree, DVec3::Y * 2.0, Some(43), &(), true, &mut output)
            .unwrap();
        assert_eq!(evaluation.incest, IncestReport::Suppressed);
        assert!(gravity.incest_monitor().has_warned());
    }

    #[test]
    fn unknown_body_ids_are_incest() {
        let (tree, _, _) = pair();
        let root = tree.root().unwrap();
        let stale = tree.len() as NodeID + 3;
        let gravity = gravity(IncestPolicy::Strict);
        let untouched = Field::new(7.0, DVec3::ONE);

        for body in [stale, root] {
            let mut output = untouched;
            let result = gravity.evaluate_body(&tree, body, &(), true, &mut output);
            assert_eq!(result, Err(GravityError::TreeIncest { body }));
            assert_eq!(output, untouched);
        }

        let result = gravity.evaluate_body(&tree, stale, &(), false, &mut Field::ZERO);
        assert_eq!(result, Err(GravityError::TreeIncest { body: stale }));
    }

    #[test]
    fn unknown_body_ids_warn_once() {
        let (tree, _, _) = pair();
        let root = tree.root().unwrap();
        let gravity = gravity(IncestPolicy::Lenient);
        let untouched = Field::new(7.0, DVec3::ONE);

        let mut output = untouched;
        let evaluation = gravity
            .evaluate_body(&tree, root, &(), true, &mut output)
            .unwrap();
        assert_eq!(evaluation.incest, IncestReport::Warned);
        assert_eq!(evaluation.stats, ScanStats::default());
        assert_eq!(output, untouched);

        let evaluation = gravity
            .evaluate_body(&tree, tree.len() as NodeID, &(), true, &mut output)
            .unwrap();
        assert_eq!(evaluation.incest, IncestReport::Suppressed);
        assert_eq!(output, untouched);
    }

    #[test]
    fn shared_instance_warns_once_across_rebuilds() {
        let gravity = gravity(IncestPolicy::Lenient);

        let reports: Vec<_> = (0..4)
            .map(|_| {
                let (tree, _, _) = pair();
                gravity
                    .evaluate(&tree, DVec3::Y, Some(42), &(), true, &mut Field::ZERO)
                    .unwrap()
                    .incest
            })
            .collect();

        assert_eq!(reports[0], IncestReport::Warned);
        assert!(reports[1..].iter().all(|&r| r == IncestReport::Suppressed));
    }

    #[test]
    fn outside_points_are_not_checked() {
        let (tree, _, _) = pair();
        let gravity = gravity(IncestPolicy::Strict);

        let mut output = Field::ZERO;
        let evaluation = gravity
            .evaluate(&tree, DVec3::Y, Some(42), &(), false, &mut output)
            .unwrap();
        assert_eq!(evaluation.incest, IncestReport::Clean);

        let (field, stats) = gravity.evaluate_at(&tree, DVec3::Y, &());
        assert_eq!(field, output);
        assert_eq!(stats.body_terms, 2);
    }
}
