use crate::{
    error::{GravityError, Result},
    tree::NodeID,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// What to do when a body is not found in the tree it is evaluated as a member of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IncestPolicy {
    /// Fail the evaluation with [`GravityError::TreeIncest`].
    Strict,
    /// Warn once and keep the result.
    Lenient,
}

/// Outcome of the tree-incest check of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncestReport {
    /// The body was found, or the evaluation was not for a tree member.
    Clean,
    /// Tree-incest occurred and this evaluation emitted the warning.
    Warned,
    /// Tree-incest occurred but the warning had already been emitted.
    Suppressed,
}

impl IncestReport {
    /// Returns `true` if tree-incest occurred.
    #[inline]
    pub const fn is_incest(&self) -> bool {
        !matches!(self, Self::Clean)
    }
}

/// One-shot tree-incest warning shared by every evaluation of a run.
///
/// The flag is only ever set, so the warning is emitted at most once however many threads
/// observe tree-incest at the same time.
///
/// The scope of "once" is the monitor itself. A process-wide warning is obtained by keeping a
/// single [`Gravity`](super::Gravity) for the whole run.
#[derive(Debug, Default)]
pub struct IncestMonitor {
    warned: AtomicBool,
}

impl IncestMonitor {
    /// Creates a new [`IncestMonitor`] that has not warned yet.
    #[inline]
    pub const fn new() -> Self {
        Self {
            warned: AtomicBool::new(false),
        }
    }

    /// Returns `true` once the warning has been emitted.
    #[inline]
    pub fn has_warned(&self) -> bool {
        self.warned.load(Ordering::Acquire)
    }

    /// Applies `policy` to the outcome of a scan for `body`.
    ///
    /// Nothing is checked unless `in_tree` is set.
    pub fn check(
        &self,
        policy: IncestPolicy,
        body: NodeID,
        in_tree: bool,
        skipped_self: bool,
    ) -> Result<IncestReport> {
        if !in_tree || skipped_self {
            return Ok(IncestReport::Clean);
        }

        match policy {
            IncestPolicy::Strict => {
                log::error!("tree-incest detected for node {body}");
                Err(GravityError::TreeIncest { body })
            }
            IncestPolicy::Lenient => {
                let first = self
                    .warned
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok();

                if first {
                    log::warn!("tree-incest detected for node {body}, further occurrences are not reported");
                    Ok(IncestReport::Warned)
                } else {
                    Ok(IncestReport::Suppressed)
                }
            }
        }
    }
}
