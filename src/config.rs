use crate::gravity::IncestPolicy;

/// Parameters of a force evaluation, fixed for a whole run.
///
/// The tree-incest policy has no default and must be chosen by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GravityConfig {
    /// Plummer softening length added in quadrature to every separation.
    pub softening: f64,
    /// Whether accepted cells add their quadrupole correction.
    pub use_quadrupole: bool,
    /// Handling of tree-incest.
    pub incest: IncestPolicy,
}

impl GravityConfig {
    /// Creates a new [`GravityConfig`] with the quadrupole correction enabled.
    #[inline]
    pub const fn new(softening: f64, incest: IncestPolicy) -> Self {
        Self {
            softening,
            use_quadrupole: true,
            incest,
        }
    }

    /// Returns this configuration with the quadrupole correction enabled or disabled.
    #[inline]
    pub const fn with_quadrupole(self, use_quadrupole: bool) -> Self {
        Self {
            use_quadrupole,
            ..self
        }
    }
}
