use super::ExternalPotential;
use glam::DVec3;

/// Spherically symmetric component, typically a bulge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Spherical {
    /// Hernquist profile, `Φ = -M / (r + a)`.
    Hernquist {
        /// Total mass.
        mass: f64,
        /// Scale radius `a`.
        scale: f64,
    },
    /// Plummer profile, `Φ = -M / sqrt(r² + a²)`.
    Plummer {
        /// Total mass.
        mass: f64,
        /// Scale radius `a`.
        scale: f64,
    },
}

impl ExternalPotential for Spherical {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        let r = at.length();
        match *self {
            Self::Hernquist { mass, scale } => mass / (r + scale),
            Self::Plummer { mass, scale } => mass / (r * r + scale * scale).sqrt(),
        }
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        match *self {
            Self::Hernquist { mass, scale } => {
                let r = at.length();
                if r == 0.0 {
                    return DVec3::ZERO;
                }
                let ar = r + scale;
                at * (-mass / (r * ar * ar))
            }
            Self::Plummer { mass, scale } => {
                let rsq = at.length_squared() + scale * scale;
                at * (-mass / (rsq * rsq.sqrt()))
            }
        }
    }
}
