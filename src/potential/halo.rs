use super::ExternalPotential;
use glam::DVec3;

/// Dark matter halo component.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Halo {
    /// Flattened logarithmic halo, `Φ = v² ln(x² + y² + z²/q² + d²)`.
    Logarithmic {
        /// Circular velocity scale `v`.
        vhalo: f64,
        /// Core radius `d`.
        scale_length: f64,
        /// Flattening along z, `q`.
        flatten_z: f64,
    },
    /// Navarro-Frenk-White halo, `Φ = -M ln(1 + r/a) / r`.
    Nfw {
        /// Mass scale `M`.
        mass: f64,
        /// Scale radius `a`.
        scale: f64,
    },
}

impl ExternalPotential for Halo {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        match *self {
            Self::Logarithmic {
                vhalo,
                scale_length,
                flatten_z,
            } => {
                let zq = at.z / flatten_z;
                let arg = at.x * at.x + at.y * at.y + zq * zq + scale_length * scale_length;
                -vhalo * vhalo * arg.ln()
            }
            Self::Nfw { mass, scale } => {
                let r = at.length();
                if r == 0.0 {
                    return mass / scale;
                }
                mass * (r / scale).ln_1p() / r
            }
        }
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        match *self {
            Self::Logarithmic {
                vhalo,
                scale_length,
                flatten_z,
            } => {
                let qsq = flatten_z * flatten_z;
                let arg =
                    at.x * at.x + at.y * at.y + at.z * at.z / qsq + scale_length * scale_length;
                let scale = -2.0 * vhalo * vhalo / arg;

                DVec3::new(at.x * scale, at.y * scale, at.z / qsq * scale)
            }
            Self::Nfw { mass, scale } => {
                let r = at.length();
                if r == 0.0 {
                    return DVec3::ZERO;
                }
                let enclosed = (r / scale).ln_1p() - r / (r + scale);
                at * (-mass * enclosed / (r * r * r))
            }
        }
    }
}
