use super::ExternalPotential;
use glam::DVec3;

/// Axisymmetric disk component.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Disk {
    /// [Miyamoto-Nagai](https://ui.adsabs.harvard.edu/abs/1975PASJ...27..533M) disk,
    /// `Φ = -M / sqrt(R² + (a + sqrt(z² + b²))²)`.
    MiyamotoNagai {
        /// Total mass.
        mass: f64,
        /// Radial scale length `a`.
        scale_length: f64,
        /// Vertical scale height `b`.
        scale_height: f64,
    },
}

impl ExternalPotential for Disk {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        match *self {
            Self::MiyamotoNagai {
                mass,
                scale_length,
                scale_height,
            } => {
                let zb = (at.z * at.z + scale_height * scale_height).sqrt();
                let azb = scale_length + zb;
                mass / (at.x * at.x + at.y * at.y + azb * azb).sqrt()
            }
        }
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        match *self {
            Self::MiyamotoNagai {
                mass,
                scale_length,
                scale_height,
            } => {
                let zb = (at.z * at.z + scale_height * scale_height).sqrt();
                let azb = scale_length + zb;
                let rsq = at.x * at.x + at.y * at.y + azb * azb;
                let scale = -mass / (rsq * rsq.sqrt());

                DVec3::new(at.x * scale, at.y * scale, at.z * azb / zb * scale)
            }
        }
    }
}
