mod disk;
mod halo;
mod spherical;

pub use disk::Disk;
pub use halo::Halo;
pub use spherical::Spherical;

use crate::gravity::Field;
use glam::DVec3;

/// Analytic background potential component.
///
/// Potentials are returned as the relative potential `ψ = -Φ`, positive for attractive components,
/// because [`evaluate_background`] subtracts them like the tree subtracts its monopole terms.
pub trait ExternalPotential {
    /// Returns the relative potential `ψ = -Φ` at the given position.
    fn potential_at(&self, at: DVec3) -> f64;

    /// Returns the acceleration `-∇Φ` at the given position.
    fn acceleration_at(&self, at: DVec3) -> DVec3;
}

/// Sums the components of a background potential at `at`.
///
/// The returned field holds the summed accelerations and the physical potential, that is the sum
/// of the relative potentials subtracted from zero.
#[inline]
pub fn evaluate_background<'a, I, P>(components: I, at: DVec3) -> Field
where
    I: IntoIterator<Item = &'a P>,
    P: ExternalPotential + ?Sized + 'a,
{
    let (relative, acceleration) = components.into_iter().fold(
        (0.0, DVec3::ZERO),
        |(relative, acceleration), component| {
            (
                relative + component.potential_at(at),
                acceleration + component.acceleration_at(at),
            )
        },
    );

    Field::new(-relative, acceleration)
}

impl<P: ExternalPotential + ?Sized> ExternalPotential for &P {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        P::potential_at(self, at)
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        P::acceleration_at(self, at)
    }
}

impl<P: ExternalPotential + ?Sized> ExternalPotential for Box<P> {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        P::potential_at(self, at)
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        P::acceleration_at(self, at)
    }
}

impl<P: ExternalPotential> ExternalPotential for [P] {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        -evaluate_background(self, at).potential
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        evaluate_background(self, at).acceleration
    }
}

impl<P: ExternalPotential> ExternalPotential for Vec<P> {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        self.as_slice().potential_at(at)
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        self.as_slice().acceleration_at(at)
    }
}

/// No background at all.
impl ExternalPotential for () {
    #[inline]
    fn potential_at(&self, _: DVec3) -> f64 {
        0.0
    }

    #[inline]
    fn acceleration_at(&self, _: DVec3) -> DVec3 {
        DVec3::ZERO
    }
}

/// Galactic background made of a disk, any number of spherical components and a halo, summed in
/// that order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potential {
    /// Disk component.
    pub disk: Disk,
    /// Spherical components such as bulges.
    pub spheres: Vec<Spherical>,
    /// Dark matter halo.
    pub halo: Halo,
}

impl Potential {
    /// Creates a new [`Potential`].
    #[inline]
    pub fn new(disk: Disk, spheres: Vec<Spherical>, halo: Halo) -> Self {
        Self {
            disk,
            spheres,
            halo,
        }
    }

    /// Returns the components in summation order.
    #[inline]
    pub fn components(&self) -> impl Iterator<Item = &dyn ExternalPotential> {
        std::iter::once(&self.disk as &dyn ExternalPotential)
            .chain(self.spheres.iter().map(|s| s as &dyn ExternalPotential))
            .chain(std::iter::once(&self.halo as &dyn ExternalPotential))
    }
}

impl ExternalPotential for Potential {
    #[inline]
    fn potential_at(&self, at: DVec3) -> f64 {
        -evaluate_background(self.components(), at).potential
    }

    #[inline]
    fn acceleration_at(&self, at: DVec3) -> DVec3 {
        evaluate_background(self.components(), at).acceleration
    }
}
