use super::criterion::Separation;
use crate::tree::{Node, NodeID};
use glam::DVec3;
use std::ops::{Add, AddAssign};

/// Gravitational potential and acceleration at a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Potential, negative where attractive.
    pub potential: f64,
    /// Acceleration.
    pub acceleration: DVec3,
}

impl Field {
    /// Field with no potential and no acceleration.
    pub const ZERO: Self = Self::new(0.0, DVec3::ZERO);

    /// Creates a new [`Field`].
    #[inline]
    pub const fn new(potential: f64, acceleration: DVec3) -> Self {
        Self {
            potential,
            acceleration,
        }
    }

    /// Adds the contribution of node `id` to the field at `at`.
    ///
    /// `memo` is reused if it was computed for `id`, otherwise the separation is recomputed. The
    /// monopole term is always added; the quadrupole correction is only added for cells when
    /// `use_quadrupole` is set. The order of operations is fixed so results are reproducible bit
    /// for bit.
    #[inline]
    pub fn accumulate(
        &mut self,
        id: NodeID,
        node: &Node,
        at: DVec3,
        memo: Option<Separation>,
        softening: f64,
        use_quadrupole: bool,
    ) {
        let Separation { dr, drsq, .. } = match memo {
            Some(memo) if memo.node == id => memo,
            _ => Separation::between(id, node.position(), at),
        };

        let drsq = drsq + softening * softening;
        let drab = drsq.sqrt();
        let phii = node.mass() / drab;
        let mor3 = phii / drsq;

        self.potential -= phii;
        self.acceleration += dr * mor3;

        if let (true, Node::Cell(cell)) = (use_quadrupole, node) {
            let dr5inv = 1.0 / (drsq * drsq * drab);
            let quaddr = cell.quad * dr;
            let drquaddr = dr.dot(quaddr);
            let phiquad = -0.5 * dr5inv * drquaddr;
            self.potential += phiquad;

            let phiquad = 5.0 * phiquad / drsq;
            self.acceleration -= dr * phiquad;
            self.acceleration -= quaddr * dr5inv;
        }
    }
}

impl Add for Field {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.potential + rhs.potential,
            self.acceleration + rhs.acceleration,
        )
    }
}

impl AddAssign for Field {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
