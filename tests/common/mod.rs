#![allow(dead_code)]

use glam::{DMat3, DVec3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use treegrav::prelude::*;

/// Octree over `bodies` with the ids of the bodies, indexed like `bodies`.
pub struct Octree {
    pub tree: Tree,
    pub ids: Vec<NodeID>,
}

/// Builds an octree over `bodies`, splitting cells until every leaf holds one body.
///
/// Cells carry their exact centre of mass, mass and traceless quadrupole. Their critical radius is
/// `size / theta` plus the offset of the centre of mass from the geometric centre, or infinite if
/// `theta` is zero so that every cell is opened.
pub fn octree(bodies: &[Body], theta: f64) -> Octree {
    let mut builder = TreeBuilder::with_capacity(2 * bodies.len());
    let mut ids = vec![0; bodies.len()];

    if !bodies.is_empty() {
        let (min, max) = bodies.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), body| (min.min(body.position), max.max(body.position)),
        );
        let centre = (min + max) * 0.5;
        let half = (max - min).max_element() * 0.5 + 1e-9;
        let members: Vec<_> = (0..bodies.len()).collect();

        split(&mut builder, None, bodies, &members, centre, half, theta, &mut ids);
    }

    Octree {
        tree: builder.build().unwrap(),
        ids,
    }
}

#[allow(clippy::too_many_arguments)]
fn split(
    builder: &mut TreeBuilder,
    parent: Option<NodeID>,
    bodies: &[Body],
    members: &[usize],
    centre: DVec3,
    half: f64,
    theta: f64,
    ids: &mut [NodeID],
) {
    if let [single] = members {
        ids[*single] = builder.body(parent, bodies[*single]);
        return;
    }

    let cell = builder.cell(parent, moments(bodies, members, centre, 2.0 * half, theta));

    if half < 1e-12 {
        for &i in members {
            ids[i] = builder.body(Some(cell), bodies[i]);
        }
        return;
    }

    let mut octants: [Vec<usize>; 8] = Default::default();
    for &i in members {
        let position = bodies[i].position;
        let octant = usize::from(position.x >= centre.x)
            | usize::from(position.y >= centre.y) << 1
            | usize::from(position.z >= centre.z) << 2;
        octants[octant].push(i);
    }

    for (octant, members) in octants.iter().enumerate() {
        if members.is_empty() {
            continue;
        }

        let sign = |bit: usize| if octant & bit != 0 { 0.5 } else { -0.5 };
        let offset = DVec3::new(sign(1), sign(2), sign(4)) * half;
        split(builder, Some(cell), bodies, members, centre + offset, half * 0.5, theta, ids);
    }
}

fn moments(bodies: &[Body], members: &[usize], centre: DVec3, size: f64, theta: f64) -> Cell {
    let mass: f64 = members.iter().map(|&i| bodies[i].mass).sum();
    let com = members
        .iter()
        .fold(DVec3::ZERO, |com, &i| com + bodies[i].position * bodies[i].mass)
        / mass;

    let quad = members.iter().fold(DMat3::ZERO, |quad, &i| {
        let dr = bodies[i].position - com;
        let outer = DMat3::from_cols(dr * dr.x, dr * dr.y, dr * dr.z);
        quad + (outer * 3.0 - DMat3::IDENTITY * dr.length_squared()) * bodies[i].mass
    });

    let rcrit2 = if theta == 0.0 {
        f64::INFINITY
    } else {
        (size / theta + (com - centre).length()).powi(2)
    };

    Cell::new(com, mass, rcrit2).with_quad(quad)
}

/// Random bodies in a box of half-widths `extent` around `centre`.
pub fn random_bodies(count: usize, centre: DVec3, extent: DVec3, seed: u64) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let unit = DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            Body::new(centre + unit * extent, rng.gen_range(0.5..1.5))
        })
        .collect()
}

/// Ratio of the root mean square error of `actual` to the root mean square of `expected`.
pub fn rms_error(actual: &[Field], expected: &[Field]) -> f64 {
    let (error, norm) = actual
        .iter()
        .zip(expected)
        .fold((0.0, 0.0), |(error, norm), (actual, expected)| {
            (
                error + (actual.acceleration - expected.acceleration).length_squared(),
                norm + expected.acceleration.length_squared(),
            )
        });

    (error / norm).sqrt()
}
