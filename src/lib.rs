//! # Treegrav
//!
//! Treegrav is a crate evaluating the gravitational potential and acceleration on bodies of an
//! N-body system from a prebuilt [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation)
//! tree, optionally adding an analytic background potential such as a galactic disk, bulge and halo.
//!
//! ## Goals
//!
//! The crate only does the force evaluation. It does not build the tree, integrate orbits or do
//! any I/O, so it can be plugged into an existing simulation loop that already maintains its own
//! tree. The walk is iterative and does not allocate, and every evaluation only reads the shared
//! tree, so bodies can be evaluated in parallel thanks to [rayon](https://github.com/rayon-rs/rayon).
//! Enable the "parallel" feature to access [`parallel`].
//!
//! # Using Treegrav
//!
//! ## Providing the tree
//!
//! The walk reads a tree through the [`TreeView`](tree::TreeView) trait. Nodes are either a
//! [`Body`](tree::Body) or a [`Cell`](tree::Cell) carrying the centre of mass, total mass,
//! quadrupole tensor and squared critical radius of its subtree, all computed by the caller.
//!
//! A [`TreeBuilder`](tree::TreeBuilder) links nodes declared with their parent into a
//! [`Tree`](tree::Tree):
//!
//! ```
//! # use treegrav::prelude::*;
//! # use glam::DVec3;
//! #
//! let mut builder = TreeBuilder::new();
//! let root = builder.cell(None, Cell::new(DVec3::ZERO, 2.0, 4.0));
//! builder.body(Some(root), Body::new(DVec3::X, 1.0));
//! builder.body(Some(root), Body::new(-DVec3::X, 1.0));
//!
//! let tree = builder.build().unwrap();
//! ```
//!
//! ## Evaluating the field
//!
//! A [`Gravity`](gravity::Gravity) instance holds the [`GravityConfig`](config::GravityConfig) of a
//! run. The tree-incest policy has no default and must be chosen explicitly.
//!
//! ```
//! # use treegrav::prelude::*;
//! # use glam::DVec3;
//! #
//! # let mut builder = TreeBuilder::new();
//! # let root = builder.cell(None, Cell::new(DVec3::ZERO, 2.0, f64::INFINITY));
//! # builder.body(Some(root), Body::new(DVec3::X, 1.0));
//! # builder.body(Some(root), Body::new(-DVec3::X, 1.0));
//! # let tree = builder.build().unwrap();
//! #
//! let config = GravityConfig::new(0.01, IncestPolicy::Lenient);
//! let gravity = Gravity::new(config);
//!
//! let background = Potential::new(
//!     Disk::MiyamotoNagai { mass: 1e2, scale_length: 6.5, scale_height: 0.26 },
//!     vec![Spherical::Hernquist { mass: 30.0, scale: 0.7 }],
//!     Halo::Logarithmic { vhalo: 1.0, scale_length: 12.0, flatten_z: 1.0 },
//! );
//!
//! let bodies: Vec<_> = tree.bodies().collect();
//! let mut fields = vec![Field::ZERO; bodies.len()];
//! sequential::evaluate_bodies(&gravity, &tree, &background, &bodies, &mut fields).unwrap();
//!
//! for field in &fields {
//!     assert!(field.potential < 0.0);
//! }
//! ```

#![warn(missing_docs)]

/// Run-wide parameters of the force evaluation.
pub mod config;

/// Errors returned by the crate.
pub mod error;

/// Tree walk and force accumulation.
pub mod gravity;

/// Analytic background potentials.
pub mod potential;

/// Evaluation of many bodies using one CPU thread.
pub mod sequential;

/// Evaluation of many bodies using the CPU with [rayon](https://github.com/rayon-rs/rayon).
#[cfg(feature = "parallel")]
pub mod parallel;

/// Read-only tree representation walked by the evaluation.
pub mod tree;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::config::GravityConfig;
    pub use crate::error::{BuildError, GravityError};
    pub use crate::gravity::{
        Evaluation, Field, Gravity, IncestMonitor, IncestPolicy, IncestReport, ScanStats,
    };
    #[cfg(feature = "parallel")]
    pub use crate::parallel;
    pub use crate::potential::{
        evaluate_background, Disk, ExternalPotential, Halo, Potential, Spherical,
    };
    pub use crate::sequential;
    pub use crate::tree::{symmetric, Body, Cell, Link, Node, NodeID, Tree, TreeBuilder, TreeView};
}
