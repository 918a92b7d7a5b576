//! # isoshape
//!
//! isoshape is an isoparametric shape-function registry for finite-element
//! codes. For a fixed catalog of reference elements it supplies:
//!
//! - topological metadata: node count, intrinsic dimension, edge and face
//!   node lists, and the natural coordinates of every node;
//! - shape values and natural-coordinate derivatives at any natural point,
//!   inside or outside the reference element.
//!
//! Jacobians, physical-space gradients, quadrature rules and mesh handling
//! belong to the caller.
//!
//! ## Supported kinds
//! `lin2, lin3, lin4, lin5, tri3, tri6, tri10, tri15, qua4, qua8, qua9,
//! qua12, qua16, tet4, tet10, hex8, hex20`
//!
//! ## Usage
//! ```rust
//! use isoshape::prelude::*;
//!
//! let entry = lookup_topology(ElementKind::Qua4);
//! assert_eq!(entry.vertex_count, 4);
//!
//! let result = evaluate_shape(ElementKind::Qua4, &[0.0, 0.0], true).unwrap();
//! assert_eq!(result.values(), &[0.25, 0.25, 0.25, 0.25]);
//! assert_eq!(result.derivatives().unwrap()[0], vec![-0.25, -0.25]);
//! ```
//!
//! ## Concurrency
//! The catalog is `static` data and the evaluator registry is built once,
//! lazily, behind a `once_cell` lock. Both are immutable afterwards, so any
//! number of threads may evaluate concurrently, each with its own
//! [`ShapeResult`](shape::ShapeResult) buffer.
//!
//! ## Features
//! - `rayon`: parallel batch tabulation ([`shape::par_tabulate`]).
//! - `check-invariants` / `strict-invariants`: validate the catalog when the
//!   registry is built, also in release builds.

pub mod debug_invariants;
pub mod shape;
pub mod shape_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use shape_error::ShapeError;

use static_assertions::assert_impl_all;

assert_impl_all!(topology::TopologyEntry: Send, Sync, Copy);
assert_impl_all!(topology::ElementKind: Send, Sync, Copy);
assert_impl_all!(shape::ShapeFunction: Send, Sync);
assert_impl_all!(shape::ShapeResult: Send, Sync);

/// A convenient prelude to import the most-used types and functions:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    #[cfg(feature = "rayon")]
    pub use crate::shape::par_tabulate;
    pub use crate::shape::{
        BasisTabulation, ShapeFunction, ShapeResult, evaluate_shape, evaluate_shape_by_name,
        evaluate_shape_into, interpolate, natural_gradient, shape_function, tabulate,
    };
    pub use crate::shape_error::ShapeError;
    pub use crate::topology::{
        CellType, ElementKind, ShapeFamily, TopologyEntry, lookup_topology,
        lookup_topology_by_name, validate_catalog,
    };
}
