//! Shape-function evaluation on reference elements.
//!
//! Each [`ElementKind`](crate::topology::element_kind::ElementKind) maps to
//! one [`ShapeFunction`] variant:
//! - [`lagrange`]: full tensor-product Lagrange (`lin*`, `qua4`, `qua9`, `qua16`, `hex8`)
//! - [`serendipity`]: boundary-node quads and hexes (`qua8`, `qua12`, `hex20`)
//! - [`simplex`]: barycentric Lagrange triangles and tetrahedra
//!
//! [`registry`] owns dispatch and the public evaluation entry points;
//! [`tabulation`] adds batch evaluation and field interpolation.

pub mod lagrange;
pub mod registry;
pub mod serendipity;
pub mod simplex;
pub mod tabulation;

#[cfg(feature = "rayon")]
pub use tabulation::par_tabulate;
pub use registry::{
    ShapeFunction, ShapeResult, evaluate_shape, evaluate_shape_by_name, evaluate_shape_into,
    initialize, shape_function,
};
pub use tabulation::{BasisTabulation, interpolate, natural_gradient, tabulate};
