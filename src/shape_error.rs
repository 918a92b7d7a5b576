//! ShapeError: Unified error type for isoshape public APIs
//!
//! Catalog lookups and shape evaluations only ever fail with
//! [`ShapeError::UnknownElementKind`] or
//! [`ShapeError::InvalidCoordinateDimension`]. Both are caller bugs and are
//! reported as-is; nothing in this crate retries or logs them.

use crate::topology::element_kind::ElementKind;
use thiserror::Error;

/// Unified error type for isoshape operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    /// The element identifier is not part of the catalog.
    #[error("unknown element kind `{0}`")]
    UnknownElementKind(String),
    /// The natural point does not have one coordinate per reference axis.
    #[error("{kind} expects {expected} natural coordinate(s), found {found}")]
    InvalidCoordinateDimension {
        kind: ElementKind,
        expected: usize,
        found: usize,
    },
    /// Nodal field values do not match the node count of the element.
    #[error("{kind} has {expected} node(s), found {found} nodal value(s)")]
    NodalValueCount {
        kind: ElementKind,
        expected: usize,
        found: usize,
    },
    /// A catalog entry breaks one of its structural invariants.
    #[error("invariant violated for {kind}: {detail}")]
    InvariantViolation { kind: ElementKind, detail: String },
}
