//! Reference-element topology: element kinds and their fixed catalog.
//!
//! This module provides:
//! - [`ElementKind`], the closed set of supported topologies
//! - [`CellType`], the coarse reference cell of each kind
//! - the static [`catalog`] of node counts, edges, faces and natural coordinates
//! - [`validation`] of the catalog's structural invariants

pub mod catalog;
pub mod cell_type;
pub mod element_kind;
pub mod validation;

pub use catalog::{TopologyEntry, lookup_topology, lookup_topology_by_name};
pub use cell_type::CellType;
pub use element_kind::{ElementKind, ShapeFamily};
pub use validation::validate_catalog;
