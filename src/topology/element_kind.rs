//! `ElementKind`: the closed set of reference-element topologies.
//!
//! Every kind names one fixed node layout on one reference cell. The set is
//! versioned with the crate; adding a topology means adding a variant here,
//! a row in [`crate::topology::catalog`] and (if it opens a new family) an
//! evaluator in [`crate::shape`].

use crate::shape_error::ShapeError;
use crate::topology::catalog::{TopologyEntry, lookup_topology};
use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported element topology.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Lin2,
    Lin3,
    Lin4,
    Lin5,
    Tri3,
    Tri6,
    Tri10,
    Tri15,
    Qua4,
    Qua8,
    Qua9,
    Qua12,
    Qua16,
    Tet4,
    Tet10,
    Hex8,
    Hex20,
}

/// How the shape functions of a kind are constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ShapeFamily {
    /// Full tensor product of 1-D Lagrange layouts.
    Lagrange,
    /// Boundary-node (incomplete tensor product) quads and hexes.
    Serendipity,
    /// Barycentric Lagrange polynomials on triangles and tetrahedra.
    Simplex,
}

impl ElementKind {
    /// Every kind, in catalog order.
    pub const ALL: [ElementKind; 17] = [
        ElementKind::Lin2,
        ElementKind::Lin3,
        ElementKind::Lin4,
        ElementKind::Lin5,
        ElementKind::Tri3,
        ElementKind::Tri6,
        ElementKind::Tri10,
        ElementKind::Tri15,
        ElementKind::Qua4,
        ElementKind::Qua8,
        ElementKind::Qua9,
        ElementKind::Qua12,
        ElementKind::Qua16,
        ElementKind::Tet4,
        ElementKind::Tet10,
        ElementKind::Hex8,
        ElementKind::Hex20,
    ];

    /// Position of this kind in [`ElementKind::ALL`] and in the catalog.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase identifier, e.g. `"tri6"`.
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Lin2 => "lin2",
            ElementKind::Lin3 => "lin3",
            ElementKind::Lin4 => "lin4",
            ElementKind::Lin5 => "lin5",
            ElementKind::Tri3 => "tri3",
            ElementKind::Tri6 => "tri6",
            ElementKind::Tri10 => "tri10",
            ElementKind::Tri15 => "tri15",
            ElementKind::Qua4 => "qua4",
            ElementKind::Qua8 => "qua8",
            ElementKind::Qua9 => "qua9",
            ElementKind::Qua12 => "qua12",
            ElementKind::Qua16 => "qua16",
            ElementKind::Tet4 => "tet4",
            ElementKind::Tet10 => "tet10",
            ElementKind::Hex8 => "hex8",
            ElementKind::Hex20 => "hex20",
        }
    }

    /// Reference cell shape of this kind.
    pub const fn cell_type(self) -> CellType {
        match self {
            ElementKind::Lin2 | ElementKind::Lin3 | ElementKind::Lin4 | ElementKind::Lin5 => {
                CellType::Segment
            }
            ElementKind::Tri3 | ElementKind::Tri6 | ElementKind::Tri10 | ElementKind::Tri15 => {
                CellType::Triangle
            }
            ElementKind::Qua4
            | ElementKind::Qua8
            | ElementKind::Qua9
            | ElementKind::Qua12
            | ElementKind::Qua16 => CellType::Quadrilateral,
            ElementKind::Tet4 | ElementKind::Tet10 => CellType::Tetrahedron,
            ElementKind::Hex8 | ElementKind::Hex20 => CellType::Hexahedron,
        }
    }

    /// Shape-function family used to evaluate this kind.
    pub const fn family(self) -> ShapeFamily {
        match self {
            ElementKind::Qua8 | ElementKind::Qua12 | ElementKind::Hex20 => {
                ShapeFamily::Serendipity
            }
            ElementKind::Tri3
            | ElementKind::Tri6
            | ElementKind::Tri10
            | ElementKind::Tri15
            | ElementKind::Tet4
            | ElementKind::Tet10 => ShapeFamily::Simplex,
            _ => ShapeFamily::Lagrange,
        }
    }

    /// Polynomial order of the interpolation along an edge.
    pub const fn order(self) -> usize {
        match self {
            ElementKind::Lin2
            | ElementKind::Tri3
            | ElementKind::Qua4
            | ElementKind::Tet4
            | ElementKind::Hex8 => 1,
            ElementKind::Lin3
            | ElementKind::Tri6
            | ElementKind::Qua8
            | ElementKind::Qua9
            | ElementKind::Tet10
            | ElementKind::Hex20 => 2,
            ElementKind::Lin4 | ElementKind::Tri10 | ElementKind::Qua12 | ElementKind::Qua16 => 3,
            ElementKind::Lin5 | ElementKind::Tri15 => 4,
        }
    }

    /// Catalog entry of this kind.
    #[inline]
    pub fn topology(self) -> &'static TopologyEntry {
        lookup_topology(self)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ShapeError::UnknownElementKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, kind) in ElementKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.name().parse::<ElementKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(" HEX20 ".parse::<ElementKind>(), Ok(ElementKind::Hex20));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "bogus".parse::<ElementKind>(),
            Err(ShapeError::UnknownElementKind("bogus".to_string()))
        );
        assert!("tri7".parse::<ElementKind>().is_err());
    }

    #[test]
    fn families_follow_cell_types() {
        for kind in ElementKind::ALL {
            match kind.family() {
                ShapeFamily::Simplex => assert!(kind.cell_type().is_simplex()),
                ShapeFamily::Serendipity => assert!(matches!(
                    kind.cell_type(),
                    CellType::Quadrilateral | CellType::Hexahedron
                )),
                ShapeFamily::Lagrange => assert!(!kind.cell_type().is_simplex()),
            }
        }
    }
}
