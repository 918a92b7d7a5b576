//! Coarse reference-cell shapes underlying the element kinds.

use serde::{Deserialize, Serialize};

/// Reference cell shape, independent of node count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 1D segment on `[-1, 1]`.
    Segment,
    /// 2D simplex (triangle) with vertex 0 at the origin.
    Triangle,
    /// 2D tensor-product cell (quad) on `[-1, 1]^2`.
    Quadrilateral,
    /// 3D simplex (tet) with vertex 0 at the origin.
    Tetrahedron,
    /// 3D tensor-product cell (hex) on `[-1, 1]^3`.
    Hexahedron,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    /// Whether the reference cell is a simplex (barycentric coordinates apply).
    pub fn is_simplex(self) -> bool {
        matches!(self, CellType::Triangle | CellType::Tetrahedron)
    }

    /// Number of corner vertices of the reference cell.
    pub fn corner_count(self) -> usize {
        match self {
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }
}
