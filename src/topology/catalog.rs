//! Topology catalog: fixed metadata of every supported reference element.
//!
//! The catalog is plain `static` data, so it is fully built before any code
//! can read it and may be shared between threads without synchronisation.
//! Rows of `nat_coords` are reference axes, columns are nodes.

use crate::shape_error::ShapeError;
use crate::topology::element_kind::ElementKind;
use serde::Serialize;
use static_assertions::const_assert_eq;

const T: f64 = 1.0 / 3.0;
const TT: f64 = 2.0 / 3.0;

/// Fixed topological metadata for one [`ElementKind`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TopologyEntry {
    /// Kind this entry describes.
    pub kind: ElementKind,
    /// Number of nodes (corner, mid-side and interior).
    pub vertex_count: usize,
    /// Intrinsic dimension of the reference element.
    pub geom_dim: usize,
    /// Local node indices of each edge: corners first, then interior edge nodes.
    pub edge_local_verts: &'static [&'static [usize]],
    /// Local node indices of each face (3D elements only).
    pub face_local_verts: &'static [&'static [usize]],
    /// `geom_dim x vertex_count` natural coordinates of the nodes.
    pub nat_coords: &'static [&'static [f64]],
}

impl TopologyEntry {
    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_local_verts.len()
    }

    /// Number of faces (zero below 3D).
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_local_verts.len()
    }

    /// Number of corner nodes of the reference cell.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.kind.cell_type().corner_count()
    }

    /// Natural coordinates of node `n`, one entry per reference axis.
    ///
    /// # Panics
    ///
    /// Panics if `n >= vertex_count`.
    pub fn node_coords(&self, n: usize) -> Vec<f64> {
        self.nat_coords.iter().map(|row| row[n]).collect()
    }

    /// Natural coordinate of node `n` along axis `d`.
    #[inline]
    pub fn node_coord(&self, n: usize, d: usize) -> f64 {
        self.nat_coords[d][n]
    }
}

/// Catalog entry of a kind. Total over [`ElementKind`].
#[inline]
pub fn lookup_topology(kind: ElementKind) -> &'static TopologyEntry {
    &CATALOG[kind.index()]
}

/// Catalog entry by identifier, e.g. `"hex20"`.
pub fn lookup_topology_by_name(name: &str) -> Result<&'static TopologyEntry, ShapeError> {
    let kind: ElementKind = name.parse()?;
    Ok(lookup_topology(kind))
}

/// All catalog entries, in [`ElementKind::ALL`] order.
pub fn catalog() -> &'static [TopologyEntry] {
    &CATALOG
}

const NO_ENTITIES: &[&[usize]] = &[];

const TRI3_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0]];
const TRI6_EDGES: &[&[usize]] = &[&[0, 1, 3], &[1, 2, 4], &[2, 0, 5]];
const TRI10_EDGES: &[&[usize]] = &[&[0, 1, 3, 6], &[1, 2, 4, 7], &[2, 0, 5, 8]];
const TRI15_EDGES: &[&[usize]] = &[&[0, 1, 3, 6, 7], &[1, 2, 4, 8, 9], &[2, 0, 5, 10, 11]];
const QUA4_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]];
const QUA8_EDGES: &[&[usize]] = &[&[0, 1, 4], &[1, 2, 5], &[2, 3, 6], &[3, 0, 7]];
const QUA12_EDGES: &[&[usize]] = &[&[0, 1, 4, 8], &[1, 2, 5, 9], &[2, 3, 6, 10], &[3, 0, 7, 11]];
const TET4_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0], &[0, 3], &[1, 3], &[2, 3]];
const TET10_EDGES: &[&[usize]] = &[
    &[0, 1, 4],
    &[1, 2, 5],
    &[2, 0, 6],
    &[0, 3, 7],
    &[1, 3, 8],
    &[2, 3, 9],
];
const HEX8_EDGES: &[&[usize]] = &[
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[3, 0],
    &[4, 5],
    &[5, 6],
    &[6, 7],
    &[7, 4],
    &[0, 4],
    &[1, 5],
    &[2, 6],
    &[3, 7],
];
const HEX20_EDGES: &[&[usize]] = &[
    &[0, 1, 8],
    &[1, 2, 9],
    &[2, 3, 10],
    &[3, 0, 11],
    &[4, 5, 12],
    &[5, 6, 13],
    &[6, 7, 14],
    &[7, 4, 15],
    &[0, 4, 16],
    &[1, 5, 17],
    &[2, 6, 18],
    &[3, 7, 19],
];

const TET4_FACES: &[&[usize]] = &[&[0, 3, 2], &[0, 1, 3], &[0, 2, 1], &[1, 2, 3]];
const TET10_FACES: &[&[usize]] = &[
    &[0, 3, 2, 7, 9, 6],
    &[0, 1, 3, 4, 8, 7],
    &[0, 2, 1, 6, 5, 4],
    &[1, 2, 3, 5, 9, 8],
];
const HEX8_FACES: &[&[usize]] = &[
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[2, 3, 7, 6],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];
const HEX20_FACES: &[&[usize]] = &[
    &[0, 4, 7, 3, 16, 15, 19, 11],
    &[1, 2, 6, 5, 9, 18, 13, 17],
    &[0, 1, 5, 4, 8, 17, 12, 16],
    &[2, 3, 7, 6, 10, 19, 14, 18],
    &[0, 3, 2, 1, 11, 10, 9, 8],
    &[4, 5, 6, 7, 12, 13, 14, 15],
];

const LIN2_COORDS: &[&[f64]] = &[&[-1.0, 1.0]];
const LIN3_COORDS: &[&[f64]] = &[&[-1.0, 1.0, 0.0]];
const LIN4_COORDS: &[&[f64]] = &[&[-1.0, 1.0, -T, T]];
const LIN5_COORDS: &[&[f64]] = &[&[-1.0, 1.0, 0.0, -0.5, 0.5]];
const TRI3_COORDS: &[&[f64]] = &[&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]];
const TRI6_COORDS: &[&[f64]] = &[
    &[0.0, 1.0, 0.0, 0.5, 0.5, 0.0],
    &[0.0, 0.0, 1.0, 0.0, 0.5, 0.5],
];
const TRI10_COORDS: &[&[f64]] = &[
    &[0.0, 1.0, 0.0, T, TT, 0.0, TT, T, 0.0, T],
    &[0.0, 0.0, 1.0, 0.0, T, TT, 0.0, TT, T, T],
];
const TRI15_COORDS: &[&[f64]] = &[
    &[
        0.0, 1.0, 0.0, 0.5, 0.5, 0.0, 0.25, 0.75, 0.75, 0.25, 0.0, 0.0, 0.25, 0.5, 0.25,
    ],
    &[
        0.0, 0.0, 1.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.25, 0.75, 0.75, 0.25, 0.25, 0.25, 0.5,
    ],
];
const QUA4_COORDS: &[&[f64]] = &[&[-1.0, 1.0, 1.0, -1.0], &[-1.0, -1.0, 1.0, 1.0]];
const QUA8_COORDS: &[&[f64]] = &[
    &[-1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0, -1.0],
    &[-1.0, -1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0],
];
const QUA9_COORDS: &[&[f64]] = &[
    &[-1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0],
    &[-1.0, -1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0, 0.0],
];
const QUA12_COORDS: &[&[f64]] = &[
    &[-1.0, 1.0, 1.0, -1.0, -T, 1.0, T, -1.0, T, 1.0, -T, -1.0],
    &[-1.0, -1.0, 1.0, 1.0, -1.0, -T, 1.0, T, -1.0, T, 1.0, -T],
];
const QUA16_COORDS: &[&[f64]] = &[
    &[
        -1.0, 1.0, 1.0, -1.0, -T, 1.0, T, -1.0, T, 1.0, -T, -1.0, -T, T, T, -T,
    ],
    &[
        -1.0, -1.0, 1.0, 1.0, -1.0, -T, 1.0, T, -1.0, T, 1.0, -T, -T, -T, T, T,
    ],
];
const TET4_COORDS: &[&[f64]] = &[
    &[0.0, 1.0, 0.0, 0.0],
    &[0.0, 0.0, 1.0, 0.0],
    &[0.0, 0.0, 0.0, 1.0],
];
const TET10_COORDS: &[&[f64]] = &[
    &[0.0, 1.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.5, 0.0],
    &[0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.5],
    &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5],
];
const HEX8_COORDS: &[&[f64]] = &[
    &[-1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0],
    &[-1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0],
    &[-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0],
];
const HEX20_COORDS: &[&[f64]] = &[
    &[
        -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0,
        -1.0, 1.0, 1.0, -1.0,
    ],
    &[
        -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0,
        -1.0, -1.0, 1.0, 1.0,
    ],
    &[
        -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0,
        0.0, 0.0, 0.0, 0.0,
    ],
];

const fn entry(
    kind: ElementKind,
    vertex_count: usize,
    geom_dim: usize,
    edge_local_verts: &'static [&'static [usize]],
    face_local_verts: &'static [&'static [usize]],
    nat_coords: &'static [&'static [f64]],
) -> TopologyEntry {
    TopologyEntry {
        kind,
        vertex_count,
        geom_dim,
        edge_local_verts,
        face_local_verts,
        nat_coords,
    }
}

static CATALOG: [TopologyEntry; 17] = [
    entry(ElementKind::Lin2, 2, 1, NO_ENTITIES, NO_ENTITIES, LIN2_COORDS),
    entry(ElementKind::Lin3, 3, 1, NO_ENTITIES, NO_ENTITIES, LIN3_COORDS),
    entry(ElementKind::Lin4, 4, 1, NO_ENTITIES, NO_ENTITIES, LIN4_COORDS),
    entry(ElementKind::Lin5, 5, 1, NO_ENTITIES, NO_ENTITIES, LIN5_COORDS),
    entry(ElementKind::Tri3, 3, 2, TRI3_EDGES, NO_ENTITIES, TRI3_COORDS),
    entry(ElementKind::Tri6, 6, 2, TRI6_EDGES, NO_ENTITIES, TRI6_COORDS),
    entry(ElementKind::Tri10, 10, 2, TRI10_EDGES, NO_ENTITIES, TRI10_COORDS),
    entry(ElementKind::Tri15, 15, 2, TRI15_EDGES, NO_ENTITIES, TRI15_COORDS),
    entry(ElementKind::Qua4, 4, 2, QUA4_EDGES, NO_ENTITIES, QUA4_COORDS),
    entry(ElementKind::Qua8, 8, 2, QUA8_EDGES, NO_ENTITIES, QUA8_COORDS),
    entry(ElementKind::Qua9, 9, 2, QUA8_EDGES, NO_ENTITIES, QUA9_COORDS),
    entry(ElementKind::Qua12, 12, 2, QUA12_EDGES, NO_ENTITIES, QUA12_COORDS),
    entry(ElementKind::Qua16, 16, 2, QUA12_EDGES, NO_ENTITIES, QUA16_COORDS),
    entry(ElementKind::Tet4, 4, 3, TET4_EDGES, TET4_FACES, TET4_COORDS),
    entry(ElementKind::Tet10, 10, 3, TET10_EDGES, TET10_FACES, TET10_COORDS),
    entry(ElementKind::Hex8, 8, 3, HEX8_EDGES, HEX8_FACES, HEX8_COORDS),
    entry(ElementKind::Hex20, 20, 3, HEX20_EDGES, HEX20_FACES, HEX20_COORDS),
];

const_assert_eq!(ElementKind::Hex20 as usize + 1, ElementKind::ALL.len());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(lookup_topology(kind).kind, kind);
        }
        assert_eq!(catalog().len(), ElementKind::ALL.len());
    }

    #[test]
    fn lookup_by_name() {
        let entry = lookup_topology_by_name("hex20").expect("hex20 registered");
        assert_eq!(entry.vertex_count, 20);
        assert_eq!(entry.geom_dim, 3);
        assert_eq!(entry.edge_count(), 12);
        assert_eq!(entry.face_count(), 6);
        assert_eq!(entry.corner_count(), 8);
        assert_eq!(
            lookup_topology_by_name("bogus"),
            Err(ShapeError::UnknownElementKind("bogus".to_string()))
        );
    }

    #[test]
    fn node_coords_reads_a_column() {
        let entry = lookup_topology(ElementKind::Tri6);
        assert_eq!(entry.node_coords(4), vec![0.5, 0.5]);
        assert_eq!(entry.node_coord(5, 1), 0.5);
        let lin = lookup_topology(ElementKind::Lin4);
        assert_eq!(lin.node_coords(2), vec![-1.0 / 3.0]);
    }

    #[test]
    fn one_dimensional_kinds_have_no_edges_or_faces() {
        for kind in [
            ElementKind::Lin2,
            ElementKind::Lin3,
            ElementKind::Lin4,
            ElementKind::Lin5,
        ] {
            let entry = lookup_topology(kind);
            assert_eq!(entry.geom_dim, 1);
            assert_eq!(entry.edge_count(), 0);
            assert_eq!(entry.face_count(), 0);
        }
    }
}
