//! Structural validation of catalog entries.
//!
//! The catalog is static data, so these checks never run on the evaluation
//! path. They back the [`DebugInvariants`] implementation of
//! [`TopologyEntry`], the registry start-up check and the test-suite.

use crate::debug_invariants::DebugInvariants;
use crate::shape_error::ShapeError;
use crate::topology::catalog::{TopologyEntry, catalog};
use crate::topology::cell_type::CellType;

/// Absolute tolerance for geometric predicates on natural coordinates.
pub const NATURAL_TOL: f64 = 1e-12;

/// Validate every catalog entry, returning the first violation.
pub fn validate_catalog() -> Result<(), ShapeError> {
    for entry in catalog() {
        entry.validate_invariants()?;
    }
    Ok(())
}

impl DebugInvariants for TopologyEntry {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "topology entry");
    }

    fn validate_invariants(&self) -> Result<(), ShapeError> {
        check_shape(self)?;
        check_indices(self)?;
        check_distinct_nodes(self)?;
        for edge in self.edge_local_verts {
            check_edge_membership(self, edge)?;
        }
        for face in self.face_local_verts {
            check_face_membership(self, face)?;
        }
        check_unreferenced_nodes_are_interior(self)
    }
}

fn violation(entry: &TopologyEntry, detail: String) -> ShapeError {
    ShapeError::InvariantViolation {
        kind: entry.kind,
        detail,
    }
}

fn check_shape(entry: &TopologyEntry) -> Result<(), ShapeError> {
    if entry.vertex_count < 2 {
        return Err(violation(
            entry,
            format!("vertex count {} is below 2", entry.vertex_count),
        ));
    }
    let cell_dim = entry.kind.cell_type().dimension() as usize;
    if entry.geom_dim != cell_dim {
        return Err(violation(
            entry,
            format!(
                "geometric dimension {} does not match cell dimension {cell_dim}",
                entry.geom_dim
            ),
        ));
    }
    if entry.nat_coords.len() != entry.geom_dim {
        return Err(violation(
            entry,
            format!(
                "expected {} coordinate rows, found {}",
                entry.geom_dim,
                entry.nat_coords.len()
            ),
        ));
    }
    for (d, row) in entry.nat_coords.iter().enumerate() {
        if row.len() != entry.vertex_count {
            return Err(violation(
                entry,
                format!(
                    "coordinate row {d} has {} entries, expected {}",
                    row.len(),
                    entry.vertex_count
                ),
            ));
        }
    }
    if entry.geom_dim < 2 && entry.edge_count() > 0 {
        return Err(violation(entry, "1D element lists edges".to_string()));
    }
    if entry.geom_dim < 3 && entry.face_count() > 0 {
        return Err(violation(entry, "element below 3D lists faces".to_string()));
    }
    Ok(())
}

fn check_indices(entry: &TopologyEntry) -> Result<(), ShapeError> {
    let lists = entry
        .edge_local_verts
        .iter()
        .chain(entry.face_local_verts.iter());
    for list in lists {
        if let Some(&bad) = list.iter().find(|&&n| n >= entry.vertex_count) {
            return Err(violation(
                entry,
                format!("node index {bad} out of range in {list:?}"),
            ));
        }
    }
    Ok(())
}

fn check_distinct_nodes(entry: &TopologyEntry) -> Result<(), ShapeError> {
    for a in 0..entry.vertex_count {
        for b in (a + 1)..entry.vertex_count {
            let coincide = entry
                .nat_coords
                .iter()
                .all(|row| (row[a] - row[b]).abs() < NATURAL_TOL);
            if coincide {
                return Err(violation(entry, format!("nodes {a} and {b} coincide")));
            }
        }
    }
    Ok(())
}

fn check_edge_membership(entry: &TopologyEntry, edge: &[usize]) -> Result<(), ShapeError> {
    if edge.len() < 2 {
        return Err(violation(entry, format!("edge {edge:?} has fewer than 2 nodes")));
    }
    let a = entry.node_coords(edge[0]);
    let b = entry.node_coords(edge[1]);
    let u = sub(&b, &a);
    let uu = dot(&u, &u);
    for &n in &edge[2..] {
        let v = sub(&entry.node_coords(n), &a);
        let t = dot(&v, &u) / uu;
        let off_line = v
            .iter()
            .zip(u.iter())
            .any(|(vi, ui)| (vi - t * ui).abs() > NATURAL_TOL);
        if off_line || t <= NATURAL_TOL || t >= 1.0 - NATURAL_TOL {
            return Err(violation(
                entry,
                format!("node {n} does not lie inside edge {edge:?}"),
            ));
        }
    }
    Ok(())
}

fn check_face_membership(entry: &TopologyEntry, face: &[usize]) -> Result<(), ShapeError> {
    let corners = match entry.kind.cell_type() {
        CellType::Tetrahedron => 3,
        _ => 4,
    };
    if face.len() < corners {
        return Err(violation(
            entry,
            format!("face {face:?} has fewer than {corners} nodes"),
        ));
    }
    let a = entry.node_coords(face[0]);
    let normal = cross(
        &sub(&entry.node_coords(face[1]), &a),
        &sub(&entry.node_coords(face[2]), &a),
    );
    let scale = dot(&normal, &normal).sqrt();
    if scale < NATURAL_TOL {
        return Err(violation(entry, format!("face {face:?} is degenerate")));
    }
    for &n in &face[3..] {
        let distance = dot(&sub(&entry.node_coords(n), &a), &normal) / scale;
        if distance.abs() > NATURAL_TOL {
            return Err(violation(
                entry,
                format!("node {n} does not lie on the plane of face {face:?}"),
            ));
        }
    }
    Ok(())
}

/// Nodes absent from every edge and face must sit strictly inside the cell.
fn check_unreferenced_nodes_are_interior(entry: &TopologyEntry) -> Result<(), ShapeError> {
    if entry.edge_count() == 0 {
        return Ok(());
    }
    let mut referenced = vec![false; entry.vertex_count];
    for list in entry
        .edge_local_verts
        .iter()
        .chain(entry.face_local_verts.iter())
    {
        for &n in list.iter() {
            referenced[n] = true;
        }
    }
    for (n, _) in referenced.iter().enumerate().filter(|(_, r)| !**r) {
        let x = entry.node_coords(n);
        let interior = if entry.kind.cell_type().is_simplex() {
            let sum: f64 = x.iter().sum();
            x.iter().all(|&xi| xi > NATURAL_TOL) && sum < 1.0 - NATURAL_TOL
        } else {
            x.iter().all(|&xi| xi.abs() < 1.0 - NATURAL_TOL)
        };
        if !interior {
            return Err(violation(
                entry,
                format!("node {n} is on the boundary but not listed by any edge or face"),
            ));
        }
    }
    Ok(())
}

fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn cross(a: &[f64], b: &[f64]) -> Vec<f64> {
    vec![
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
