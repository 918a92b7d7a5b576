use isoshape::prelude::*;
use isoshape::topology::catalog::catalog;

#[test]
fn catalog_covers_every_kind_once() {
    let kinds: Vec<ElementKind> = catalog().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, ElementKind::ALL.to_vec());
}

#[test]
fn cross_table_consistency() {
    for entry in catalog() {
        assert_eq!(entry.nat_coords.len(), entry.geom_dim, "{}", entry.kind);
        for row in entry.nat_coords {
            assert_eq!(row.len(), entry.vertex_count, "{}", entry.kind);
        }
        let max_index = entry
            .edge_local_verts
            .iter()
            .chain(entry.face_local_verts.iter())
            .flat_map(|list| list.iter().copied())
            .max();
        if let Some(max_index) = max_index {
            assert!(max_index < entry.vertex_count, "{}", entry.kind);
        }
    }
}

#[test]
fn edge_and_face_nodes_cover_all_non_interior_nodes() {
    // Every node is either on an edge/face or strictly interior; kinds with
    // no interior nodes reference all of them.
    for kind in [
        ElementKind::Tri3,
        ElementKind::Tri6,
        ElementKind::Qua4,
        ElementKind::Qua8,
        ElementKind::Qua12,
        ElementKind::Tet4,
        ElementKind::Tet10,
        ElementKind::Hex8,
        ElementKind::Hex20,
    ] {
        let entry = lookup_topology(kind);
        let max_index = entry
            .edge_local_verts
            .iter()
            .flat_map(|list| list.iter().copied())
            .max()
            .expect("edges");
        assert_eq!(max_index + 1, entry.vertex_count, "{kind}");
    }
    validate_catalog().expect("catalog invariants");
}

#[test]
fn simplex_edge_nodes_lie_on_their_edge() {
    // Triangle edge e runs opposite barycentric coordinate L[(e + 2) % 3].
    for kind in [
        ElementKind::Tri3,
        ElementKind::Tri6,
        ElementKind::Tri10,
        ElementKind::Tri15,
    ] {
        let entry = lookup_topology(kind);
        for (e, edge) in entry.edge_local_verts.iter().enumerate() {
            for &n in edge.iter() {
                let x = entry.node_coords(n);
                let bary = [1.0 - x[0] - x[1], x[0], x[1]];
                assert!(
                    bary[(e + 2) % 3].abs() < 1e-12,
                    "{kind}: node {n} off edge {e}"
                );
            }
        }
    }
}

#[test]
fn hex_face_nodes_share_a_constant_coordinate() {
    for kind in [ElementKind::Hex8, ElementKind::Hex20] {
        let entry = lookup_topology(kind);
        for face in entry.face_local_verts {
            let first = entry.node_coords(face[0]);
            let constant_axis = (0..3).find(|&d| {
                face.iter()
                    .all(|&n| (entry.node_coord(n, d) - first[d]).abs() < 1e-12)
            });
            assert!(constant_axis.is_some(), "{kind}: face {face:?} is not planar");
        }
    }
}

#[test]
fn tet_face_nodes_lie_on_their_face() {
    for kind in [ElementKind::Tet4, ElementKind::Tet10] {
        let entry = lookup_topology(kind);
        for face in entry.face_local_verts {
            let bary_of = |n: usize| {
                let x = entry.node_coords(n);
                [1.0 - x[0] - x[1] - x[2], x[0], x[1], x[2]]
            };
            let vanishing = (0..4).find(|&k| face.iter().all(|&n| bary_of(n)[k].abs() < 1e-12));
            assert!(vanishing.is_some(), "{kind}: face {face:?} is not on a facet");
        }
    }
}

#[test]
fn corner_nodes_sit_at_reference_extremes() {
    for entry in catalog() {
        for n in 0..entry.corner_count() {
            for x in entry.node_coords(n) {
                let extreme = if entry.kind.cell_type().is_simplex() {
                    x == 0.0 || x == 1.0
                } else {
                    x == -1.0 || x == 1.0
                };
                assert!(extreme, "{}: corner {n} at {x}", entry.kind);
            }
        }
    }
}

#[test]
fn lookup_by_name_rejects_unknown_kinds() {
    assert_eq!(
        lookup_topology_by_name("tri10").map(|e| e.vertex_count),
        Ok(10)
    );
    assert_eq!(
        lookup_topology_by_name("pyr5"),
        Err(ShapeError::UnknownElementKind("pyr5".to_string()))
    );
}

#[test]
fn entries_serialize_to_json() {
    let json = serde_json::to_value(lookup_topology(ElementKind::Tri3)).expect("serialize");
    assert_eq!(json["kind"], "tri3");
    assert_eq!(json["vertex_count"], 3);
    assert_eq!(json["geom_dim"], 2);
    assert_eq!(json["edge_local_verts"][2], serde_json::json!([2, 0]));
    assert_eq!(json["face_local_verts"], serde_json::json!([]));
    assert_eq!(json["nat_coords"][1], serde_json::json!([0.0, 0.0, 1.0]));

    let kind: ElementKind = serde_json::from_str("\"hex20\"").expect("deserialize");
    assert_eq!(kind, ElementKind::Hex20);
}
