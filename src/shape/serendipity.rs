//! Serendipity shape functions (`qua8`, `qua12`, `hex20`).
//!
//! Serendipity elements carry only boundary nodes, so their node sets are
//! not full tensor products. Every shape function is still a product of
//! per-axis factors: a linear factor `1 + x_d c_d` along each axis where
//! the node sits at an extreme, a bubble `1 - x_a^2` along the axis where it
//! does not, and a corner correction. Nodes are classified once from their
//! natural coordinates.

use crate::shape_error::ShapeError;
use crate::topology::catalog::TopologyEntry;
use crate::topology::validation::NATURAL_TOL;

const THIRD: f64 = 1.0 / 3.0;

/// Role of a node in a serendipity element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SerendipityNode {
    /// Every coordinate at `±1`.
    Corner { signs: [f64; 3] },
    /// Coordinate `0` along `axis`, `±1` elsewhere (quadratic elements).
    MidSide { axis: usize, signs: [f64; 3] },
    /// Coordinate `offset = ±1/3` along `axis`, `±1` elsewhere (cubic elements).
    ThirdPoint {
        axis: usize,
        offset: f64,
        signs: [f64; 3],
    },
}

/// Quadratic or cubic serendipity shape functions on `[-1, 1]^dim`.
#[derive(Clone, Debug, PartialEq)]
pub struct Serendipity {
    dim: usize,
    order: usize,
    nodes: Vec<SerendipityNode>,
}

impl Serendipity {
    /// Classify the nodes of a catalog entry.
    pub fn from_topology(entry: &TopologyEntry) -> Result<Self, ShapeError> {
        let invalid = |detail: String| ShapeError::InvariantViolation {
            kind: entry.kind,
            detail,
        };
        let dim = entry.geom_dim;
        let order = entry.kind.order();
        match (order, dim) {
            (2, 2) | (2, 3) | (3, 2) => {}
            _ => {
                return Err(invalid(format!(
                    "no serendipity basis of order {order} in {dim}D"
                )));
            }
        }

        let mut nodes = Vec::with_capacity(entry.vertex_count);
        for n in 0..entry.vertex_count {
            let mut signs = [0.0; 3];
            let mut inner = None;
            for d in 0..dim {
                let x = entry.node_coord(n, d);
                if (x.abs() - 1.0).abs() < NATURAL_TOL {
                    signs[d] = x.signum();
                } else if inner.replace(d).is_some() {
                    return Err(invalid(format!("node {n} is not on an edge")));
                }
            }
            let node = match inner {
                None => SerendipityNode::Corner { signs },
                Some(axis) => {
                    let x = entry.node_coord(n, axis);
                    if order == 2 && x.abs() < NATURAL_TOL {
                        SerendipityNode::MidSide { axis, signs }
                    } else if order == 3 && (x.abs() - THIRD).abs() < NATURAL_TOL {
                        SerendipityNode::ThirdPoint {
                            axis,
                            offset: x,
                            signs,
                        }
                    } else {
                        return Err(invalid(format!(
                            "node {n} at {x} along axis {axis} fits no order-{order} edge position"
                        )));
                    }
                }
            };
            nodes.push(node);
        }
        Ok(Self { dim, order, nodes })
    }

    /// Classified nodes, in catalog order.
    pub fn nodes(&self) -> &[SerendipityNode] {
        &self.nodes
    }

    pub(crate) fn eval(&self, r: &[f64], s: &mut [f64], mut dsdr: Option<&mut [Vec<f64>]>) {
        let dim = self.dim;
        for (n, node) in self.nodes.iter().enumerate() {
            match *node {
                SerendipityNode::Corner { signs } => {
                    let lin = linear_factors(r, &signs, dim);
                    let p: f64 = lin[..dim].iter().product();
                    if self.order == 2 {
                        // 2^-D P (sum x_d c_d - (D - 1))
                        let scale = 0.5f64.powi(dim as i32);
                        let q: f64 =
                            (0..dim).map(|d| r[d] * signs[d]).sum::<f64>() - (dim as f64 - 1.0);
                        s[n] = scale * p * q;
                        if let Some(dsdr) = dsdr.as_deref_mut() {
                            for k in 0..dim {
                                dsdr[n][k] =
                                    scale * signs[k] * product_except(&lin, dim, k) * (q + lin[k]);
                            }
                        }
                    } else {
                        // P (9 |x|^2 - 10) / 32
                        let q = 9.0 * (0..dim).map(|d| r[d] * r[d]).sum::<f64>() - 10.0;
                        s[n] = p * q / 32.0;
                        if let Some(dsdr) = dsdr.as_deref_mut() {
                            for k in 0..dim {
                                dsdr[n][k] = (signs[k] * product_except(&lin, dim, k) * q
                                    + p * 18.0 * r[k])
                                    / 32.0;
                            }
                        }
                    }
                }
                SerendipityNode::MidSide { axis, signs } => {
                    let lin = linear_factors(r, &signs, dim);
                    let scale = 0.5f64.powi(dim as i32 - 1);
                    let bubble = 1.0 - r[axis] * r[axis];
                    let rest = product_except(&lin, dim, axis);
                    s[n] = scale * bubble * rest;
                    if let Some(dsdr) = dsdr.as_deref_mut() {
                        for k in 0..dim {
                            dsdr[n][k] = if k == axis {
                                -2.0 * scale * r[axis] * rest
                            } else {
                                scale * bubble * signs[k] * product_except2(&lin, dim, axis, k)
                            };
                        }
                    }
                }
                SerendipityNode::ThirdPoint {
                    axis,
                    offset,
                    signs,
                } => {
                    let lin = linear_factors(r, &signs, dim);
                    let x = r[axis];
                    let bubble = 1.0 - x * x;
                    let shift = 1.0 + 9.0 * x * offset;
                    let rest = product_except(&lin, dim, axis);
                    s[n] = 9.0 / 32.0 * bubble * shift * rest;
                    if let Some(dsdr) = dsdr.as_deref_mut() {
                        for k in 0..dim {
                            dsdr[n][k] = if k == axis {
                                9.0 / 32.0 * (-2.0 * x * shift + 9.0 * offset * bubble) * rest
                            } else {
                                9.0 / 32.0
                                    * bubble
                                    * shift
                                    * signs[k]
                                    * product_except2(&lin, dim, axis, k)
                            };
                        }
                    }
                }
            }
        }
    }
}

/// `1 + x_d c_d` per axis.
#[inline]
fn linear_factors(r: &[f64], signs: &[f64; 3], dim: usize) -> [f64; 3] {
    let mut lin = [1.0; 3];
    for d in 0..dim {
        lin[d] = 1.0 + r[d] * signs[d];
    }
    lin
}

#[inline]
fn product_except(lin: &[f64; 3], dim: usize, skip: usize) -> f64 {
    (0..dim).filter(|&d| d != skip).map(|d| lin[d]).product()
}

#[inline]
fn product_except2(lin: &[f64; 3], dim: usize, a: usize, b: usize) -> f64 {
    (0..dim)
        .filter(|&d| d != a && d != b)
        .map(|d| lin[d])
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::catalog::lookup_topology;
    use crate::topology::element_kind::ElementKind;

    #[test]
    fn qua8_nodes_are_classified() {
        let f = Serendipity::from_topology(lookup_topology(ElementKind::Qua8)).unwrap();
        let corners = f
            .nodes()
            .iter()
            .filter(|n| matches!(n, SerendipityNode::Corner { .. }))
            .count();
        assert_eq!(corners, 4);
        assert_eq!(
            f.nodes()[5],
            SerendipityNode::MidSide {
                axis: 1,
                signs: [1.0, 0.0, 0.0]
            }
        );
    }

    #[test]
    fn qua12_edge_nodes_are_third_points() {
        let f = Serendipity::from_topology(lookup_topology(ElementKind::Qua12)).unwrap();
        assert!(matches!(
            f.nodes()[4],
            SerendipityNode::ThirdPoint { axis: 0, .. }
        ));
        assert!(matches!(
            f.nodes()[11],
            SerendipityNode::ThirdPoint { axis: 1, .. }
        ));
    }

    #[test]
    fn qua8_matches_closed_form() {
        let f = Serendipity::from_topology(lookup_topology(ElementKind::Qua8)).unwrap();
        let (r, t) = (0.3, -0.7);
        let mut s = [0.0; 8];
        f.eval(&[r, t], &mut s, None);
        let expected0 = 0.25 * (1.0 - r) * (1.0 - t) * (-r - t - 1.0);
        let expected4 = 0.5 * (1.0 - r * r) * (1.0 - t);
        assert!((s[0] - expected0).abs() < 1e-14);
        assert!((s[4] - expected4).abs() < 1e-14);
    }

    #[test]
    fn interior_nodes_are_rejected() {
        assert!(Serendipity::from_topology(lookup_topology(ElementKind::Qua9)).is_err());
    }
}
