//! Tensor-product Lagrange shape functions (`lin*`, `qua4`, `qua9`, `qua16`, `hex8`).
//!
//! The node set of these kinds is the full outer product of one 1-D node
//! layout per reference axis, so each shape function factors into per-axis
//! 1-D Lagrange polynomials. Derivatives use the product rule.

use crate::shape_error::ShapeError;
use crate::topology::catalog::TopologyEntry;
use crate::topology::validation::NATURAL_TOL;
use itertools::Itertools;

/// Largest number of distinct node positions along one axis.
pub const MAX_AXIS_NODES: usize = 5;

/// 1-D Lagrange layout along one reference axis.
#[derive(Clone, Debug, PartialEq)]
pub struct LagrangeAxis {
    /// Distinct node positions, ascending.
    nodes: Vec<f64>,
    /// Barycentric weights `1 / prod_{j != i} (x_i - x_j)`.
    weights: Vec<f64>,
}

impl LagrangeAxis {
    /// Build the layout from the (possibly repeated) node coordinates of one axis.
    pub fn from_coords(coords: &[f64]) -> Self {
        let nodes: Vec<f64> = coords
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup_by(|a, b| (a - b).abs() < NATURAL_TOL)
            .collect();
        let weights = nodes
            .iter()
            .enumerate()
            .map(|(i, xi)| {
                let denom: f64 = nodes
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, xj)| xi - xj)
                    .product();
                1.0 / denom
            })
            .collect();
        Self { nodes, weights }
    }

    /// Distinct node positions along the axis.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Index of the layout node located at `x`.
    pub fn position(&self, x: f64) -> Option<usize> {
        self.nodes.iter().position(|xi| (xi - x).abs() < NATURAL_TOL)
    }

    /// Evaluate every 1-D basis polynomial (and optionally its derivative) at `x`.
    #[inline]
    pub fn eval(&self, x: f64, vals: &mut [f64], ders: Option<&mut [f64]>) {
        let m = self.nodes.len();
        // Values must not depend on `ders`: form `v` the same way in both arms.
        match ders {
            None => {
                for i in 0..m {
                    let mut v = 1.0;
                    for j in (0..m).filter(|&j| j != i) {
                        v *= x - self.nodes[j];
                    }
                    vals[i] = self.weights[i] * v;
                }
            }
            Some(ders) => {
                for i in 0..m {
                    let mut v = 1.0;
                    let mut dv = 0.0;
                    for j in (0..m).filter(|&j| j != i) {
                        let f = x - self.nodes[j];
                        dv = dv * f + v;
                        v *= f;
                    }
                    vals[i] = self.weights[i] * v;
                    ders[i] = self.weights[i] * dv;
                }
            }
        }
    }
}

/// Shape functions of a full tensor-product node set.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorLagrange {
    axes: Vec<LagrangeAxis>,
    /// Per node, the index of its coordinate in each axis layout.
    node_axis_index: Vec<[usize; 3]>,
}

impl TensorLagrange {
    /// Derive the per-axis layouts from a catalog entry.
    pub fn from_topology(entry: &TopologyEntry) -> Result<Self, ShapeError> {
        let invalid = |detail: String| ShapeError::InvariantViolation {
            kind: entry.kind,
            detail,
        };
        let axes: Vec<LagrangeAxis> = entry
            .nat_coords
            .iter()
            .map(|row| LagrangeAxis::from_coords(row))
            .collect();
        if let Some(axis) = axes.iter().find(|a| a.nodes.len() > MAX_AXIS_NODES) {
            return Err(invalid(format!(
                "{} distinct nodes along an axis, at most {MAX_AXIS_NODES} supported",
                axis.nodes.len()
            )));
        }
        let full: usize = axes.iter().map(|a| a.nodes.len()).product();
        if full != entry.vertex_count {
            return Err(invalid(format!(
                "{} nodes do not form a full tensor product of {full}",
                entry.vertex_count
            )));
        }

        let mut node_axis_index = Vec::with_capacity(entry.vertex_count);
        for n in 0..entry.vertex_count {
            let mut index = [0usize; 3];
            for (d, axis) in axes.iter().enumerate() {
                index[d] = axis
                    .position(entry.node_coord(n, d))
                    .ok_or_else(|| invalid(format!("node {n} is off the axis layout")))?;
            }
            node_axis_index.push(index);
        }
        Ok(Self {
            axes,
            node_axis_index,
        })
    }

    /// Per-axis 1-D layouts.
    pub fn axes(&self) -> &[LagrangeAxis] {
        &self.axes
    }

    pub(crate) fn eval(&self, r: &[f64], s: &mut [f64], dsdr: Option<&mut [Vec<f64>]>) {
        let dim = self.axes.len();
        let want_derivs = dsdr.is_some();
        let mut vals = [[0.0; MAX_AXIS_NODES]; 3];
        let mut ders = [[0.0; MAX_AXIS_NODES]; 3];
        for (d, axis) in self.axes.iter().enumerate() {
            let der = if want_derivs {
                Some(&mut ders[d][..])
            } else {
                None
            };
            axis.eval(r[d], &mut vals[d], der);
        }

        for (n, index) in self.node_axis_index.iter().enumerate() {
            s[n] = (0..dim).map(|d| vals[d][index[d]]).product();
        }

        if let Some(dsdr) = dsdr {
            for (n, index) in self.node_axis_index.iter().enumerate() {
                for k in 0..dim {
                    dsdr[n][k] = (0..dim)
                        .map(|d| {
                            if d == k {
                                ders[d][index[d]]
                            } else {
                                vals[d][index[d]]
                            }
                        })
                        .product();
                }
            }
        }
    }
}
