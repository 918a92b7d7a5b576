//! Barycentric Lagrange shape functions on triangles and tetrahedra.
//!
//! With barycentric coordinates `L0 = 1 - sum(r)` and `L(d+1) = r[d]`, the
//! node with integer multi-index `alpha` (`sum(alpha) == p`) has the shape
//! function `prod_k P(alpha_k, L_k)`, where
//! `P(a, L) = prod_{m < a} (p L - m) / (m + 1)`. This covers every
//! principal-lattice layout from linear to quartic.

use crate::shape_error::ShapeError;
use crate::topology::catalog::TopologyEntry;
use crate::topology::validation::NATURAL_TOL;

/// Highest polynomial order supported on simplices.
pub const MAX_SIMPLEX_ORDER: usize = 4;

/// Lagrange shape functions on a principal simplex lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplexLagrange {
    dim: usize,
    order: usize,
    /// Barycentric multi-index per node; entries past `dim` are zero.
    alphas: Vec<[usize; 4]>,
}

impl SimplexLagrange {
    /// Recover the lattice multi-index of every node of a catalog entry.
    pub fn from_topology(entry: &TopologyEntry) -> Result<Self, ShapeError> {
        let invalid = |detail: String| ShapeError::InvariantViolation {
            kind: entry.kind,
            detail,
        };
        let dim = entry.geom_dim;
        let order = entry.kind.order();
        if !(1..=MAX_SIMPLEX_ORDER).contains(&order) || !(2..=3).contains(&dim) {
            return Err(invalid(format!(
                "no simplex basis of order {order} in {dim}D"
            )));
        }
        let p = order as f64;

        let mut alphas = Vec::with_capacity(entry.vertex_count);
        for n in 0..entry.vertex_count {
            let coords = entry.node_coords(n);
            let mut bary = [0.0; 4];
            bary[0] = 1.0 - coords.iter().sum::<f64>();
            bary[1..=dim].copy_from_slice(&coords);

            let mut alpha = [0usize; 4];
            for k in 0..=dim {
                let scaled = p * bary[k];
                let rounded = scaled.round();
                if (scaled - rounded).abs() > 1e3 * NATURAL_TOL || rounded < 0.0 {
                    return Err(invalid(format!(
                        "node {n} is not on the order-{order} lattice"
                    )));
                }
                alpha[k] = rounded as usize;
            }
            if alpha.iter().sum::<usize>() != order {
                return Err(invalid(format!("node {n} lies outside the simplex")));
            }
            alphas.push(alpha);
        }
        Ok(Self { dim, order, alphas })
    }

    /// Polynomial order of the lattice.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Barycentric multi-index of node `n`.
    pub fn alpha(&self, n: usize) -> &[usize] {
        &self.alphas[n][..=self.dim]
    }

    pub(crate) fn eval(&self, r: &[f64], s: &mut [f64], dsdr: Option<&mut [Vec<f64>]>) {
        let dim = self.dim;
        let order = self.order;
        let p = order as f64;

        let mut bary = [0.0; 4];
        bary[0] = 1.0 - r[..dim].iter().sum::<f64>();
        bary[1..=dim].copy_from_slice(&r[..dim]);

        // vals[k][a] = P(a, L_k); ders[k][a] = dP(a, L_k)/dL_k
        let mut vals = [[0.0; MAX_SIMPLEX_ORDER + 1]; 4];
        let mut ders = [[0.0; MAX_SIMPLEX_ORDER + 1]; 4];
        let want_derivs = dsdr.is_some();
        for k in 0..=dim {
            let pl = p * bary[k];
            vals[k][0] = 1.0;
            for a in 1..=order {
                let m = (a - 1) as f64;
                let factor = (pl - m) / a as f64;
                if want_derivs {
                    ders[k][a] = ders[k][a - 1] * factor + vals[k][a - 1] * p / a as f64;
                }
                vals[k][a] = vals[k][a - 1] * factor;
            }
        }

        for (n, alpha) in self.alphas.iter().enumerate() {
            s[n] = (0..=dim).map(|k| vals[k][alpha[k]]).product();
        }

        if let Some(dsdr) = dsdr {
            for (n, alpha) in self.alphas.iter().enumerate() {
                let mut ds_dl = [0.0; 4];
                for k in 0..=dim {
                    ds_dl[k] = (0..=dim)
                        .map(|j| {
                            if j == k {
                                ders[j][alpha[j]]
                            } else {
                                vals[j][alpha[j]]
                            }
                        })
                        .product();
                }
                // dL0/dr_d = -1, dL(d+1)/dr_d = 1
                for d in 0..dim {
                    dsdr[n][d] = ds_dl[d + 1] - ds_dl[0];
                }
            }
        }
    }
}
