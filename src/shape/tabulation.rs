//! Batch evaluation and field interpolation on the reference element.

use crate::shape::registry::{ShapeResult, evaluate_shape_into};
use crate::shape_error::ShapeError;
use crate::topology::catalog::lookup_topology;
use crate::topology::element_kind::ElementKind;

/// Shape-function tabulation at a batch of natural points.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisTabulation {
    /// Kind the tabulation belongs to.
    pub kind: ElementKind,
    /// Shape values per point: `[point][node]`.
    pub values: Vec<Vec<f64>>,
    /// Natural-coordinate gradients per point: `[point][node][axis]`.
    pub gradients: Option<Vec<Vec<Vec<f64>>>>,
}

impl BasisTabulation {
    /// Number of tabulated points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no point was tabulated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluate the shape functions of `kind` at every point of `points`.
///
/// One output buffer is reused for the whole batch.
pub fn tabulate<P: AsRef<[f64]>>(
    kind: ElementKind,
    points: &[P],
    want_derivs: bool,
) -> Result<BasisTabulation, ShapeError> {
    log::trace!("tabulating {kind} at {} point(s)", points.len());
    let mut buffer = ShapeResult::for_kind(kind);
    let mut values = Vec::with_capacity(points.len());
    let mut gradients = want_derivs.then(|| Vec::with_capacity(points.len()));
    for point in points {
        evaluate_shape_into(kind, point.as_ref(), want_derivs, &mut buffer)?;
        values.push(buffer.values().to_vec());
        if let (Some(gradients), Some(derivs)) = (gradients.as_mut(), buffer.derivatives()) {
            gradients.push(derivs.to_vec());
        }
    }
    Ok(BasisTabulation {
        kind,
        values,
        gradients,
    })
}

/// Parallel [`tabulate`]; every point gets its own output buffer.
#[cfg(feature = "rayon")]
pub fn par_tabulate<P: AsRef<[f64]> + Sync>(
    kind: ElementKind,
    points: &[P],
    want_derivs: bool,
) -> Result<BasisTabulation, ShapeError> {
    use crate::shape::registry::evaluate_shape;
    use rayon::prelude::*;

    log::trace!("tabulating {kind} at {} point(s) in parallel", points.len());
    let results: Vec<ShapeResult> = points
        .par_iter()
        .map(|point| evaluate_shape(kind, point.as_ref(), want_derivs))
        .collect::<Result<_, _>>()?;
    let mut values = Vec::with_capacity(results.len());
    let mut gradients = want_derivs.then(|| Vec::with_capacity(results.len()));
    for result in results {
        let (v, d) = result.into_parts();
        values.push(v);
        if let (Some(gradients), Some(d)) = (gradients.as_mut(), d) {
            gradients.push(d);
        }
    }
    Ok(BasisTabulation {
        kind,
        values,
        gradients,
    })
}

fn check_nodal_values(kind: ElementKind, nodal_values: &[f64]) -> Result<(), ShapeError> {
    let expected = lookup_topology(kind).vertex_count;
    if nodal_values.len() != expected {
        return Err(ShapeError::NodalValueCount {
            kind,
            expected,
            found: nodal_values.len(),
        });
    }
    Ok(())
}

/// Interpolate a nodal field at natural point `r`: `sum_n S[n] u[n]`.
pub fn interpolate(kind: ElementKind, r: &[f64], nodal_values: &[f64]) -> Result<f64, ShapeError> {
    check_nodal_values(kind, nodal_values)?;
    let mut buffer = ShapeResult::new();
    evaluate_shape_into(kind, r, false, &mut buffer)?;
    Ok(buffer
        .values()
        .iter()
        .zip(nodal_values.iter())
        .map(|(s, u)| s * u)
        .sum())
}

/// Gradient of a nodal field with respect to the natural coordinates at `r`.
pub fn natural_gradient(
    kind: ElementKind,
    r: &[f64],
    nodal_values: &[f64],
) -> Result<Vec<f64>, ShapeError> {
    check_nodal_values(kind, nodal_values)?;
    let mut buffer = ShapeResult::new();
    evaluate_shape_into(kind, r, true, &mut buffer)?;
    let mut grad = vec![0.0; r.len()];
    if let Some(derivs) = buffer.derivatives() {
        for (row, u) in derivs.iter().zip(nodal_values.iter()) {
            for (g, dsdr) in grad.iter_mut().zip(row.iter()) {
                *g += dsdr * u;
            }
        }
    }
    Ok(grad)
}
