//! Shape evaluator registry: one [`ShapeFunction`] per [`ElementKind`].
//!
//! Evaluators are derived from the topology catalog on first use and are
//! immutable afterwards. The derivation runs exactly once, under the
//! `Lazy` lock, so no caller can observe a partially built registry.

use crate::debug_invariants::DebugInvariants;
use crate::shape::lagrange::TensorLagrange;
use crate::shape::serendipity::Serendipity;
use crate::shape::simplex::SimplexLagrange;
use crate::shape_error::ShapeError;
use crate::topology::catalog::{TopologyEntry, catalog, lookup_topology};
use crate::topology::element_kind::{ElementKind, ShapeFamily};
use once_cell::sync::Lazy;

/// Shape-function evaluator of one element kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeFunction {
    /// Full tensor product of 1-D Lagrange layouts.
    Lagrange(TensorLagrange),
    /// Serendipity quad or hex.
    Serendipity(Serendipity),
    /// Barycentric Lagrange triangle or tetrahedron.
    Simplex(SimplexLagrange),
}

impl ShapeFunction {
    /// Derive the evaluator of a catalog entry from its natural coordinates.
    pub fn from_topology(entry: &TopologyEntry) -> Result<Self, ShapeError> {
        match entry.kind.family() {
            ShapeFamily::Lagrange => TensorLagrange::from_topology(entry).map(Self::Lagrange),
            ShapeFamily::Serendipity => Serendipity::from_topology(entry).map(Self::Serendipity),
            ShapeFamily::Simplex => SimplexLagrange::from_topology(entry).map(Self::Simplex),
        }
    }

    /// Family this evaluator belongs to.
    pub fn family(&self) -> ShapeFamily {
        match self {
            ShapeFunction::Lagrange(_) => ShapeFamily::Lagrange,
            ShapeFunction::Serendipity(_) => ShapeFamily::Serendipity,
            ShapeFunction::Simplex(_) => ShapeFamily::Simplex,
        }
    }

    /// Fill `s` (and `dsdr` when present). Lengths are the caller's responsibility.
    #[inline]
    pub(crate) fn eval(&self, r: &[f64], s: &mut [f64], dsdr: Option<&mut [Vec<f64>]>) {
        match self {
            ShapeFunction::Lagrange(f) => f.eval(r, s, dsdr),
            ShapeFunction::Serendipity(f) => f.eval(r, s, dsdr),
            ShapeFunction::Simplex(f) => f.eval(r, s, dsdr),
        }
    }
}

static REGISTRY: Lazy<Vec<ShapeFunction>> = Lazy::new(build_registry);

fn build_registry() -> Vec<ShapeFunction> {
    let registry: Vec<ShapeFunction> = catalog()
        .iter()
        .map(|entry| {
            entry.debug_assert_invariants();
            // Unreachable for the static catalog: every entry is derived in
            // `every_kind_has_an_evaluator_of_its_family` and validated in
            // `validation::tests::full_catalog_validates`.
            ShapeFunction::from_topology(entry)
                .unwrap_or_else(|e| panic!("[registry] cannot derive shape functions: {e}"))
        })
        .collect();
    log::debug!(
        "shape registry initialised with {} evaluators",
        registry.len()
    );
    registry
}

/// Force registry initialisation, e.g. before spawning worker threads.
pub fn initialize() {
    Lazy::force(&REGISTRY);
}

/// Evaluator registered for `kind`.
#[inline]
pub fn shape_function(kind: ElementKind) -> &'static ShapeFunction {
    &REGISTRY[kind.index()]
}

/// Reusable output of one shape evaluation.
///
/// Reusing a buffer for repeated evaluations of the same kind does not
/// allocate.
#[derive(Clone, Debug, Default)]
pub struct ShapeResult {
    values: Vec<f64>,
    derivatives: Vec<Vec<f64>>,
    has_derivatives: bool,
}

impl ShapeResult {
    /// Empty buffer; grows on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-sized for `kind`, derivatives included.
    pub fn for_kind(kind: ElementKind) -> Self {
        let entry = lookup_topology(kind);
        Self {
            values: vec![0.0; entry.vertex_count],
            derivatives: vec![vec![0.0; entry.geom_dim]; entry.vertex_count],
            has_derivatives: false,
        }
    }

    /// Shape value of every node.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `dS[n]/dR[d]` as `[node][axis]`, if derivatives were requested.
    #[inline]
    pub fn derivatives(&self) -> Option<&[Vec<f64>]> {
        if self.has_derivatives {
            Some(&self.derivatives)
        } else {
            None
        }
    }

    /// Split into owned values and derivatives.
    pub fn into_parts(self) -> (Vec<f64>, Option<Vec<Vec<f64>>>) {
        let derivatives = self.has_derivatives.then_some(self.derivatives);
        (self.values, derivatives)
    }

    fn prepare(&mut self, vertex_count: usize, geom_dim: usize, want_derivs: bool) {
        self.values.resize(vertex_count, 0.0);
        self.has_derivatives = want_derivs;
        if want_derivs {
            self.derivatives.resize_with(vertex_count, Vec::new);
            for row in &mut self.derivatives {
                row.resize(geom_dim, 0.0);
            }
        }
    }

    fn buffers_mut(&mut self) -> (&mut [f64], Option<&mut [Vec<f64>]>) {
        let derivatives = if self.has_derivatives {
            Some(&mut self.derivatives[..])
        } else {
            None
        };
        (&mut self.values, derivatives)
    }
}

/// Equality over what callers can observe; stale derivative rows of a
/// reused buffer are ignored.
impl PartialEq for ShapeResult {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values() && self.derivatives() == other.derivatives()
    }
}

/// Evaluate the shape functions of `kind` at natural point `r` into `out`.
///
/// `r` may lie outside the reference element; values are extrapolated.
/// With `want_derivs == false` no derivative arithmetic is performed.
pub fn evaluate_shape_into(
    kind: ElementKind,
    r: &[f64],
    want_derivs: bool,
    out: &mut ShapeResult,
) -> Result<(), ShapeError> {
    let entry = lookup_topology(kind);
    if r.len() != entry.geom_dim {
        return Err(ShapeError::InvalidCoordinateDimension {
            kind,
            expected: entry.geom_dim,
            found: r.len(),
        });
    }
    out.prepare(entry.vertex_count, entry.geom_dim, want_derivs);
    let (s, dsdr) = out.buffers_mut();
    shape_function(kind).eval(r, s, dsdr);
    Ok(())
}

/// Evaluate the shape functions of `kind` at natural point `r`.
pub fn evaluate_shape(
    kind: ElementKind,
    r: &[f64],
    want_derivs: bool,
) -> Result<ShapeResult, ShapeError> {
    let mut out = ShapeResult::new();
    evaluate_shape_into(kind, r, want_derivs, &mut out)?;
    Ok(out)
}

/// Evaluate by identifier, e.g. `"tri6"`.
pub fn evaluate_shape_by_name(
    name: &str,
    r: &[f64],
    want_derivs: bool,
) -> Result<ShapeResult, ShapeError> {
    let kind: ElementKind = name.parse()?;
    evaluate_shape(kind, r, want_derivs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_an_evaluator_of_its_family() {
        initialize();
        for kind in ElementKind::ALL {
            assert_eq!(shape_function(kind).family(), kind.family());
        }
    }

    #[test]
    fn qua4_centroid() {
        let result = evaluate_shape(ElementKind::Qua4, &[0.0, 0.0], false).unwrap();
        assert_eq!(result.values(), &[0.25, 0.25, 0.25, 0.25]);
        assert!(result.derivatives().is_none());
    }

    #[test]
    fn tri3_origin_is_vertex_zero() {
        let result = evaluate_shape(ElementKind::Tri3, &[0.0, 0.0], false).unwrap();
        assert_eq!(result.values(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn dimension_mismatch() {
        let err = evaluate_shape(ElementKind::Tri6, &[0.3], true).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidCoordinateDimension {
                kind: ElementKind::Tri6,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            evaluate_shape_by_name("bogus", &[0.0], false).unwrap_err(),
            ShapeError::UnknownElementKind("bogus".to_string())
        );
    }

    #[test]
    fn buffer_switches_between_kinds_and_modes() {
        let mut out = ShapeResult::for_kind(ElementKind::Hex20);
        evaluate_shape_into(ElementKind::Hex20, &[0.1, 0.2, 0.3], true, &mut out).unwrap();
        assert_eq!(out.values().len(), 20);
        assert_eq!(out.derivatives().map(|d| d.len()), Some(20));

        evaluate_shape_into(ElementKind::Lin3, &[0.5], false, &mut out).unwrap();
        assert_eq!(out.values().len(), 3);
        assert!(out.derivatives().is_none());

        evaluate_shape_into(ElementKind::Lin3, &[0.5], true, &mut out).unwrap();
        let derivs = out.derivatives().unwrap();
        assert_eq!(derivs.len(), 3);
        assert!(derivs.iter().all(|row| row.len() == 1));
    }

    #[test]
    fn reused_buffer_equals_fresh_result() {
        let mut reused = ShapeResult::new();
        evaluate_shape_into(ElementKind::Qua4, &[0.0, 0.0], true, &mut reused).unwrap();
        evaluate_shape_into(ElementKind::Qua4, &[0.0, 0.0], false, &mut reused).unwrap();
        let fresh = evaluate_shape(ElementKind::Qua4, &[0.0, 0.0], false).unwrap();
        assert_eq!(reused, fresh);

        let with_derivs = evaluate_shape(ElementKind::Qua4, &[0.0, 0.0], true).unwrap();
        assert_ne!(with_derivs, fresh);
    }

    #[test]
    fn into_parts_drops_unrequested_derivatives() {
        let (values, derivs) = evaluate_shape(ElementKind::Tet4, &[0.1, 0.1, 0.1], false)
            .unwrap()
            .into_parts();
        assert_eq!(values.len(), 4);
        assert!(derivs.is_none());
    }
}
