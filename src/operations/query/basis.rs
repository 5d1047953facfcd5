use crate::bspline::{
    basis_functions, compute_basis_function, range_including_stop_value, span_basis, BasisSample, SpanBasis,
};
use crate::error::{Result, SplineError};
use crate::geometry::curve::Curve;
use crate::math::Complex;

/// One sample of a complex rational basis function graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexBasisSample {
    /// Curve parameter.
    pub u: f64,
    /// Rational basis function value at `u`.
    pub value: Complex,
}

/// Knot span and nonzero basis values of `curve` at `u`.
///
/// # Errors
///
/// Returns [`SplineError::NegativeDegree`] if the curve has too few knots.
pub fn span_at(curve: &Curve, u: f64) -> Result<SpanBasis> {
    let degree = curve.degree().ok_or(SplineError::NegativeDegree {
        knots: curve.knots().len(),
        control_points: curve.control_point_count(),
    })?;
    Ok(span_basis(u, curve.knots(), degree))
}

/// Sampled basis function graphs of a curve's knot vector, one per control
/// point, for the knot editor overlay.
///
/// # Errors
///
/// Returns [`SplineError::NegativeDegree`] if the curve has too few knots,
/// and [`SplineError::InvalidStep`] if `step` cannot sample its spans.
pub fn basis_graphs(curve: &Curve, step: f64) -> Result<Vec<Vec<BasisSample>>> {
    let degree = curve.degree().ok_or(SplineError::NegativeDegree {
        knots: curve.knots().len(),
        control_points: curve.control_point_count(),
    })?;
    compute_basis_function(curve.knots(), degree, step)
}

/// Sampled rational basis functions `Nᵢ·wᵢ / Σ Nⱼ·wⱼ` of a complex curve.
///
/// Values are complex; at every parameter they sum to 1.
///
/// # Errors
///
/// Returns an error for non-complex curves, an invalid layout, or a `step`
/// that cannot sample the spans.
#[allow(clippy::float_cmp)]
pub fn complex_rational_basis_functions(curve: &Curve, step: f64) -> Result<Vec<Vec<ComplexBasisSample>>> {
    let rational = curve.to_rational()?;
    let (knots, degree) = (rational.knots(), rational.degree());
    let weights: Vec<Complex> = rational.control_points().iter().map(|p| p.weight).collect();

    let mut graphs = vec![Vec::new(); weights.len()];
    for span in degree..weights.len() {
        if knots[span] == knots[span + 1] {
            continue;
        }
        let local = &weights[span - degree..=span];
        for u in range_including_stop_value(knots[span], knots[span + 1], step)? {
            let basis = basis_functions(span, u, knots, degree);
            let denominator: Complex = basis.iter().zip(local).map(|(&n, &w)| w * n).sum();
            for (j, (&n, &w)) in basis.iter().zip(local).enumerate() {
                graphs[span - degree + j].push(ComplexBasisSample {
                    u,
                    value: w * n / denominator,
                });
            }
        }
    }
    Ok(graphs)
}
