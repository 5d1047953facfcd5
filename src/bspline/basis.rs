use crate::error::{Result, SplineError};

use super::knots::find_span;

/// The nonzero basis values at one parameter, with the span they start from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanBasis {
    /// Knot span index returned by [`find_span`].
    pub span: usize,
    /// Values of basis functions `span - degree ..= span`.
    pub basis: Vec<f64>,
}

/// One sample of a basis function graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisSample {
    /// Curve parameter.
    pub u: f64,
    /// Basis function value at `u`.
    pub value: f64,
}

/// Evaluates the `degree + 1` nonzero basis functions at `u` in `span`.
///
/// Iterative Cox-de Boor triangle (Piegl & Tiller, A2.2).
#[must_use]
pub fn basis_functions(span: usize, u: f64, knots: &[f64], degree: usize) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;
    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Finds the span of `u` and evaluates its basis functions.
#[must_use]
pub fn span_basis(u: f64, knots: &[f64], degree: usize) -> SpanBasis {
    let span = find_span(u, knots, degree);
    SpanBasis {
        span,
        basis: basis_functions(span, u, knots, degree),
    }
}

/// Upper bound on the number of values [`range_including_stop_value`]
/// produces for a single range.
pub const MAX_RANGE_SAMPLES: usize = 100_000;

/// Values from `start` to `stop` by `step`, always ending exactly at `stop`.
///
/// # Errors
///
/// Returns [`SplineError::InvalidStep`] if `step` is not finite and
/// positive, if the bounds are not finite and ordered, or if the range would
/// need more than [`MAX_RANGE_SAMPLES`] values.
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
pub fn range_including_stop_value(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(SplineError::InvalidStep {
            step,
            reason: "step must be finite and positive",
        }
        .into());
    }
    if !(start.is_finite() && stop.is_finite() && start <= stop) {
        return Err(SplineError::InvalidStep {
            step,
            reason: "range bounds must be finite and ordered",
        }
        .into());
    }
    let steps = ((stop - start) / step).floor();
    if steps >= MAX_RANGE_SAMPLES as f64 {
        return Err(SplineError::InvalidStep {
            step,
            reason: "too many samples for the range",
        }
        .into());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as usize;

    let mut result: Vec<f64> = (0..=steps)
        .map(|i| start + i as f64 * step)
        .filter(|&value| value <= stop)
        .collect();
    if result.last() != Some(&stop) {
        result.push(stop);
    }
    Ok(result)
}

/// Samples every basis function over each non-empty knot span.
///
/// Returns one graph per control point; each graph lists the samples of the
/// spans where that basis function is nonzero, in parameter order.
///
/// # Errors
///
/// Returns an error if the knot vector is too short for `degree`, or if
/// `step` cannot sample a span (see [`range_including_stop_value`]).
#[allow(clippy::float_cmp)]
pub fn compute_basis_function(
    knots: &[f64],
    degree: usize,
    step: f64,
) -> Result<Vec<Vec<BasisSample>>> {
    if knots.len() < degree + 2 {
        return Err(SplineError::NegativeDegree {
            knots: knots.len(),
            control_points: knots.len().saturating_sub(degree + 1),
        }
        .into());
    }
    let count = knots.len() - degree - 1;
    let mut result = vec![Vec::new(); count];
    for span in degree..count {
        if knots[span] == knots[span + 1] {
            continue;
        }
        for u in range_including_stop_value(knots[span], knots[span + 1], step)? {
            let basis = basis_functions(span, u, knots, degree);
            for (j, value) in basis.into_iter().enumerate() {
                result[span - degree + j].push(BasisSample { u, value });
            }
        }
    }
    Ok(result)
}
