//! Least-squares control points for a prescribed knot vector
//! (Piegl & Tiller, §9.4.1, without end-point constraints).

use nalgebra::{DMatrix, DVector};

use crate::bspline::{span_basis, BSpline2};
use crate::error::{Result, SplineError};
use crate::math::linalg::SymmetricMatrix;
use crate::math::Vector2;

/// Sample parameters for the fit: the domain start, `subdivision` evenly
/// spaced interior samples in every non-empty span, and the domain end.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn sample_between_knots_plus_end_points(knots: &[f64], degree: usize, subdivision: usize) -> Vec<f64> {
    let start = knots[degree];
    let end = knots[knots.len() - degree - 1];
    #[allow(clippy::cast_precision_loss)]
    let divisions = (subdivision + 1) as f64;

    let mut us = vec![start];
    for i in degree..knots.len() - degree - 1 {
        let (a, b) = (knots[i], knots[i + 1]);
        if a == b {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        us.extend(
            (1..=subdivision)
                .map(|j| a + (b - a) * j as f64 / divisions)
                .filter(|&u| u != end),
        );
    }
    us.push(end);
    us
}

/// Solves for the control points of a degree `degree` B-spline on `knots`
/// that best approximates `target` at the sample parameters.
///
/// Builds the design matrix `N`, then solves `NᵗN·P = NᵗQ` once per
/// coordinate channel.
///
/// # Errors
///
/// Returns [`SplineError::NegativeDegree`] if `knots` is too short for
/// `degree`, and `FittingError::SingularSystem` if the samples do not
/// determine every control point.
pub fn least_squares_approximation(
    target: &BSpline2,
    knots: &[f64],
    degree: usize,
    subdivision: usize,
) -> Result<Vec<Vector2>> {
    if knots.len() < 2 * (degree + 1) {
        return Err(SplineError::NegativeDegree {
            knots: knots.len(),
            control_points: knots.len().saturating_sub(degree + 1),
        }
        .into());
    }
    let count = knots.len() - degree - 1;
    let us = sample_between_knots_plus_end_points(knots, degree, subdivision);

    let mut n = DMatrix::zeros(us.len(), count);
    for (row, &u) in us.iter().enumerate() {
        let sb = span_basis(u, knots, degree);
        for (j, value) in sb.basis.into_iter().enumerate() {
            n[(row, sb.span - degree + j)] = value;
        }
    }
    let samples: Vec<Vector2> = us.iter().map(|&u| target.evaluate(u)).collect();
    let qx = DVector::from_iterator(samples.len(), samples.iter().map(|q| q.x));
    let qy = DVector::from_iterator(samples.len(), samples.iter().map(|q| q.y));

    let normal = SymmetricMatrix::gram(&n);
    let px = normal.solve(&n.tr_mul(&qx))?;
    let py = normal.solve(&n.tr_mul(&qy))?;
    tracing::debug!(samples = us.len(), control_points = count, "least-squares fit solved");
    Ok(px.iter().zip(py.iter()).map(|(&x, &y)| Vector2::new(x, y)).collect())
}
