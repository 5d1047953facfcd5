//! Knot placement stages: cleanup, reparametrization, feature function and
//! knot distribution.
//!
//! Follows Yeh, Nashed, Peterka & Tricoche, "Fast automatic knot placement
//! method for accurate B-spline curve fitting", CAD 128 (2020).

use crate::bspline::{uniform_knots, BSpline1, BSpline2};
use crate::error::{FittingError, Result};
use crate::math::{Vector2, TOLERANCE};

/// Sampled cumulative feature potential over the distinct knots.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeFeatureFunction {
    /// Parameters (the distinct knots of the analysed curve).
    pub xs: Vec<f64>,
    /// Non-decreasing integrated feature values, starting at 0.
    pub ys: Vec<f64>,
}

impl CumulativeFeatureFunction {
    /// Total potential, the last integrated value.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.ys.last().copied().unwrap_or(0.0)
    }
}

/// Drops control points within `tolerance` of the last kept point and
/// re-knots uniformly with the same degree.
///
/// # Errors
///
/// Returns an error if fewer than `degree + 1` points survive.
pub fn remove_overlapping_control_points(spline: &BSpline2, tolerance: f64) -> Result<BSpline2> {
    let mut kept: Vec<Vector2> = Vec::with_capacity(spline.control_points().len());
    for &p in spline.control_points() {
        match kept.last() {
            Some(last) if (p - last).norm() <= tolerance => {}
            _ => kept.push(p),
        }
    }
    let knots = uniform_knots(spline.degree(), kept.len())?;
    BSpline2::new(kept, knots)
}

/// Moves every interior knot so knot spacing follows the chord length
/// between the curve points at consecutive distinct knots.
///
/// A curve of zero length is returned unchanged.
///
/// # Errors
///
/// Returns [`FittingError::UnsupportedMultiplicity`] unless the knot vector
/// is clamped with simple interior knots.
pub fn approximate_arc_length_parametrization(spline: &BSpline2) -> Result<BSpline2> {
    let degree = spline.degree();
    let distinct = spline.distinct_knots();
    if spline.knots().len() + 2 != 2 * (degree + 1) + distinct.len() {
        return Err(FittingError::UnsupportedMultiplicity.into());
    }
    let points: Vec<Vector2> = distinct.iter().map(|&u| spline.evaluate(u)).collect();
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for w in points.windows(2) {
        total += (w[1] - w[0]).norm();
        cumulative.push(total);
    }
    if total <= TOLERANCE {
        return Ok(spline.clone());
    }

    let mut knots = vec![0.0; degree + 1];
    knots.extend(cumulative[..cumulative.len() - 1].iter().map(|d| d / total));
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    BSpline2::new(spline.control_points().to_vec(), knots)
}

/// Integrates the feature `(x⁽ⁿ⁾² + y⁽ⁿ⁾²)^(1/2n)` over the distinct knots
/// with the trapezoid rule.
///
/// # Errors
///
/// Returns [`FittingError::DerivativeOrder`] if `order` exceeds the degree.
pub fn cumulative_feature_function(spline: &BSpline2, order: usize) -> Result<CumulativeFeatureFunction> {
    let degree = spline.degree();
    if order > degree {
        return Err(FittingError::DerivativeOrder { order, degree }.into());
    }
    let knots = spline.knots().to_vec();
    let mut sx = BSpline1::new(spline.control_points().iter().map(|p| p.x).collect(), knots.clone())?;
    let mut sy = BSpline1::new(spline.control_points().iter().map(|p| p.y).collect(), knots)?;
    for _ in 0..order {
        sx = sx.derivative()?;
        sy = sy.derivative()?;
    }

    #[allow(clippy::cast_precision_loss)]
    let exponent = 1.0 / (2 * order.max(1)) as f64;
    let xs = spline.distinct_knots();
    let feature: Vec<f64> = xs
        .iter()
        .map(|&u| {
            let (dx, dy) = (sx.evaluate(u), sy.evaluate(u));
            (dx * dx + dy * dy).powf(exponent)
        })
        .collect();

    let mut ys = Vec::with_capacity(xs.len());
    ys.push(0.0);
    for i in 1..xs.len() {
        ys.push(ys[i - 1] + (xs[i] - xs[i - 1]) * (feature[i] + feature[i - 1]) / 2.0);
    }
    Ok(CumulativeFeatureFunction { xs, ys })
}

/// Places interior knots at equal increments of the cumulative feature.
///
/// The interior count is `round(total · resolution)`; the last computed
/// interior knot is dropped before the clamped end knots of multiplicity
/// `degree + 1` are appended.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn knot_distribution(cff: &CumulativeFeatureFunction, degree: usize, resolution: f64) -> Vec<f64> {
    let (Some(&start), Some(&end)) = (cff.xs.first(), cff.xs.last()) else {
        return Vec::new();
    };
    let (xs, ys) = (&cff.xs, &cff.ys);
    let total = cff.total();
    let count = (total * resolution).round().max(0.0) as usize;
    let delta = total / (count + 1) as f64;

    let mut interior = Vec::with_capacity(count);
    let mut y = delta;
    for i in 1..ys.len() {
        while y < ys[i] && y < total - delta / 2.0 {
            interior.push(xs[i - 1] + (xs[i] - xs[i - 1]) * (y - ys[i - 1]) / (ys[i] - ys[i - 1]));
            y += delta;
        }
    }
    // The final computed interior knot is never kept.
    interior.pop();

    let mut knots = vec![start; degree + 1];
    knots.extend(interior);
    knots.extend(std::iter::repeat_n(end, degree + 1));
    knots
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KnotworkError;
    use approx::assert_abs_diff_eq;

    fn spline(points: &[(f64, f64)], knots: &[f64]) -> BSpline2 {
        BSpline2::new(
            points.iter().map(|&(x, y)| Vector2::new(x, y)).collect(),
            knots.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn overlapping_points_are_merged() {
        let s = spline(
            &[(0.0, 0.0), (0.001, 0.0), (1.0, 0.0), (2.0, 1.0), (2.0, 1.002), (3.0, 0.0)],
            &uniform_knots(2, 6).unwrap(),
        );
        let cleaned = remove_overlapping_control_points(&s, 0.005).unwrap();
        assert_eq!(cleaned.control_points().len(), 4);
        assert_eq!(cleaned.degree(), 2);
        assert_eq!(cleaned.knots(), uniform_knots(2, 4).unwrap().as_slice());
    }

    #[test]
    fn arc_length_knots_keep_count() {
        let s = spline(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(approximate_arc_length_parametrization(&s).unwrap().knots().len(), 6);

        let s = spline(
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)],
            &[0.0, 0.0, 0.0, 0.9, 1.0, 1.0, 1.0],
        );
        let reparam = approximate_arc_length_parametrization(&s).unwrap();
        assert_eq!(reparam.knots().len(), 7);
        assert_abs_diff_eq!(reparam.knots()[3], 0.590_883_198_512_064_5, epsilon = 1e-12);
    }

    #[test]
    fn arc_length_rejects_repeated_interior_knots() {
        let s = spline(
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0), (4.0, 1.0)],
            &[0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 1.0],
        );
        assert!(matches!(
            approximate_arc_length_parametrization(&s),
            Err(KnotworkError::Fitting(FittingError::UnsupportedMultiplicity))
        ));
    }

    #[test]
    fn feature_function_is_monotone() {
        let s = spline(
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0), (4.0, 0.0), (5.0, 1.0), (6.0, 0.0)],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.1, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0],
        );
        let cff = cumulative_feature_function(&s, 3).unwrap();
        assert_eq!(cff.xs, vec![0.0, 0.1, 0.5, 1.0]);
        assert_abs_diff_eq!(cff.ys[0], 0.0);
        assert!(cff.ys.windows(2).all(|w| w[1] >= w[0]));
        assert!(cff.total() > 0.0);
    }

    #[test]
    fn feature_of_a_lower_degree_curve_vanishes() {
        // A cubic elevated to degree 4 has a zero fourth derivative.
        let s = spline(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)], &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0])
            .elevate_degree()
            .unwrap();
        let cff = cumulative_feature_function(&s, 4).unwrap();
        assert_eq!(cff.ys.len(), 2);
        assert_abs_diff_eq!(cff.ys[1], 0.0, epsilon = 1e-3);
        assert_eq!(knot_distribution(&cff, 3, 0.2), vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn derivative_order_above_degree_is_rejected() {
        let s = spline(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(matches!(
            cumulative_feature_function(&s, 3),
            Err(KnotworkError::Fitting(FittingError::DerivativeOrder { order: 3, degree: 2 }))
        ));
    }

    #[test]
    fn knots_follow_equal_potential_steps() {
        // Linear potential: knots land at equal parameter steps, minus the last.
        let cff = CumulativeFeatureFunction {
            xs: vec![0.0, 0.5, 1.0],
            ys: vec![0.0, 5.0, 10.0],
        };
        let knots = knot_distribution(&cff, 3, 0.4);
        let interior = &knots[4..knots.len() - 4];
        assert_eq!(interior.len(), 3);
        for (k, expected) in interior.iter().zip([0.2, 0.4, 0.6]) {
            assert_abs_diff_eq!(*k, expected, epsilon = 1e-12);
        }
        assert!(knots.windows(2).all(|w| w[1] >= w[0]));
    }
}
