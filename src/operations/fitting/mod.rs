//! Automatic knot placement and least-squares refitting of sketched strokes.

mod config;
mod least_squares;
mod placement;

pub use config::FittingConfig;
pub use least_squares::{least_squares_approximation, sample_between_knots_plus_end_points};
pub use placement::{
    approximate_arc_length_parametrization, cumulative_feature_function, knot_distribution,
    remove_overlapping_control_points, CumulativeFeatureFunction,
};

use crate::bspline::BSpline2;
use crate::error::{Result, SplineError};
use crate::math::Vector2;

/// Simplifies an over-sampled stroke into a B-spline with fewer control
/// points and curvature-adapted knots.
pub struct AutomaticFitting {
    config: FittingConfig,
}

impl AutomaticFitting {
    /// Creates a new `AutomaticFitting` operation.
    #[must_use]
    pub fn new(config: FittingConfig) -> Self {
        Self { config }
    }

    /// Runs the fitting pipeline on `spline`.
    ///
    /// Returns `spline` unchanged when its degree is below
    /// `config.min_degree`, when cleanup leaves too few points, or when the
    /// refit would not reduce the control point count.
    ///
    /// # Errors
    ///
    /// Returns an error if the knot vector has repeated interior knots, or
    /// if the normal equations are singular.
    pub fn execute(&self, spline: &BSpline2) -> Result<BSpline2> {
        let config = &self.config;
        if spline.degree() < config.min_degree {
            tracing::debug!(degree = spline.degree(), "degree too low for automatic fitting");
            return Ok(spline.clone());
        }

        let tolerance = config.effective_overlap_tolerance();
        let distinct_points = spline
            .control_points()
            .iter()
            .fold((0_usize, None::<&Vector2>), |(count, last), p| match last {
                Some(q) if (p - q).norm() <= tolerance => (count, last),
                _ => (count + 1, Some(p)),
            })
            .0;
        if distinct_points <= spline.degree() {
            tracing::debug!(distinct_points, "stroke collapses under overlap tolerance");
            return Ok(spline.clone());
        }

        let cleaned = remove_overlapping_control_points(spline, tolerance)?;
        let reparametrized = approximate_arc_length_parametrization(&cleaned)?;
        let cff = cumulative_feature_function(&reparametrized, config.feature_derivative)?;
        let knots = knot_distribution(&cff, config.degree, config.effective_resolution());
        let points = least_squares_approximation(&reparametrized, &knots, config.degree, config.subdivision)?;

        if points.len() >= spline.control_points().len() {
            tracing::debug!(
                before = spline.control_points().len(),
                after = points.len(),
                "refit kept, no reduction"
            );
            return Ok(spline.clone());
        }
        tracing::debug!(
            before = spline.control_points().len(),
            after = points.len(),
            potential = cff.total(),
            "automatic fitting reduced control points"
        );
        BSpline2::new(points, knots)
    }
}

/// Fits the curve with the knot at absolute index `knot_index` removed.
///
/// # Errors
///
/// Returns [`SplineError::IndexOutOfRange`] unless `knot_index` names an
/// interior knot, and `FittingError::SingularSystem` if the refit is
/// under-determined.
pub fn remove_a_single_knot(spline: &BSpline2, knot_index: usize) -> Result<BSpline2> {
    let degree = spline.degree();
    let len = spline.knots().len();
    if knot_index <= degree || knot_index >= len - degree - 1 {
        return Err(SplineError::IndexOutOfRange { index: knot_index, len }.into());
    }
    let mut knots = spline.knots().to_vec();
    knots.remove(knot_index);
    let points = least_squares_approximation(spline, &knots, degree, FittingConfig::default().subdivision)?;
    BSpline2::new(points, knots)
}
