use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::operations::fitting::{AutomaticFitting, FittingConfig};

use super::{keep_on_singular, replace_curve, CurveEdit};

/// Replaces a freehand curve by its automatic refit.
///
/// Non-rational and rational curves are refitted (rational control points
/// carry unit weights); complex and Pythagorean-hodograph curves are
/// returned unchanged.
pub struct OptimizeKnots {
    id: String,
    config: FittingConfig,
    overwrite: bool,
}

impl OptimizeKnots {
    /// Creates a new `OptimizeKnots` edit that overwrites the current
    /// history entry.
    #[must_use]
    pub fn new(id: impl Into<String>, config: FittingConfig) -> Self {
        Self {
            id: id.into(),
            config,
            overwrite: true,
        }
    }

    /// Sets whether the result overwrites or is appended to the history.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Executes the edit.
    ///
    /// A singular refit keeps the previous curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has repeated interior knots or is
    /// malformed.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, self.overwrite, |curve| match curve {
            Curve::NonRational(_) | Curve::Rational(_) => {
                let spline = curve.to_bspline()?;
                let refit = AutomaticFitting::new(self.config)
                    .execute(&spline)
                    .map(|s| curve.with_bspline(&s));
                keep_on_singular(curve, refit)
            }
            Curve::Complex(_) | Curve::PythagoreanHodograph(_) => Ok(curve.clone()),
        })
    }
}
