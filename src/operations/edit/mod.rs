//! Edits of a host-owned curve collection.
//!
//! Every edit takes the current collection and returns the next one with
//! an `overwrite` flag telling the history whether the new state replaces
//! the current entry (continuous drags) or is appended (discrete edits).
//! Untouched curves share their geometry with the input collection.

mod create;
mod elevate_degree;
mod insert_knot;
mod move_control_point;
mod move_curve;
mod move_knot;
mod optimize_knots;
mod remove_knot;
mod set_curve;

pub use create::{create_curve, normalize_circle, InitialCurveKind, UpdateCurve};
pub use elevate_degree::ElevateDegree;
pub use insert_knot::InsertKnot;
pub use move_control_point::MoveControlPoint;
pub use move_curve::{MoveCurve, MoveCurves};
pub use move_knot::MoveKnot;
pub use optimize_knots::OptimizeKnots;
pub use remove_knot::RemoveKnot;
pub use set_curve::SetCurve;

use crate::error::{FittingError, KnotworkError, Result};
use crate::geometry::curve::Curve;

/// A new curve collection and how it enters the history.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveEdit {
    pub curves: Vec<Curve>,
    /// `true` replaces the current history entry, `false` appends.
    pub overwrite: bool,
}

/// Replaces the curve with `id` by `edit(curve)`.
///
/// Returns `Ok(None)` when no curve has that id.
pub(crate) fn replace_curve(
    curves: &[Curve],
    id: &str,
    overwrite: bool,
    edit: impl FnOnce(&Curve) -> Result<Curve>,
) -> Result<Option<CurveEdit>> {
    let Some(index) = curves.iter().position(|c| c.id() == id) else {
        tracing::debug!(id, "edit target not found");
        return Ok(None);
    };
    let replacement = edit(&curves[index])?;
    let mut next = curves.to_vec();
    next[index] = replacement;
    Ok(Some(CurveEdit {
        curves: next,
        overwrite,
    }))
}

/// Keeps `curve` when a refit fails on singular normal equations.
pub(crate) fn keep_on_singular(curve: &Curve, refit: Result<Curve>) -> Result<Curve> {
    match refit {
        Err(KnotworkError::Fitting(err @ FittingError::SingularSystem { .. })) => {
            tracing::warn!(id = curve.id(), %err, "refit failed, keeping previous curve");
            Ok(curve.clone())
        }
        other => other,
    }
}
