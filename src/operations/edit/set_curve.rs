use crate::geometry::curve::Curve;

use super::CurveEdit;

/// Replaces the curve with `id` by a new version, for example a normalized
/// arc once the stroke is released.
pub struct SetCurve {
    id: String,
    curve: Curve,
}

impl SetCurve {
    /// Creates a new `SetCurve` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, curve: Curve) -> Self {
        Self { id: id.into(), curve }
    }

    /// Executes the edit; the result overwrites the current history entry.
    #[must_use]
    pub fn execute(&self, curves: &[Curve]) -> Option<CurveEdit> {
        let index = curves.iter().position(|c| c.id() == self.id)?;
        let mut next = curves.to_vec();
        next[index] = self.curve.clone();
        Some(CurveEdit {
            curves: next,
            overwrite: true,
        })
    }
}
