use crate::geometry::curve::Curve;
use crate::math::Vector2;

use super::CurveEdit;

fn translated(curve: &Curve, displacement: &Vector2) -> Curve {
    match curve {
        // Complex weights are ratios of chords, so translating the
        // interleaved points keeps them.
        Curve::NonRational(data)
        | Curve::Rational(data)
        | Curve::Complex(data)
        | Curve::PythagoreanHodograph(data) => {
            let points = data.points().iter().map(|p| p.translate(displacement)).collect();
            curve.with_data(data.with_points(points))
        }
    }
}

/// Translates one curve.
pub struct MoveCurve {
    id: String,
    displacement: Vector2,
}

impl MoveCurve {
    /// Creates a new `MoveCurve` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, displacement: Vector2) -> Self {
        Self {
            id: id.into(),
            displacement,
        }
    }

    /// Executes the edit; the result overwrites the current history entry.
    #[must_use]
    pub fn execute(&self, curves: &[Curve]) -> Option<CurveEdit> {
        let index = curves.iter().position(|c| c.id() == self.id)?;
        let mut next = curves.to_vec();
        next[index] = translated(&curves[index], &self.displacement);
        Some(CurveEdit {
            curves: next,
            overwrite: true,
        })
    }
}

/// Translates a selection of curves by the same displacement.
pub struct MoveCurves {
    ids: Vec<String>,
    displacement: Vector2,
}

impl MoveCurves {
    /// Creates a new `MoveCurves` edit.
    #[must_use]
    pub fn new(ids: Vec<String>, displacement: Vector2) -> Self {
        Self { ids, displacement }
    }

    /// Executes the edit; the result overwrites the current history entry.
    ///
    /// Unknown ids are skipped. Returns `None` if no id matched.
    #[must_use]
    pub fn execute(&self, curves: &[Curve]) -> Option<CurveEdit> {
        let mut moved = 0;
        let next: Vec<Curve> = curves
            .iter()
            .map(|curve| {
                if self.ids.iter().any(|id| id == curve.id()) {
                    moved += 1;
                    translated(curve, &self.displacement)
                } else {
                    curve.clone()
                }
            })
            .collect();
        (moved > 0).then_some(CurveEdit {
            curves: next,
            overwrite: true,
        })
    }
}
