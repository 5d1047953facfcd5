use crate::bspline::uniform_knots;
use crate::error::Result;
use crate::geometry::circle_arc::q0_from_phi;
use crate::geometry::curve::{Coordinates, Curve, CurveData};
use crate::math::complex::average_phi;
use crate::math::Complex;

use super::{replace_curve, CurveEdit};

/// Highest degree a freehand stroke reaches while it is drawn.
const MAX_FREEHAND_DEGREE: usize = 5;

/// Tool that started a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialCurveKind {
    Freehand,
    Linear,
    CircleArc,
}

/// Creates the initial curve of a stroke started at `(x0, y0)`.
///
/// Freehand strokes start as a single degree 0 point, lines as a degenerate
/// segment and arcs as three coincident points awaiting their knots.
#[must_use]
pub fn create_curve(kind: InitialCurveKind, id: impl Into<String>, x0: f64, y0: f64) -> Curve {
    let id: String = id.into();
    let start = Coordinates::new(x0, y0);
    match kind {
        InitialCurveKind::Freehand => Curve::NonRational(CurveData::new(id, vec![start], vec![0.0, 1.0])),
        InitialCurveKind::Linear => {
            Curve::NonRational(CurveData::new(id, vec![start; 2], vec![0.0, 0.0, 1.0, 1.0]))
        }
        InitialCurveKind::CircleArc => Curve::Complex(CurveData::new(id, vec![start; 3], Vec::new())),
    }
}

/// Grows a stroke with the latest pointer position.
pub struct UpdateCurve {
    id: String,
    point: Coordinates,
    kind: InitialCurveKind,
}

impl UpdateCurve {
    /// Creates a new `UpdateCurve` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, point: Coordinates, kind: InitialCurveKind) -> Self {
        Self {
            id: id.into(),
            point,
            kind,
        }
    }

    /// Executes the edit; the result overwrites the current history entry.
    ///
    /// Freehand strokes append the point and re-knot uniformly, raising the
    /// degree with the point count up to a cap. Lines move their end point.
    /// Arcs append the point to the sketch later collapsed by
    /// [`normalize_circle`].
    ///
    /// # Errors
    ///
    /// Returns an error if the stored curve cannot carry the new knots.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, true, |curve| {
            let data = curve.data();
            let mut points = data.points().to_vec();
            let next = match self.kind {
                InitialCurveKind::Freehand => {
                    let degree = points.len().min(MAX_FREEHAND_DEGREE);
                    points.push(self.point);
                    let knots = uniform_knots(degree, points.len())?;
                    data.with_geometry(points, knots)
                }
                InitialCurveKind::Linear => {
                    match points.get_mut(1) {
                        Some(end) => *end = self.point,
                        None => points.push(self.point),
                    }
                    data.with_points(points)
                }
                InitialCurveKind::CircleArc => {
                    points.push(self.point);
                    data.with_points(points)
                }
            };
            Ok(curve.with_data(next))
        })
    }
}

/// Collapses a sketched arc to its three defining points `z0, q0, z1` with
/// knots `[0, 0, 1, 1]`.
///
/// One point is repeated three times, two points gain their midpoint, and
/// longer sketches keep their end points with the tangent point of the
/// mean turning angle. Non-complex curves and sketches without points are
/// returned unchanged.
#[must_use]
pub fn normalize_circle(curve: &Curve) -> Curve {
    match curve {
        Curve::Complex(data) => {
            let points = data.points();
            let normalized = match points {
                [] => return curve.clone(),
                [p] => vec![*p; 3],
                [p0, p1] => vec![*p0, p0.midpoint(p1), *p1],
                [_, _, _] => points.to_vec(),
                [z0, .., z1] => {
                    let sketch: Vec<Complex> = points.iter().map(|&p| Complex::from(p)).collect();
                    let q0 = q0_from_phi(average_phi(&sketch), Complex::from(*z0), Complex::from(*z1));
                    vec![*z0, Coordinates::from(q0), *z1]
                }
            };
            curve.with_data(data.with_geometry(normalized, vec![0.0, 0.0, 1.0, 1.0]))
        }
        Curve::NonRational(_) | Curve::Rational(_) | Curve::PythagoreanHodograph(_) => curve.clone(),
    }
}
