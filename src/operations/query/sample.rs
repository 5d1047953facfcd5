use crate::error::Result;
use crate::geometry::curve::{Coordinates, Curve};

/// Evaluates `curve` at parameter `u`.
///
/// Complex curves are evaluated through their rational form.
///
/// # Errors
///
/// Returns an error if the stored points and knots do not form a valid
/// curve.
pub fn point_on_curve(curve: &Curve, u: f64) -> Result<Coordinates> {
    match curve {
        Curve::NonRational(_) | Curve::Rational(_) | Curve::PythagoreanHodograph(_) => {
            Ok(curve.to_bspline()?.evaluate(u).into())
        }
        Curve::Complex(_) => Ok(curve.to_rational()?.evaluate(u).into()),
    }
}

/// Samples `count` points at evenly spaced parameters over the domain.
///
/// # Errors
///
/// Returns an error if the stored points and knots do not form a valid
/// curve.
pub fn points_on_curve(curve: &Curve, count: usize) -> Result<Vec<Coordinates>> {
    match curve {
        Curve::NonRational(_) | Curve::Rational(_) | Curve::PythagoreanHodograph(_) => Ok(curve
            .to_bspline()?
            .sample(count)
            .into_iter()
            .map(Coordinates::from)
            .collect()),
        Curve::Complex(_) => Ok(curve
            .to_rational()?
            .sample(count)
            .into_iter()
            .map(Coordinates::from)
            .collect()),
    }
}
