//! Circular arcs through three points.
//!
//! Two constructions live here. The Grassmann form writes the arc as the
//! projection of a convex combination of two complex mass points, which is
//! how complex curves store arcs. The Euclidean form computes the
//! circumscribed circle for hosts that draw with center/radius primitives.

use crate::math::complex::{average_phi, cphi, to_complex, ComplexMassPoint};
use crate::math::{Complex, Point2, TOLERANCE};

/// Number of samples produced by [`arc_points_from_points`].
const ARC_SAMPLES: u32 = 100;

/// An arc from `z0` to `z1` passing through `q0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleArc {
    pub z0: Complex,
    pub z1: Complex,
    pub q0: Complex,
}

/// Sweep direction of an arc in a y-up coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Center-radius description of the circle through three points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircumscribedArc {
    pub center: Point2,
    pub radius: f64,
    /// Angle of the first point as seen from the center.
    pub start_angle: f64,
    /// Angle of the last point as seen from the center.
    pub end_angle: f64,
    pub winding: Winding,
}

/// Unit weight `e^{iφ}` of the second mass point for turning angle `φ`.
#[must_use]
pub fn w1_from_phi(phi: f64) -> Complex {
    Complex::from_polar(1.0, phi)
}

/// Weight of the second mass point of `arc`, relative to a unit first weight.
#[must_use]
pub fn w1_from_circle_arc(arc: &CircleArc) -> Complex {
    (arc.q0 - arc.z0) / (arc.z1 - arc.q0)
}

/// The two mass points `(z0, 1)` and `(z1·w1, w1)` spanning `arc`.
#[must_use]
pub fn complex_mass_points_from_circle_arc(arc: &CircleArc) -> (ComplexMassPoint, ComplexMassPoint) {
    let w0 = Complex::new(1.0, 0.0);
    let w1 = w1_from_circle_arc(arc);
    (
        ComplexMassPoint::from_point(arc.z0, w0),
        ComplexMassPoint::from_point(arc.z1, w1),
    )
}

/// Projects `(1 - u)·p0 + u·p1` for every parameter in `us`.
#[must_use]
pub fn arc_points(p0: ComplexMassPoint, p1: ComplexMassPoint, us: &[f64]) -> Vec<Complex> {
    us.iter()
        .map(|&u| (p0 * (1.0 - u) + p1 * u).project())
        .collect()
}

/// Arc midpoint (parameter 1/2) of the arc from `z0` to `z1` with turning
/// angle `phi`.
///
/// Undefined for `|phi| = π`, where the weights cancel.
#[must_use]
pub fn q0_from_phi(phi: f64, z0: Complex, z1: Complex) -> Complex {
    let w1 = w1_from_phi(phi);
    (ComplexMassPoint::from_point(z0, Complex::new(1.0, 0.0)) + ComplexMassPoint::from_point(z1, w1))
        .project()
}

/// Samples the arc best matching a sketched point sequence.
///
/// The arc runs from the first to the last point with the mean turning
/// angle of the interior points.
#[must_use]
pub fn arc_points_from_points(points: &[Complex]) -> Vec<Complex> {
    let (Some(&z0), Some(&z1)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let q0 = q0_from_phi(average_phi(points), z0, z1);
    let (p0, p1) = complex_mass_points_from_circle_arc(&CircleArc { z0, z1, q0 });
    let us: Vec<f64> = (0..=ARC_SAMPLES)
        .map(|i| f64::from(i) / f64::from(ARC_SAMPLES))
        .collect();
    arc_points(p0, p1, &us)
}

/// Circle through three points, or `None` if they are collinear.
///
/// The winding follows the turning angle at `p2` (negative is clockwise),
/// so a y-down canvas draws a [`Winding::Clockwise`] arc with its
/// counterclockwise flag set.
#[must_use]
pub fn circle_arc_from_three_points(p0: &Point2, p1: &Point2, p2: &Point2) -> Option<CircumscribedArc> {
    let a = p0.x * (p1.y - p2.y) - p0.y * (p1.x - p2.x) + p1.x * p2.y - p2.x * p1.y;
    if a.abs() < TOLERANCE {
        return None;
    }
    let t0 = p0.x * p0.x + p0.y * p0.y;
    let t1 = p1.x * p1.x + p1.y * p1.y;
    let t2 = p2.x * p2.x + p2.y * p2.y;
    let b = t0 * (p2.y - p1.y) + t1 * (p0.y - p2.y) + t2 * (p1.y - p0.y);
    let c = t0 * (p1.x - p2.x) + t1 * (p2.x - p0.x) + t2 * (p0.x - p1.x);
    let d = t0 * (p2.x * p1.y - p1.x * p2.y)
        + t1 * (p0.x * p2.y - p2.x * p0.y)
        + t2 * (p1.x * p0.y - p0.x * p1.y);

    let center = Point2::new(-b / (2.0 * a), -c / (2.0 * a));
    let radius = ((b * b + c * c - 4.0 * a * d) / (4.0 * a * a)).sqrt();
    let phi = cphi(to_complex(p0), to_complex(p1), to_complex(p2));
    let winding = if phi < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    };
    Some(CircumscribedArc {
        center,
        radius,
        start_angle: (p0.y - center.y).atan2(p0.x - center.x),
        end_angle: (p2.y - center.y).atan2(p2.x - center.x),
        winding,
    })
}
