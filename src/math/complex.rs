//! Complex-plane helpers and the homogeneous complex mass point.
//!
//! Planar points are complex numbers `x + iy`. A [`ComplexMassPoint`] carries
//! a complex weight `m` next to the weighted point `m·z`; two mass points that
//! differ by a complex factor describe the same affine point.

use std::ops::{Add, Mul, Neg, Sub};

use super::{Complex, Point2};

/// Chords shorter than this make the signed angle [`cphi`] undefined.
pub const CHORD_EPSILON: f64 = 1e-7;

/// Converts a planar point to a complex number.
#[must_use]
pub fn to_complex(p: &Point2) -> Complex {
    Complex::new(p.x, p.y)
}

/// Argument of `z` normalized to `[0, 2π)`.
#[must_use]
pub fn carg(z: Complex) -> f64 {
    let angle = z.im.atan2(z.re);
    if angle >= 0.0 {
        angle
    } else {
        angle + std::f64::consts::TAU
    }
}

/// Signed turning angle of the two chords `z0 → q0` and `q0 → z1`.
///
/// Used as the angle parameter of a complex rational Bézier arc through
/// `z0`, `q0` and `z1`. Returns 0 when either chord is degenerate.
#[must_use]
pub fn cphi(z0: Complex, z1: Complex, q0: Complex) -> f64 {
    let v0 = q0 - z0;
    let v1 = z1 - q0;
    if v0.norm() < CHORD_EPSILON || v1.norm() < CHORD_EPSILON {
        return 0.0;
    }
    let cross = v0.re * v1.im - v0.im * v1.re;
    let dot = v0.re * v1.re + v0.im * v1.im;
    -cross.atan2(dot)
}

/// Mean [`cphi`] of the interior points against the first and last point.
///
/// Interior points coinciding with an end point carry no angle and are
/// skipped. Returns 0 when no interior point remains.
#[must_use]
pub fn average_phi(points: &[Complex]) -> f64 {
    let (Some(&z0), Some(&z1)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let interior = points.get(1..points.len() - 1).unwrap_or_default();
    let (sum, count) = interior
        .iter()
        .filter(|&&q| (q - z0).norm() >= CHORD_EPSILON && (z1 - q).norm() >= CHORD_EPSILON)
        .fold((0.0, 0_u32), |(sum, count), &q| (sum + cphi(z0, z1, q), count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Homogeneous point `(m·z, m)` with a complex weight `m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexMassPoint {
    /// Weighted point `m·z`.
    pub weighted: Complex,
    /// Complex weight `m`.
    pub weight: Complex,
}

impl ComplexMassPoint {
    /// Creates a mass point from its raw homogeneous coordinates.
    #[must_use]
    pub fn new(weighted: Complex, weight: Complex) -> Self {
        Self { weighted, weight }
    }

    /// Lifts the affine point `z` with weight `weight`.
    #[must_use]
    pub fn from_point(z: Complex, weight: Complex) -> Self {
        Self {
            weighted: z * weight,
            weight,
        }
    }

    /// The zero mass point (not a valid affine point).
    #[must_use]
    pub fn zero() -> Self {
        Self::new(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0))
    }

    /// Projects to the affine point `weighted / weight`.
    #[must_use]
    pub fn project(&self) -> Complex {
        self.weighted / self.weight
    }

    /// Translates the represented affine point by `v`, keeping the weight.
    #[must_use]
    pub fn translate(&self, v: Complex) -> Self {
        Self::new(self.weighted + v * self.weight, self.weight)
    }
}

impl Add for ComplexMassPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.weighted + rhs.weighted, self.weight + rhs.weight)
    }
}

impl Sub for ComplexMassPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.weighted - rhs.weighted, self.weight - rhs.weight)
    }
}

impl Neg for ComplexMassPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.weighted, -self.weight)
    }
}

impl Mul<f64> for ComplexMassPoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.weighted * rhs, self.weight * rhs)
    }
}

impl Mul<Complex> for ComplexMassPoint {
    type Output = Self;

    fn mul(self, rhs: Complex) -> Self {
        Self::new(self.weighted * rhs, self.weight * rhs)
    }
}
