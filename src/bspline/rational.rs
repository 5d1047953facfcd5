use crate::error::{Result, SplineError};
use crate::math::complex::{ComplexMassPoint, CHORD_EPSILON};
use crate::math::Complex;

use super::knots::greville_abscissae;
use super::BSpline;

/// A planar rational B-spline with complex homogeneous control points.
///
/// Each control point is a [`ComplexMassPoint`] `(w·z, w)` with a complex
/// weight `w`; the curve point is the quotient of the blended numerator and
/// blended weight. With complex weights a degree one segment is already a
/// circular arc (a real rational quadratic), built from its turning angle.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalBSpline {
    spline: BSpline<ComplexMassPoint>,
}

impl RationalBSpline {
    /// Creates a rational B-spline from homogeneous control points.
    ///
    /// # Errors
    ///
    /// Returns an error if the knot and control point counts are inconsistent.
    pub fn new(control_points: Vec<ComplexMassPoint>, knots: Vec<f64>) -> Result<Self> {
        Ok(Self {
            spline: BSpline::new(control_points, knots)?,
        })
    }

    /// Builds the curve from the interleaved layout `z0, q0, z1, …, zn`.
    ///
    /// The on-curve points `z` become the affine control points; each
    /// intermediate point `q` fixes the weight ratio of its neighbours:
    /// `w(i+1) = w(i)·(q(i) − z(i)) / (z(i+1) − q(i))` with `w0 = 1`. A
    /// degenerate chord keeps the weight ratio at 1.
    ///
    /// # Errors
    ///
    /// Returns an error for an even number of points or inconsistent knots.
    pub fn from_interleaved(points: &[Complex], knots: Vec<f64>) -> Result<Self> {
        if points.len() % 2 == 0 {
            return Err(SplineError::InvalidSpline(format!(
                "interleaved complex layout needs an odd number of points, got {}",
                points.len()
            ))
            .into());
        }
        let mut weight = Complex::new(1.0, 0.0);
        let mut control_points = Vec::with_capacity(points.len() / 2 + 1);
        control_points.push(ComplexMassPoint::from_point(points[0], weight));
        for pair in points[1..].chunks_exact(2) {
            let z = points[control_points.len() * 2 - 2];
            let (q, z_next) = (pair[0], pair[1]);
            let incoming = q - z;
            let outgoing = z_next - q;
            if incoming.norm() >= CHORD_EPSILON && outgoing.norm() >= CHORD_EPSILON {
                weight *= incoming / outgoing;
            }
            control_points.push(ComplexMassPoint::from_point(z_next, weight));
        }
        Self::new(control_points, knots)
    }

    /// Converts back to the interleaved layout `z0, q0, z1, …, zn`.
    ///
    /// `q(i)` is the projection of the sum of neighbouring mass points.
    #[must_use]
    pub fn to_interleaved(&self) -> Vec<Complex> {
        let cps = self.spline.control_points();
        let mut result = Vec::with_capacity(cps.len() * 2 - 1);
        result.push(cps[0].project());
        for w in cps.windows(2) {
            result.push((w[0] + w[1]).project());
            result.push(w[1].project());
        }
        result
    }

    /// Returns the homogeneous control points.
    #[must_use]
    pub fn control_points(&self) -> &[ComplexMassPoint] {
        self.spline.control_points()
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        self.spline.knots()
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.spline.degree()
    }

    /// Parameter domain of the curve.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.spline.domain()
    }

    /// Returns the knot values without repetition.
    #[must_use]
    pub fn distinct_knots(&self) -> Vec<f64> {
        self.spline.distinct_knots()
    }

    /// Evaluates the affine curve point at `u`.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> Complex {
        self.spline.evaluate(u).project()
    }

    /// Samples `count` affine points evenly spaced in parameter.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<Complex> {
        self.spline
            .sample(count)
            .into_iter()
            .map(|p| p.project())
            .collect()
    }

    /// Affine positions of the control points.
    #[must_use]
    pub fn affine_control_points(&self) -> Vec<Complex> {
        self.control_points().iter().map(ComplexMassPoint::project).collect()
    }

    /// Weight of control point `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn control_point_weight(&self, index: usize) -> Result<Complex> {
        self.control_points()
            .get(index)
            .map(|p| p.weight)
            .ok_or_else(|| {
                SplineError::IndexOutOfRange {
                    index,
                    len: self.control_points().len(),
                }
                .into()
            })
    }

    /// Returns a copy with control point `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_control_point_position(&self, index: usize, value: ComplexMassPoint) -> Result<Self> {
        Ok(Self {
            spline: self.spline.set_control_point_position(index, value)?,
        })
    }

    /// Returns a copy where control point `index` has weight `weight` and the
    /// same affine position.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_control_point_weight(&self, index: usize, weight: Complex) -> Result<Self> {
        let current = self.control_points().get(index).ok_or(SplineError::IndexOutOfRange {
            index,
            len: self.control_points().len(),
        })?;
        let reweighted = ComplexMassPoint::new(current.weighted * weight / current.weight, weight);
        self.set_control_point_position(index, reweighted)
    }

    /// Inserts the knot `u` `times` times without changing the shape.
    ///
    /// # Errors
    ///
    /// See [`BSpline::insert_knot`].
    pub fn insert_knot(&self, u: f64, times: usize) -> Result<Self> {
        Ok(Self {
            spline: self.spline.insert_knot(u, times)?,
        })
    }

    /// Raises the degree by one.
    ///
    /// Numerator and weight channels are elevated as independent complex
    /// B-splines and recombined.
    ///
    /// # Errors
    ///
    /// Returns an error if the knot vector is not clamped.
    pub fn elevate_degree(&self) -> Result<Self> {
        let knots = self.knots().to_vec();
        let numerators = BSpline::new(
            self.control_points().iter().map(|p| p.weighted).collect(),
            knots.clone(),
        )?
        .elevate_degree()?;
        let weights = BSpline::new(
            self.control_points().iter().map(|p| p.weight).collect(),
            knots,
        )?
        .elevate_degree()?;
        let control_points = numerators
            .control_points()
            .iter()
            .zip(weights.control_points())
            .map(|(&n, &w)| ComplexMassPoint::new(n, w))
            .collect();
        Self::new(control_points, numerators.knots().to_vec())
    }

    /// Greville abscissae of the control points.
    #[must_use]
    pub fn greville_abscissae(&self) -> Vec<f64> {
        greville_abscissae(self.knots(), self.degree())
    }
}
