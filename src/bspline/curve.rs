use crate::error::{Result, SplineError};

use super::basis::basis_functions;
use super::elevate::elevate_degree_once;
use super::knots::{distinct_knots, find_span, is_clamped, knot_multiplicity};
use super::ControlPoint;

/// A non-rational B-spline curve.
///
/// The degree is derived from the knot and control point counts and is never
/// stored independently of them. All editing operations return a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline<P> {
    control_points: Vec<P>,
    knots: Vec<f64>,
    degree: usize,
}

impl<P: ControlPoint> BSpline<P> {
    /// Creates a B-spline from its control points and knot vector.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::NegativeDegree`] if there are not enough knots
    /// for the control points, and [`SplineError::InvalidSpline`] if there are
    /// no control points or the knots are not finite and non-decreasing.
    pub fn new(control_points: Vec<P>, knots: Vec<f64>) -> Result<Self> {
        if control_points.is_empty() {
            return Err(SplineError::InvalidSpline("a B-spline needs at least one control point".into()).into());
        }
        if knots.len() < control_points.len() + 1 {
            return Err(SplineError::NegativeDegree {
                knots: knots.len(),
                control_points: control_points.len(),
            }
            .into());
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(SplineError::InvalidSpline("knots must be finite".into()).into());
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(SplineError::InvalidSpline("knots must be non-decreasing".into()).into());
        }
        let degree = knots.len() - control_points.len() - 1;
        Ok(Self {
            control_points,
            knots,
            degree,
        })
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[P] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the knot values without repetition.
    #[must_use]
    pub fn distinct_knots(&self) -> Vec<f64> {
        distinct_knots(&self.knots)
    }

    /// Evaluates the curve at `u`.
    ///
    /// `u` is expected to lie in `[knots[degree], knots[len - degree - 1]]`.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> P {
        let span = find_span(u, &self.knots, self.degree);
        let basis = basis_functions(span, u, &self.knots, self.degree);
        let first = span - self.degree;
        basis
            .iter()
            .zip(&self.control_points[first..=span])
            .fold(P::zero(), |acc, (&b, &p)| acc + p * b)
    }

    /// Number of knots equal to `knots[span_index]`, walking left from it.
    #[must_use]
    pub fn knot_multiplicity(&self, span_index: usize) -> usize {
        knot_multiplicity(&self.knots, span_index)
    }

    /// Inserts the knot `u` `times` times without changing the curve shape.
    ///
    /// Boehm's algorithm (Piegl & Tiller, p. 151).
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::InvalidKnotInsertion`] if `u` is not strictly
    /// inside the parameter domain or the resulting multiplicity would
    /// exceed the degree.
    #[allow(clippy::float_cmp)]
    pub fn insert_knot(&self, u: f64, times: usize) -> Result<Self> {
        if times == 0 {
            return Ok(self.clone());
        }
        let p = self.degree;
        let last = self.knots.len() - p - 1;
        if !(u > self.knots[p] && u < self.knots[last]) {
            return Err(SplineError::InvalidKnotInsertion {
                u,
                reason: "parameter is outside the open domain",
            }
            .into());
        }

        let mut index = find_span(u, &self.knots, p);
        let mut multiplicity = if self.knots[index] == u {
            self.knot_multiplicity(index)
        } else {
            0
        };
        if multiplicity + times > p {
            return Err(SplineError::InvalidKnotInsertion {
                u,
                reason: "multiplicity would exceed the degree",
            }
            .into());
        }

        let mut points = self.control_points.clone();
        let mut knots = self.knots.clone();
        for _ in 0..times {
            let mut next = Vec::with_capacity(points.len() + 1);
            next.extend_from_slice(&points[..=index - p]);
            for i in index - p + 1..=index - multiplicity {
                let alpha = (u - knots[i]) / (knots[i + p] - knots[i]);
                next.push(points[i - 1] * (1.0 - alpha) + points[i] * alpha);
            }
            next.extend_from_slice(&points[index - multiplicity..]);
            knots.insert(index + 1, u);
            points = next;
            multiplicity += 1;
            index += 1;
        }
        Self::new(points, knots)
    }

    /// Returns a copy with control point `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] if `index` is not a control
    /// point index.
    pub fn set_control_point_position(&self, index: usize, value: P) -> Result<Self> {
        if index >= self.control_points.len() {
            return Err(SplineError::IndexOutOfRange {
                index,
                len: self.control_points.len(),
            }
            .into());
        }
        let mut points = self.control_points.clone();
        points[index] = value;
        Ok(Self {
            control_points: points,
            knots: self.knots.clone(),
            degree: self.degree,
        })
    }

    /// Raises the degree by one without changing the curve shape.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::InvalidSpline`] if the knot vector is not
    /// clamped, or if any knot is repeated more than `degree + 1` times at
    /// an end or more than `degree` times inside the domain.
    #[allow(clippy::float_cmp)]
    pub fn elevate_degree(&self) -> Result<Self> {
        if !is_clamped(&self.knots, self.degree) {
            return Err(SplineError::InvalidSpline(
                "degree elevation requires a clamped knot vector".into(),
            )
            .into());
        }
        // Degree + 1 equal knots away from the ends split the curve into
        // disconnected pieces.
        let p = self.degree;
        let inner = &self.knots[1..self.knots.len() - 1];
        if p > 0 && inner.windows(p + 1).any(|w| w[0] == w[p]) {
            return Err(SplineError::InvalidSpline(
                "degree elevation requires knot multiplicities of at most the degree".into(),
            )
            .into());
        }
        let (points, knots) = elevate_degree_once(&self.control_points, &self.knots, self.degree);
        Self::new(points, knots)
    }

    /// Returns the derivative curve, of degree `degree - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::NegativeDegree`] for a degree 0 curve.
    pub fn derivative(&self) -> Result<Self> {
        let p = self.degree;
        if p == 0 {
            return Err(SplineError::NegativeDegree {
                knots: self.knots.len() - 2,
                control_points: self.control_points.len(),
            }
            .into());
        }
        let knots = self.knots[1..self.knots.len() - 1].to_vec();
        if self.control_points.len() == 1 {
            return Self::new(vec![P::zero()], knots);
        }
        #[allow(clippy::cast_precision_loss)]
        let factor = p as f64;
        let points = self
            .control_points
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let span = self.knots[i + p + 1] - self.knots[i + 1];
                if span > 0.0 {
                    (w[1] - w[0]) * (factor / span)
                } else {
                    P::zero()
                }
            })
            .collect();
        Self::new(points, knots)
    }

    /// Samples `count` points at evenly spaced parameters over the domain.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<P> {
        let (start, end) = self.domain();
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate(start)],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let last = (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let t = i as f64 / last;
                        self.evaluate(start + (end - start) * t)
                    })
                    .collect()
            }
        }
    }

    /// Parameter domain `[knots[degree], knots[len - degree - 1]]`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - self.degree - 1],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KnotworkError;
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn cubic() -> BSpline<Vector2> {
        BSpline::new(
            vec![
                v(0.0, 0.0),
                v(1.0, 2.0),
                v(2.5, 2.5),
                v(4.0, -1.0),
                v(5.0, 0.5),
                v(6.0, 3.0),
                v(7.5, 1.0),
            ],
            vec![0.0, 0.0, 0.0, 0.0, 0.2, 0.45, 0.7, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    fn assert_same_shape(a: &BSpline<Vector2>, b: &BSpline<Vector2>) {
        for i in 0..=400 {
            let u = f64::from(i) / 400.0;
            assert_abs_diff_eq!((a.evaluate(u) - b.evaluate(u)).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn degree_is_derived() {
        assert_eq!(cubic().degree(), 3);
    }

    #[test]
    fn negative_degree_is_rejected() {
        let err = BSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            KnotworkError::Spline(SplineError::NegativeDegree { knots: 3, control_points: 3 })
        ));
    }

    #[test]
    fn decreasing_knots_are_rejected() {
        let err = BSpline::new(vec![0.0, 1.0], vec![0.0, 0.0, 1.0, 0.5]).unwrap_err();
        assert!(matches!(err, KnotworkError::Spline(SplineError::InvalidSpline(_))));
    }

    #[test]
    fn elevation_rejects_a_disconnected_knot_vector() {
        let s = BSpline::new(
            vec![v(0.0, 0.0), v(1.0, 2.0), v(2.0, 0.0), v(3.0, 1.0), v(4.0, 2.0), v(5.0, 0.0)],
            vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0],
        )
        .unwrap();
        assert!(matches!(
            s.elevate_degree(),
            Err(KnotworkError::Spline(SplineError::InvalidSpline(_)))
        ));
    }

    #[test]
    fn elevation_accepts_interior_multiplicity_equal_to_the_degree() {
        let s = BSpline::new(
            vec![v(0.0, 0.0), v(1.0, 2.0), v(2.0, 0.0), v(3.0, 1.0), v(4.0, 2.0)],
            vec![0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let elevated = s.elevate_degree().unwrap();
        assert_eq!(elevated.degree(), 3);
        assert_same_shape(&s, &elevated);
    }

    #[test]
    fn clamped_curve_interpolates_end_points() {
        let s = cubic();
        assert_abs_diff_eq!((s.evaluate(0.0) - v(0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!((s.evaluate(1.0) - v(7.5, 1.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn knot_insertion_keeps_shape() {
        let s = cubic();
        for &u in &[0.1, 0.2, 0.33, 0.45, 0.9] {
            let inserted = s.insert_knot(u, 1).unwrap();
            assert_eq!(inserted.control_points().len(), s.control_points().len() + 1);
            assert_eq!(inserted.knots().len(), s.knots().len() + 1);
            assert_eq!(inserted.degree(), 3);
            assert_same_shape(&s, &inserted);
        }
    }

    #[test]
    fn repeated_insertion_keeps_shape() {
        let s = cubic();
        let inserted = s.insert_knot(0.6, 3).unwrap();
        assert_eq!(inserted.knot_multiplicity(find_span(0.6, inserted.knots(), 3)), 3);
        assert_same_shape(&s, &inserted);
        let again = s.insert_knot(0.45, 2).unwrap();
        assert_same_shape(&s, &again);
    }

    #[test]
    fn insertion_beyond_degree_fails() {
        let s = cubic();
        assert!(s.insert_knot(0.45, 3).is_err());
        assert!(s.insert_knot(0.0, 1).is_err());
        assert!(s.insert_knot(1.0, 1).is_err());
    }

    #[test]
    fn zero_insertions_is_identity() {
        let s = cubic();
        assert_eq!(s.insert_knot(0.5, 0).unwrap(), s);
    }

    #[test]
    fn set_control_point_replaces_one_point() {
        let s = cubic();
        let moved = s.set_control_point_position(2, v(9.0, 9.0)).unwrap();
        assert_eq!(moved.control_points()[2], v(9.0, 9.0));
        assert_eq!(moved.knots(), s.knots());
        assert!(s.set_control_point_position(7, v(0.0, 0.0)).is_err());
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let s = cubic();
        let d = s.derivative().unwrap();
        assert_eq!(d.degree(), 2);
        let h = 1e-6;
        for &u in &[0.1, 0.3, 0.55, 0.8] {
            let fd = (s.evaluate(u + h) - s.evaluate(u - h)) / (2.0 * h);
            assert_abs_diff_eq!((d.evaluate(u) - fd).norm(), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn derivative_of_degree_zero_fails() {
        let s = BSpline::new(vec![1.0], vec![0.0, 1.0]).unwrap();
        assert!(s.derivative().is_err());
    }

    #[test]
    fn sample_spans_domain() {
        let s = cubic();
        let pts = s.sample(5);
        assert_eq!(pts.len(), 5);
        assert_abs_diff_eq!((pts[4] - v(7.5, 1.0)).norm(), 0.0, epsilon = 1e-12);
    }
}
