//! Host-facing curve values.
//!
//! A [`Curve`] is an immutable tagged value carrying an id, persisted points
//! and a knot vector. Points and knots are shared slices, so cloning a curve
//! collection to produce the next undo state only copies pointers.

mod persisted;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use persisted::PersistedCurve;

use crate::bspline::{BSpline2, RationalBSpline};
use crate::error::{PersistError, Result, SplineError};
use crate::math::{Complex, Point2, Vector2};

/// Curve variants with their stable persisted ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    NonRational = 0,
    Rational = 1,
    Complex = 2,
    PythagoreanHodograph = 3,
}

impl CurveKind {
    /// Persisted ordinal of this kind.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Parses a persisted ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::UnknownCurveType`] for unknown ordinals.
    pub fn from_ordinal(ordinal: u8) -> std::result::Result<Self, PersistError> {
        match ordinal {
            0 => Ok(Self::NonRational),
            1 => Ok(Self::Rational),
            2 => Ok(Self::Complex),
            3 => Ok(Self::PythagoreanHodograph),
            other => Err(PersistError::UnknownCurveType(other)),
        }
    }
}

/// A persisted planar point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint of two coordinates.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Translates by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl From<Vector2> for Coordinates {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Coordinates> for Vector2 {
    fn from(c: Coordinates) -> Self {
        Vector2::new(c.x, c.y)
    }
}

impl From<Point2> for Coordinates {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Coordinates> for Point2 {
    fn from(c: Coordinates) -> Self {
        Point2::new(c.x, c.y)
    }
}

impl From<Complex> for Coordinates {
    fn from(z: Complex) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Coordinates> for Complex {
    fn from(c: Coordinates) -> Self {
        Complex::new(c.x, c.y)
    }
}

/// Id, points and knots shared by every curve variant.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    id: Arc<str>,
    points: Arc<[Coordinates]>,
    knots: Arc<[f64]>,
}

impl CurveData {
    /// Creates curve data; the degree is derived from the counts on use.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>, points: Vec<Coordinates>, knots: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            points: points.into(),
            knots: knots.into(),
        }
    }

    /// Host-assigned curve id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Persisted points; their meaning depends on the curve variant.
    #[must_use]
    pub fn points(&self) -> &[Coordinates] {
        &self.points
    }

    /// Knot vector, empty for an unnormalized arc sketch.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Copy with new points; id and knots are shared.
    #[must_use]
    pub fn with_points(&self, points: Vec<Coordinates>) -> Self {
        Self {
            id: Arc::clone(&self.id),
            points: points.into(),
            knots: Arc::clone(&self.knots),
        }
    }

    /// Copy with new knots; id and points are shared.
    #[must_use]
    pub fn with_knots(&self, knots: Vec<f64>) -> Self {
        Self {
            id: Arc::clone(&self.id),
            points: Arc::clone(&self.points),
            knots: knots.into(),
        }
    }

    /// Copy with new points and knots, keeping the id.
    #[must_use]
    pub fn with_geometry(&self, points: Vec<Coordinates>, knots: Vec<f64>) -> Self {
        Self {
            id: Arc::clone(&self.id),
            points: points.into(),
            knots: knots.into(),
        }
    }
}

/// A curve owned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedCurve", into = "PersistedCurve")]
pub enum Curve {
    /// Polynomial B-spline; points are the control points.
    NonRational(CurveData),
    /// Rational B-spline with unit weights; points are the control points.
    Rational(CurveData),
    /// Complex rational B-spline in the interleaved `z0, q0, z1, …` layout.
    Complex(CurveData),
    /// Pythagorean-hodograph curve; points are the control points.
    PythagoreanHodograph(CurveData),
}

impl Curve {
    /// Wraps `data` in the variant for `kind`.
    #[must_use]
    pub fn from_kind(kind: CurveKind, data: CurveData) -> Self {
        match kind {
            CurveKind::NonRational => Self::NonRational(data),
            CurveKind::Rational => Self::Rational(data),
            CurveKind::Complex => Self::Complex(data),
            CurveKind::PythagoreanHodograph => Self::PythagoreanHodograph(data),
        }
    }

    /// Variant tag of this curve.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        match self {
            Self::NonRational(_) => CurveKind::NonRational,
            Self::Rational(_) => CurveKind::Rational,
            Self::Complex(_) => CurveKind::Complex,
            Self::PythagoreanHodograph(_) => CurveKind::PythagoreanHodograph,
        }
    }

    /// Data shared by every variant.
    #[must_use]
    pub fn data(&self) -> &CurveData {
        match self {
            Self::NonRational(data)
            | Self::Rational(data)
            | Self::Complex(data)
            | Self::PythagoreanHodograph(data) => data,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.data().id()
    }

    #[must_use]
    pub fn points(&self) -> &[Coordinates] {
        self.data().points()
    }

    #[must_use]
    pub fn knots(&self) -> &[f64] {
        self.data().knots()
    }

    /// Same variant with different data.
    #[must_use]
    pub fn with_data(&self, data: CurveData) -> Self {
        Self::from_kind(self.kind(), data)
    }

    /// Number of B-spline control points the persisted points describe.
    #[must_use]
    pub fn control_point_count(&self) -> usize {
        match self {
            Self::Complex(data) => data.points().len().div_ceil(2),
            Self::NonRational(data) | Self::Rational(data) | Self::PythagoreanHodograph(data) => {
                data.points().len()
            }
        }
    }

    /// Degree derived from the knot and control point counts, or `None` if
    /// there are too few knots.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.knots().len().checked_sub(self.control_point_count() + 1)
    }

    /// Builds the planar evaluator of a non-complex curve.
    ///
    /// # Errors
    ///
    /// Returns an error for complex curves or inconsistent knots.
    pub fn to_bspline(&self) -> Result<BSpline2> {
        match self {
            Self::NonRational(data) | Self::Rational(data) | Self::PythagoreanHodograph(data) => {
                BSpline2::new(
                    data.points().iter().map(|&c| Vector2::from(c)).collect(),
                    data.knots().to_vec(),
                )
            }
            Self::Complex(_) => Err(SplineError::InvalidSpline(
                "complex curves use the rational evaluator".into(),
            )
            .into()),
        }
    }

    /// Builds the rational evaluator of a complex curve.
    ///
    /// # Errors
    ///
    /// Returns an error for non-complex curves or an invalid layout.
    pub fn to_rational(&self) -> Result<RationalBSpline> {
        match self {
            Self::Complex(data) => {
                let points: Vec<Complex> = data.points().iter().map(|&c| Complex::from(c)).collect();
                RationalBSpline::from_interleaved(&points, data.knots().to_vec())
            }
            Self::NonRational(_) | Self::Rational(_) | Self::PythagoreanHodograph(_) => Err(
                SplineError::InvalidSpline("only complex curves have complex weights".into()).into(),
            ),
        }
    }

    /// Same variant and id with the geometry of `spline`.
    #[must_use]
    pub fn with_bspline(&self, spline: &BSpline2) -> Self {
        let points = spline.control_points().iter().map(|&v| v.into()).collect();
        self.with_data(self.data().with_geometry(points, spline.knots().to_vec()))
    }

    /// Same variant and id with the geometry of `spline` in interleaved form.
    #[must_use]
    pub fn with_rational(&self, spline: &RationalBSpline) -> Self {
        let points = spline.to_interleaved().into_iter().map(Coordinates::from).collect();
        self.with_data(self.data().with_geometry(points, spline.knots().to_vec()))
    }
}
