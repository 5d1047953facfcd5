use thiserror::Error;

/// Top-level error type for the knotwork curve engine.
#[derive(Debug, Error)]
pub enum KnotworkError {
    #[error(transparent)]
    Spline(#[from] SplineError),

    #[error(transparent)]
    Fitting(#[from] FittingError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Errors raised while constructing or editing a B-spline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SplineError {
    #[error("negative degree: {knots} knots for {control_points} control points")]
    NegativeDegree {
        knots: usize,
        control_points: usize,
    },

    #[error("invalid spline: {0}")]
    InvalidSpline(String),

    #[error("cannot insert knot {u}: {reason}")]
    InvalidKnotInsertion { u: f64, reason: &'static str },

    #[error("index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot sample with step {step}: {reason}")]
    InvalidStep { step: f64, reason: &'static str },
}

/// Errors raised by the automatic knot placement and least-squares fitting.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FittingError {
    #[error("normal equations are singular ({size}x{size})")]
    SingularSystem { size: usize },

    #[error("interior knot multiplicity must be 1 for arc-length reparametrization")]
    UnsupportedMultiplicity,

    #[error("derivative order {order} exceeds spline degree {degree}")]
    DerivativeOrder { order: usize, degree: usize },
}

/// Errors raised while reading or writing the persisted curve shape.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown curve type ordinal: {0}")]
    UnknownCurveType(u8),
}

/// Convenience type alias for results using [`KnotworkError`].
pub type Result<T> = std::result::Result<T, KnotworkError>;
