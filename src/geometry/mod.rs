pub mod circle_arc;
pub mod curve;

pub use circle_arc::{CircleArc, CircumscribedArc, Winding};
pub use curve::{Coordinates, Curve, CurveData, CurveKind};
