//! Read-only queries hosts run to draw curves and their overlays.

mod basis;
mod sample;

pub use basis::{basis_graphs, complex_rational_basis_functions, span_at, ComplexBasisSample};
pub use sample::{point_on_curve, points_on_curve};
