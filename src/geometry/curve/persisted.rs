use serde::{Deserialize, Serialize};

use super::{Coordinates, Curve, CurveData, CurveKind};
use crate::error::PersistError;

/// The JSON shape hosts store: `{id, type, points, knots}`.
///
/// `type` is the [`CurveKind`] ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCurve {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub points: Vec<Coordinates>,
    pub knots: Vec<f64>,
}

impl TryFrom<PersistedCurve> for Curve {
    type Error = PersistError;

    fn try_from(value: PersistedCurve) -> Result<Self, Self::Error> {
        let kind = CurveKind::from_ordinal(value.kind)?;
        Ok(Curve::from_kind(
            kind,
            CurveData::new(value.id, value.points, value.knots),
        ))
    }
}

impl From<Curve> for PersistedCurve {
    fn from(curve: Curve) -> Self {
        Self {
            id: curve.id().to_owned(),
            kind: curve.kind().ordinal(),
            points: curve.points().to_vec(),
            knots: curve.knots().to_vec(),
        }
    }
}
