//! JSON form of a curve collection.
//!
//! Each curve is stored as `{"id", "type", "points", "knots"}` where `type`
//! is the stable [`CurveKind`](crate::geometry::curve::CurveKind) ordinal.

use crate::error::{PersistError, Result};
use crate::geometry::curve::{Curve, PersistedCurve};

/// Serializes a curve collection.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn to_json(curves: &[Curve]) -> Result<String> {
    Ok(serde_json::to_string(curves).map_err(PersistError::from)?)
}

/// Parses a curve collection.
///
/// # Errors
///
/// Returns [`PersistError::Json`] for malformed input and
/// [`PersistError::UnknownCurveType`] for an unknown `type` ordinal.
pub fn from_json(json: &str) -> Result<Vec<Curve>> {
    let persisted: Vec<PersistedCurve> = serde_json::from_str(json).map_err(PersistError::from)?;
    let curves = persisted
        .into_iter()
        .map(Curve::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    tracing::debug!(count = curves.len(), "curves loaded");
    Ok(curves)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KnotworkError;
    use crate::geometry::curve::{Coordinates, CurveData, CurveKind};

    fn curve(kind: CurveKind, id: &str) -> Curve {
        Curve::from_kind(
            kind,
            CurveData::new(
                id,
                vec![Coordinates::new(0.0, 0.5), Coordinates::new(1.25, -2.0), Coordinates::new(3.0, 0.0)],
                vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            ),
        )
    }

    #[test]
    fn every_variant_round_trips() {
        let curves = vec![
            curve(CurveKind::NonRational, "n"),
            curve(CurveKind::Rational, "r"),
            curve(CurveKind::Complex, "c"),
            curve(CurveKind::PythagoreanHodograph, "p"),
        ];
        let json = to_json(&curves).unwrap();
        assert_eq!(from_json(&json).unwrap(), curves);
    }

    #[test]
    fn persisted_shape_uses_type_ordinals() {
        let json = to_json(&[curve(CurveKind::Complex, "c")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["type"], 2);
        assert_eq!(value[0]["id"], "c");
        assert_eq!(value[0]["points"][1]["x"], 1.25);
        assert_eq!(value[0]["knots"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"[{"id": "x", "type": 7, "points": [], "knots": []}]"#;
        assert!(matches!(
            from_json(json),
            Err(KnotworkError::Persist(PersistError::UnknownCurveType(7)))
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            from_json("[{\"id\": 3}]"),
            Err(KnotworkError::Persist(PersistError::Json(_)))
        ));
    }
}
