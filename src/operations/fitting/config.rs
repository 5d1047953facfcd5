use serde::{Deserialize, Serialize};

/// Parameters controlling automatic knot placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FittingConfig {
    /// Canvas zoom factor; tolerances shrink and knot density grows with it.
    pub scale: f64,
    /// Interior knots per unit of cumulative feature before scaling.
    pub resolution_factor: f64,
    /// Control points closer than `overlap_tolerance / scale` are merged.
    pub overlap_tolerance: f64,
    /// Least-squares samples per non-empty knot span.
    pub subdivision: usize,
    /// Derivative order used by the feature function.
    pub feature_derivative: usize,
    /// Inputs below this degree are returned unchanged.
    pub min_degree: usize,
    /// Degree of the fitted curve.
    pub degree: usize,
}

impl Default for FittingConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            resolution_factor: 0.3,
            overlap_tolerance: 0.005,
            subdivision: 8,
            feature_derivative: 3,
            min_degree: 3,
            degree: 3,
        }
    }
}

impl FittingConfig {
    /// Config at the given zoom scale with default resolution.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Distance below which consecutive control points are merged.
    #[must_use]
    pub fn effective_overlap_tolerance(&self) -> f64 {
        self.overlap_tolerance / self.scale
    }

    /// Knot density after zoom scaling: `resolution_factor · scale^(1/3)`.
    #[must_use]
    pub fn effective_resolution(&self) -> f64 {
        self.resolution_factor * self.scale.cbrt()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scale_adjusts_tolerances() {
        let config = FittingConfig::with_scale(8.0);
        assert_abs_diff_eq!(config.effective_overlap_tolerance(), 0.000_625);
        assert_abs_diff_eq!(config.effective_resolution(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: FittingConfig = serde_json::from_str(r#"{"scale": 2.0}"#).unwrap();
        assert_abs_diff_eq!(config.scale, 2.0);
        assert_eq!(config.subdivision, 8);
        assert_eq!(config.degree, 3);
    }
}
