use crate::error::{Result, SplineError};

/// Finds the knot span containing `u`.
///
/// Returns `i` such that `knots[i] <= u < knots[i + 1]`. Parameters at or
/// beyond the last distinct knot map to the last valid span
/// `knots.len() - degree - 2`, parameters at or before `knots[degree]` map
/// to `degree`.
///
/// # Panics
///
/// Panics if `knots.len() < degree + 2`.
#[must_use]
pub fn find_span(u: f64, knots: &[f64], degree: usize) -> usize {
    let n = knots.len() - degree - 2;
    if u >= knots[n + 1] {
        return n;
    }
    if u <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Counts how many consecutive knots ending at `index` share its value.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn knot_multiplicity(knots: &[f64], index: usize) -> usize {
    let value = knots[index];
    knots[..=index]
        .iter()
        .rev()
        .take_while(|&&k| k == value)
        .count()
}

/// Returns the knot values without repetition.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn distinct_knots(knots: &[f64]) -> Vec<f64> {
    let mut result: Vec<f64> = Vec::with_capacity(knots.len());
    for &k in knots {
        if result.last() != Some(&k) {
            result.push(k);
        }
    }
    result
}

/// Returns `true` if both end knots are repeated `degree + 1` times.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_clamped(knots: &[f64], degree: usize) -> bool {
    if knots.len() < 2 * (degree + 1) {
        return false;
    }
    let first = knots[0];
    let last = knots[knots.len() - 1];
    knots[..=degree].iter().all(|&k| k == first)
        && knots[knots.len() - degree - 1..].iter().all(|&k| k == last)
}

/// Clamped knot vector on `[0, 1]` with uniformly spaced interior knots.
///
/// # Errors
///
/// Returns an error if fewer than `degree + 1` control points are requested.
pub fn uniform_knots(degree: usize, control_points: usize) -> Result<Vec<f64>> {
    if control_points < degree + 1 {
        return Err(SplineError::InvalidSpline(format!(
            "{control_points} control points cannot carry degree {degree}"
        ))
        .into());
    }
    let interior = control_points - degree - 1;
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / (interior + 1) as f64;

    let mut knots = Vec::with_capacity(control_points + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    #[allow(clippy::cast_precision_loss)]
    knots.extend((1..=interior).map(|i| i as f64 * step));
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    Ok(knots)
}

/// Greville abscissae: the average of the `degree` knots following each
/// control point index. Degree 0 uses the span midpoints.
#[must_use]
pub fn greville_abscissae(knots: &[f64], degree: usize) -> Vec<f64> {
    let count = knots.len().saturating_sub(degree + 1);
    if degree == 0 {
        return (0..count).map(|i| 0.5 * (knots[i] + knots[i + 1])).collect();
    }
    #[allow(clippy::cast_precision_loss)]
    let d = degree as f64;
    (0..count)
        .map(|i| knots[i + 1..=i + degree].iter().sum::<f64>() / d)
        .collect()
}

/// Spreads coincident knots apart by `step` so each copy gets its own tick.
///
/// Groups of equal knots are centered on their common value.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn spread_coincident_knots(knots: &[f64], step: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(knots.len());
    let mut start = 0;
    while start < knots.len() {
        let value = knots[start];
        let multiplicity = knots[start..].iter().take_while(|&&k| k == value).count();
        #[allow(clippy::cast_precision_loss)]
        let left = value - (multiplicity - 1) as f64 * step / 2.0;
        #[allow(clippy::cast_precision_loss)]
        result.extend((0..multiplicity).map(|i| left + i as f64 * step));
        start += multiplicity;
    }
    result
}
