//! Degree elevation of clamped B-splines (Piegl & Tiller, A5.9, t = 1).
//!
//! The curve is split into Bézier segments by knot insertion, each segment is
//! elevated, and the knots introduced by the split are removed again.

use super::knots::distinct_knots;
use super::ControlPoint;

#[allow(clippy::cast_precision_loss)]
fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Elevates a clamped B-spline of degree `p` to degree `p + 1`.
///
/// Returns the new control points and knots. The caller guarantees the knot
/// vector is clamped.
#[allow(
    clippy::float_cmp,
    clippy::many_single_char_names,
    clippy::too_many_lines,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub(super) fn elevate_degree_once<P: ControlPoint>(
    points: &[P],
    knots: &[f64],
    p: usize,
) -> (Vec<P>, Vec<f64>) {
    if p == 0 {
        let points = points.iter().flat_map(|&q| [q, q]).collect();
        let knots = knots.iter().flat_map(|&k| [k, k]).collect();
        return (points, knots);
    }

    let t = 1;
    let n = points.len() - 1;
    let m = n + p + 1;
    let ph = p + t;
    let ph2 = ph / 2;

    let mut bezalfs = vec![vec![0.0; p + 1]; ph + 1];
    bezalfs[0][0] = 1.0;
    bezalfs[ph][p] = 1.0;
    for i in 1..=ph2 {
        let inv = 1.0 / binomial(ph, i);
        for j in i.saturating_sub(t)..=p.min(i) {
            bezalfs[i][j] = inv * binomial(p, j) * binomial(t, i - j);
        }
    }
    for i in ph2 + 1..ph {
        for j in i.saturating_sub(t)..=p.min(i) {
            bezalfs[i][j] = bezalfs[ph - i][p - j];
        }
    }

    let segments = distinct_knots(knots).len();
    let mut uh = vec![0.0; knots.len() + segments * t + 1];
    let mut qw = vec![P::zero(); points.len() + segments * t + 1];
    let mut bpts = points[..=p].to_vec();
    let mut ebpts = vec![P::zero(); ph + 1];
    let mut next_bpts = vec![P::zero(); p];
    let mut alfs = vec![0.0; p];

    let mut mh = ph;
    let mut kind = ph + 1;
    let mut r: isize = -1;
    let mut a = p;
    let mut b = p + 1;
    let mut cind = 1;
    let mut ua = knots[0];
    qw[0] = points[0];
    uh[..=ph].fill(ua);

    while b < m {
        let start = b;
        while b < m && knots[b] == knots[b + 1] {
            b += 1;
        }
        let mul = b - start + 1;
        mh += mul + t;
        let ub = knots[b];
        let oldr = r;
        r = p as isize - mul as isize;
        let lbz = if oldr > 0 { (oldr as usize + 2) / 2 } else { 1 };
        let rbz = if r > 0 { ph - (r as usize + 1) / 2 } else { ph };

        // Insert ub r times to isolate the Bézier segment.
        if r > 0 {
            let numer = ub - ua;
            for k in (mul + 1..=p).rev() {
                alfs[k - mul - 1] = numer / (knots[a + k] - ua);
            }
            let r = r as usize;
            for j in 1..=r {
                let save = r - j;
                let s = mul + j;
                for k in (s..=p).rev() {
                    bpts[k] = bpts[k] * alfs[k - s] + bpts[k - 1] * (1.0 - alfs[k - s]);
                }
                next_bpts[save] = bpts[p];
            }
        }

        for i in lbz..=ph {
            ebpts[i] = (i.saturating_sub(t)..=p.min(i))
                .fold(P::zero(), |acc, j| acc + bpts[j] * bezalfs[i][j]);
        }

        // Remove the knot ua oldr times.
        if oldr > 1 {
            let oldr = oldr as usize;
            let mut first = kind - 2;
            let mut last = kind;
            let den = ub - ua;
            let bet = (ub - uh[kind - 1]) / den;
            for tr in 1..oldr {
                let mut i = first;
                let mut j = last;
                let mut kj = j - kind + 1;
                while j - i > tr {
                    if i < cind {
                        let alf = (ub - uh[i]) / (ua - uh[i]);
                        qw[i] = qw[i] * alf + qw[i - 1] * (1.0 - alf);
                    }
                    if j >= lbz {
                        let blend = if j - tr <= kind - ph + oldr {
                            (ub - uh[j - tr]) / den
                        } else {
                            bet
                        };
                        ebpts[kj] = ebpts[kj] * blend + ebpts[kj + 1] * (1.0 - blend);
                    }
                    i += 1;
                    j -= 1;
                    kj -= 1;
                }
                first -= 1;
                last += 1;
            }
        }

        if a != p {
            let copies = (ph as isize - oldr) as usize;
            uh[kind..kind + copies].fill(ua);
            kind += copies;
        }

        for point in &ebpts[lbz..=rbz] {
            qw[cind] = *point;
            cind += 1;
        }

        if b < m {
            let r = r.max(0) as usize;
            bpts[..r].copy_from_slice(&next_bpts[..r]);
            for j in r..=p {
                bpts[j] = points[b - p + j];
            }
            a = b;
            b += 1;
            ua = ub;
        } else {
            uh[kind..=kind + ph].fill(ub);
        }
    }

    let nh = mh - ph - 1;
    uh.truncate(mh + 1);
    qw.truncate(nh + 1);
    (qw, uh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::bspline::BSpline;
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;

    fn assert_same_shape(a: &BSpline<Vector2>, b: &BSpline<Vector2>) {
        for i in 0..=500 {
            let u = f64::from(i) / 500.0;
            assert_abs_diff_eq!((a.evaluate(u) - b.evaluate(u)).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn binomial_values() {
        assert_abs_diff_eq!(super::binomial(4, 2), 6.0);
        assert_abs_diff_eq!(super::binomial(5, 0), 1.0);
        assert_abs_diff_eq!(super::binomial(1, 2), 0.0);
    }

    #[test]
    fn quadratic_bezier_to_cubic() {
        let p0 = Vector2::new(0.0, 0.0);
        let p1 = Vector2::new(1.0, 2.0);
        let p2 = Vector2::new(3.0, 0.0);
        let s = BSpline::new(vec![p0, p1, p2], vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let e = s.elevate_degree().unwrap();
        assert_eq!(e.degree(), 3);
        assert_eq!(e.knots(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let expected = [p0, (p0 + p1 * 2.0) / 3.0, (p1 * 2.0 + p2) / 3.0, p2];
        for (q, want) in e.control_points().iter().zip(expected.iter()) {
            assert_abs_diff_eq!((q - want).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn elevation_with_interior_knots_keeps_shape() {
        let s = BSpline::new(
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 3.0),
                Vector2::new(3.0, 3.5),
                Vector2::new(4.0, 0.0),
                Vector2::new(6.0, -1.0),
                Vector2::new(7.0, 2.0),
                Vector2::new(9.0, 1.0),
            ],
            vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.5, 0.5, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let e = s.elevate_degree().unwrap();
        assert_eq!(e.degree(), 4);
        // Every distinct knot gains one copy.
        assert_eq!(e.knots().len(), s.knots().len() + 4);
        assert_eq!(e.control_points().len(), s.control_points().len() + 3);
        assert_same_shape(&s, &e);
    }

    #[test]
    fn linear_elevation_keeps_shape() {
        let s = BSpline::new(
            vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0), Vector2::new(2.0, 0.0)],
            vec![0.0, 0.0, 0.4, 1.0, 1.0],
        )
        .unwrap();
        let e = s.elevate_degree().unwrap();
        assert_eq!(e.degree(), 2);
        assert_same_shape(&s, &e);
        let twice = e.elevate_degree().unwrap();
        assert_eq!(twice.degree(), 3);
        assert_same_shape(&s, &twice);
    }

    #[test]
    fn degree_zero_elevation_keeps_constant_pieces() {
        let s = BSpline::new(vec![Vector2::new(2.0, 1.0)], vec![0.0, 1.0]).unwrap();
        let e = s.elevate_degree().unwrap();
        assert_eq!(e.degree(), 1);
        assert_abs_diff_eq!((e.evaluate(0.5) - Vector2::new(2.0, 1.0)).norm(), 0.0);
    }

    #[test]
    fn unclamped_curve_is_rejected() {
        let s = BSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]).unwrap();
        assert!(s.elevate_degree().is_err());
    }
}
