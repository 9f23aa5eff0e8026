/// Linear interpolation of `ys(xs)` at `x` on a strictly increasing abscissa.
///
/// Both endpoints are part of the domain. Returns `None` when `x` lies outside
/// `[xs[0], xs[n-1]]`, is NaN, or when the inputs are empty or unaligned;
/// extrapolation is never performed.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let first = xs[0];
    let last = xs[xs.len() - 1];
    if !(x >= first && x <= last) {
        return None;
    }

    let hi = xs.partition_point(|&v| v < x);
    if xs[hi] == x {
        return Some(ys[hi]);
    }

    // `x > xs[0]` here, so `hi >= 1`.
    let lo = hi - 1;
    let weight = (x - xs[lo]) / (xs[hi] - xs[lo]);
    Some(ys[lo] + weight * (ys[hi] - ys[lo]))
}
