/// Pearson correlation over the positions where both inputs are present.
/// `NaN` when fewer than two complete pairs remain or either side has no spread.
pub fn pearson_pairwise(a: &[f64], b: &[f64]) -> f64 {
    let mut n = 0usize;
    let mut sum_a = 0f64;
    let mut sum_b = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        n += 1;
        sum_a += x;
        sum_b += y;
    }
    if n < 2 {
        return f64::NAN;
    }
    let mean_a = sum_a / n as f64;
    let mean_b = sum_b / n as f64;

    let mut sxy = 0f64;
    let mut sxx = 0f64;
    let mut syy = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        let dx = x - mean_a;
        let dy = y - mean_b;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom.is_nan() || denom <= 0.0 {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

/// Symmetric correlation matrix between the given vectors. The diagonal is
/// 1 for every vector with at least one present value, `NaN` otherwise.
pub fn correlation_matrix(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut out = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        if vectors[i].iter().any(|v| !v.is_nan()) {
            out[i][i] = 1.0;
        }
        for j in (i + 1)..n {
            let r = pearson_pairwise(&vectors[i], &vectors[j]);
            out[i][j] = r;
            out[j][i] = r;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/corr.rs"]
mod tests;
