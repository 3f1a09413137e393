use crate::math::StatsError;

pub fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

pub fn count_present(values: &[f64]) -> usize {
    values.iter().filter(|v| !v.is_nan()).count()
}

pub fn nan_sum(values: &[f64]) -> f64 {
    let mut sum = 0f64;
    for v in finite(values) {
        sum += v;
    }
    sum
}

pub fn nan_mean(values: &[f64]) -> Option<f64> {
    let mut sum = 0f64;
    let mut n = 0usize;
    for v in finite(values) {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sum of squared deviations from the mean, with the count of values used.
pub fn sum_sq_dev(values: &[f64]) -> Option<(f64, usize)> {
    let mean = nan_mean(values)?;
    let mut ss = 0f64;
    let mut n = 0usize;
    for v in finite(values) {
        let d = v - mean;
        ss += d * d;
        n += 1;
    }
    Some((ss, n))
}

/// Population (ddof = 0) standard deviation.
pub fn population_std(values: &[f64]) -> Result<f64, StatsError> {
    let (ss, n) = sum_sq_dev(values).ok_or(StatsError::EmptySeries)?;
    Ok((ss / n as f64).sqrt())
}

pub fn harmonic_mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    let mut inv = 0f64;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() || value <= 0.0 {
            return Err(StatsError::NonPositive { index, value });
        }
        inv += 1.0 / value;
    }
    Ok(values.len() as f64 / inv)
}

/// Half-to-even rounding at `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/describe.rs"]
mod tests;
