use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::math::describe::{nan_mean, sum_sq_dev};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
}

/// Independent two-sample Student t-test with pooled variance, missing
/// values omitted per group. The statistic is `mean(a) - mean(b)` scaled.
///
/// Returns `None` when the comparison is undefined for this pair: a group
/// with no values, fewer than one degree of freedom, or zero pooled variance.
/// Zero pooled variance covers constant groups with different means, which
/// have an infinite statistic; those rows get no p-value.
pub fn student_t_test(a: &[f64], b: &[f64]) -> Option<TTest> {
    let (ss_a, n_a) = sum_sq_dev(a)?;
    let (ss_b, n_b) = sum_sq_dev(b)?;
    let df = (n_a + n_b) as f64 - 2.0;
    if df < 1.0 {
        return None;
    }
    let mean_a = nan_mean(a)?;
    let mean_b = nan_mean(b)?;

    let pooled = (ss_a + ss_b) / df;
    let se = (pooled * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    if !(se.is_finite() && se > 0.0) {
        return None;
    }
    let statistic = (mean_a - mean_b) / se;
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p_value = (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0);

    Some(TTest {
        statistic,
        df,
        p_value,
    })
}

/// `-log10(p)`, with `p` floored at the smallest positive normal so the
/// result stays finite.
pub fn neg_log10(p: f64) -> f64 {
    -p.max(f64::MIN_POSITIVE).log10()
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/ttest.rs"]
mod tests;
