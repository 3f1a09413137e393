use super::*;

// df = 2 has a closed-form survival function: 0.5 * (1 - t / sqrt(t^2 + 2)).
fn two_sided_p_df2(t: f64) -> f64 {
    let t = t.abs();
    1.0 - t / (t * t + 2.0).sqrt()
}

#[test]
fn test_student_t_two_by_two() {
    let res = student_t_test(&[10.0, 12.0], &[20.0, 24.0]).unwrap();
    let expected_t = -11.0 / 5f64.sqrt();
    assert!((res.statistic - expected_t).abs() < 1e-12);
    assert_eq!(res.df, 2.0);
    assert!((res.p_value - two_sided_p_df2(expected_t)).abs() < 1e-9);
}

#[test]
fn test_missing_values_are_omitted() {
    let with_nan = student_t_test(&[10.0, f64::NAN, 12.0], &[20.0, 24.0, f64::NAN]).unwrap();
    let without = student_t_test(&[10.0, 12.0], &[20.0, 24.0]).unwrap();
    assert_eq!(with_nan, without);
}

#[test]
fn test_degenerate_comparisons_are_none() {
    assert!(student_t_test(&[f64::NAN, f64::NAN], &[1.0, 2.0]).is_none());
    assert!(student_t_test(&[1.0], &[2.0]).is_none());
    assert!(student_t_test(&[5.0, 5.0], &[5.0, 5.0]).is_none());
}

#[test]
fn test_constant_groups_with_different_means_are_none() {
    assert!(student_t_test(&[10.0, 10.0], &[20.0, 20.0]).is_none());
    assert!(student_t_test(&[10.0, 10.0, f64::NAN], &[20.0, 20.0]).is_none());
}

#[test]
fn test_symmetric_statistic() {
    let ab = student_t_test(&[1.0, 2.0, 3.0], &[4.0, 6.0, 9.0]).unwrap();
    let ba = student_t_test(&[4.0, 6.0, 9.0], &[1.0, 2.0, 3.0]).unwrap();
    assert!((ab.statistic + ba.statistic).abs() < 1e-12);
    assert!((ab.p_value - ba.p_value).abs() < 1e-12);
    assert!(ab.p_value > 0.0 && ab.p_value < 1.0);
}

#[test]
fn test_neg_log10() {
    assert!((neg_log10(0.01) - 2.0).abs() < 1e-12);
    assert!(neg_log10(0.0).is_finite());
    assert_eq!(neg_log10(1.0), 0.0);
}
