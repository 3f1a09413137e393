use super::*;

#[test]
fn test_perfect_correlations() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [2.0, 4.0, 6.0, 8.0];
    let c = [4.0, 3.0, 2.0, 1.0];
    assert!((pearson_pairwise(&a, &b) - 1.0).abs() < 1e-12);
    assert!((pearson_pairwise(&a, &c) + 1.0).abs() < 1e-12);
}

#[test]
fn test_pairwise_complete_handling() {
    let a = [1.0, f64::NAN, 3.0, 4.0, 10.0];
    let b = [2.0, 100.0, 6.0, 8.0, f64::NAN];
    // Only positions 0, 2, 3 are complete.
    assert!((pearson_pairwise(&a, &b) - 1.0).abs() < 1e-12);
}

#[test]
fn test_undefined_correlation_is_nan() {
    assert!(pearson_pairwise(&[1.0, f64::NAN], &[2.0, 3.0]).is_nan());
    assert!(pearson_pairwise(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
}

#[test]
fn test_matrix_symmetry_and_diagonal() {
    let vectors = vec![
        vec![1.0, 2.0, 3.5, 4.0],
        vec![2.0, 1.0, 4.0, 3.0],
        vec![0.5, 0.7, 0.1, 0.9],
        vec![f64::NAN, f64::NAN, f64::NAN, f64::NAN],
    ];
    let m = correlation_matrix(&vectors);
    for i in 0..4 {
        for j in 0..4 {
            let (x, y) = (m[i][j], m[j][i]);
            assert!(x == y || (x.is_nan() && y.is_nan()));
            if !x.is_nan() {
                assert!((-1.0..=1.0).contains(&x));
            }
        }
    }
    assert_eq!(m[0][0], 1.0);
    assert_eq!(m[2][2], 1.0);
    assert!(m[3][3].is_nan());
}
