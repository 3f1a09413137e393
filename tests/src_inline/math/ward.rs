use super::*;

fn pts(values: &[f64]) -> Vec<Vec<f64>> {
    values.iter().map(|&v| vec![v]).collect()
}

#[test]
fn test_two_clear_clusters() {
    let points = pts(&[10.0, 0.0, 11.0, 1.0]);
    let merges = ward_linkage(&points);
    assert_eq!(merges.len(), 3);

    assert_eq!((merges[0].left, merges[0].right), (0, 2));
    assert_eq!((merges[1].left, merges[1].right), (1, 3));
    assert_eq!((merges[2].left, merges[2].right), (4, 5));
    assert!((merges[0].height - 1.0).abs() < 1e-12);
    assert!((merges[2].height - 200f64.sqrt()).abs() < 1e-9);
    assert_eq!(merges[2].size, 4);

    assert_eq!(leaf_order(&merges, 4), vec![0, 2, 1, 3]);
}

#[test]
fn test_heights_non_decreasing() {
    let points = vec![
        vec![0.1, 0.9, 0.3],
        vec![0.2, 0.8, 0.35],
        vec![5.0, 1.0, 2.0],
        vec![4.8, 1.2, 2.1],
        vec![-3.0, 0.0, 0.0],
        vec![0.15, 0.85, f64::NAN],
    ];
    let merges = ward_linkage(&points);
    assert_eq!(merges.len(), 5);
    for pair in merges.windows(2) {
        assert!(pair[0].height <= pair[1].height);
    }
    for m in &merges {
        assert!(m.left < m.right);
    }
    let order = leaf_order(&merges, points.len());
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_trivial_inputs() {
    assert!(ward_linkage(&[]).is_empty());
    assert!(ward_linkage(&pts(&[1.0])).is_empty());
    assert_eq!(leaf_order(&[], 0), Vec::<usize>::new());
    assert_eq!(leaf_order(&[], 1), vec![0]);
}

#[test]
fn test_euclidean_treats_missing_as_zero() {
    assert!((euclidean(&[3.0, f64::NAN], &[0.0, 4.0]) - 5.0).abs() < 1e-12);
}
