use super::*;
use crate::model::groups::GroupSource;

const NA: f64 = f64::NAN;

/// Rows given row-major; stored column-major like the loader does.
fn table(columns: &[&str], genes: &[Option<&str>], rows: &[Vec<f64>]) -> ProteinTable {
    let intensities = (0..columns.len())
        .map(|c| rows.iter().map(|r| r[c]).collect())
        .collect();
    ProteinTable {
        source: None,
        intensity_marker: "LFQ".to_string(),
        gene_names: Some(genes.iter().map(|g| g.map(str::to_string)).collect()),
        protein_ids: None,
        protein_names: None,
        intensity_columns: columns.iter().map(|c| c.to_string()).collect(),
        intensities,
        n_rows: rows.len(),
        n_columns_dropped: 0,
    }
}

fn group(role: GroupRole, table: &ProteinTable, indices: &[usize]) -> ColumnGroup {
    ColumnGroup {
        role,
        source: GroupSource::Complement,
        columns: indices
            .iter()
            .map(|&i| table.intensity_columns[i].clone())
            .collect(),
        indices: indices.to_vec(),
    }
}

fn run(t: &ProteinTable) -> DifferentialTable {
    let control = group(GroupRole::Control, t, &[0, 1]);
    let samples = group(GroupRole::Samples, t, &[2, 3]);
    run_differential(t, &control, &samples, &QcThresholds::default_v1()).unwrap()
}

const COLUMNS: [&str; 4] = [
    "LFQ intensity C1",
    "LFQ intensity C2",
    "LFQ intensity S1",
    "LFQ intensity S2",
];

#[test]
fn test_means_and_fold_change() {
    let t = table(&COLUMNS, &[Some("ALB")], &[vec![10.0, 12.0, 20.0, 24.0]]);
    let out = run(&t);
    assert_eq!(out.n_rows(), 1);
    let row = &out.rows[0];
    assert_eq!(row.control_mean, Some(11.0));
    assert_eq!(row.sample_mean, Some(22.0));
    assert!((row.log10_fold_change.unwrap() - 2f64.log10()).abs() < 1e-12);

    let t_stat = -11.0 / 5f64.sqrt();
    let expected_p = 1.0 - t_stat.abs() / (2.0 + t_stat * t_stat).sqrt();
    assert!((row.p_value.unwrap() - expected_p).abs() < 1e-9);
    assert!((row.neg_log10_p.unwrap() + expected_p.log10()).abs() < 1e-9);
}

#[test]
fn test_valid_value_filter_half_of_columns() {
    let t = table(
        &COLUMNS,
        &[Some("A"), Some("B"), Some("C")],
        &[
            vec![NA, NA, NA, 5.0],
            vec![4.0, NA, NA, 5.0],
            vec![NA, NA, NA, NA],
        ],
    );
    let out = run(&t);
    assert_eq!(out.n_rows(), 1);
    assert_eq!(out.rows[0].gene_names, "B");
    assert_eq!(out.n_dropped_valid_values, 2);
}

#[test]
fn test_rows_without_gene_dropped_and_order_kept() {
    let t = table(
        &COLUMNS,
        &[Some("Z"), None, Some("A")],
        &[
            vec![1.0, 2.0, 3.0, 4.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ],
    );
    let out = run(&t);
    let genes: Vec<&str> = out.rows.iter().map(|r| r.gene_names.as_str()).collect();
    assert_eq!(genes, vec!["Z", "A"]);
    assert_eq!(out.rows[1].source_row, 2);
    assert_eq!(out.n_dropped_no_gene, 1);
    assert_eq!(out.n_input_rows, 3);
}

#[test]
fn test_group_all_missing_leaves_row_without_statistics() {
    let t = table(&COLUMNS, &[Some("A")], &[vec![NA, NA, 3.0, 4.0]]);
    let out = run(&t);
    let row = &out.rows[0];
    assert_eq!(row.p_value, None);
    assert_eq!(row.neg_log10_p, None);
    assert_eq!(row.control_mean, None);
    assert_eq!(row.sample_mean, Some(3.5));
    assert_eq!(row.log10_fold_change, None);
}

#[test]
fn test_fold_change_present_iff_defined() {
    let t = table(
        &COLUMNS,
        &[Some("A"), Some("B"), Some("C"), Some("D")],
        &[
            vec![0.0, 0.0, 3.0, 4.0],
            vec![2.0, 4.0, 3.0, 3.0],
            vec![2.0, 4.0, 6.0, 8.0],
            vec![1.0, 3.0, 0.0, 0.0],
        ],
    );
    let out = run(&t);
    for row in &out.rows {
        let defined = match (row.control_mean, row.sample_mean) {
            (Some(c), Some(s)) => c != 0.0 && s != 0.0 && s / c != 1.0,
            _ => false,
        };
        assert_eq!(row.log10_fold_change.is_some(), defined, "{}", row.gene_names);
    }
    assert_eq!(out.rows[1].log10_fold_change, None);
}

#[test]
fn test_rerun_is_identical() {
    let t = table(
        &COLUMNS,
        &[Some("A"), Some("B")],
        &[vec![1.5, 2.5, 9.0, NA], vec![7.0, 8.0, 1.0, 2.0]],
    );
    let a = run(&t);
    let b = run(&t);
    assert_eq!(a.rows.len(), b.rows.len());
    for (x, y) in a.rows.iter().zip(b.rows.iter()) {
        assert_eq!(x.p_value.map(f64::to_bits), y.p_value.map(f64::to_bits));
        assert_eq!(
            x.log10_fold_change.map(f64::to_bits),
            y.log10_fold_change.map(f64::to_bits)
        );
        assert_eq!(x.gene_names, y.gene_names);
    }
}

#[test]
fn test_empty_group_aborts() {
    let t = table(&COLUMNS, &[Some("A")], &[vec![1.0, 2.0, 3.0, 4.0]]);
    let control = group(GroupRole::Control, &t, &[]);
    let samples = group(GroupRole::Samples, &t, &[2, 3]);
    assert!(matches!(
        run_differential(&t, &control, &samples, &QcThresholds::default_v1()),
        Err(PipelineError::EmptyGroup(GroupRole::Control))
    ));
}

#[test]
fn test_empty_table_aborts() {
    let t = table(&COLUMNS, &[], &[]);
    let control = group(GroupRole::Control, &t, &[0]);
    let samples = group(GroupRole::Samples, &t, &[2]);
    assert!(matches!(
        run_differential(&t, &control, &samples, &QcThresholds::default_v1()),
        Err(PipelineError::EmptyTable)
    ));
}
