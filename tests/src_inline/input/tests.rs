use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::columns::{ColumnKind, classify_column, display_name};
use super::reader::{Delimiter, detect_delimiter};
use super::{InputError, load_table, read_table};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_plasmaqc_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const TSV: &str = "Protein IDs\tMajority protein IDs\tProtein names\tGene names\tScore\tLFQ intensity TP1_A\tLFQ intensity TP2_B\n\
P69905\tP69905\tHemoglobin subunit alpha\tHBA1;HBA2\t323.1\t100\t200\n\
P02671\tP02671\tFibrinogen alpha chain\tFGA\t300.0\t\t50\n";

#[test]
fn test_column_selection_keeps_identifiers_and_intensities() {
    let table = read_table(TSV.as_bytes(), Delimiter::Tab, "LFQ").unwrap();
    assert_eq!(
        table.intensity_columns,
        vec!["LFQ intensity TP1_A", "LFQ intensity TP2_B"]
    );
    assert_eq!(table.n_rows, 2);
    assert_eq!(table.n_columns_dropped, 2);
    assert_eq!(table.gene_name(0), Some("HBA1;HBA2"));
    assert_eq!(table.protein_id(1), Some("P02671"));
    assert_eq!(table.protein_name(1), Some("Fibrinogen alpha chain"));
    assert_eq!(table.column(0)[0], 100.0);
    assert!(table.column(0)[1].is_nan());
    assert_eq!(table.column(1)[1], 50.0);
}

#[test]
fn test_marker_match_is_case_sensitive() {
    assert_eq!(
        classify_column("LFQ intensity S1", "LFQ"),
        Some(ColumnKind::Intensity)
    );
    assert_eq!(classify_column("lfq intensity S1", "LFQ"), None);
    assert_eq!(classify_column("Intensity S1", "LFQ"), None);
    assert_eq!(
        classify_column("Gene names", "LFQ"),
        Some(ColumnKind::GeneNames)
    );
}

#[test]
fn test_display_name_strips_marker_and_suffix() {
    assert_eq!(display_name("LFQ intensity TP1_A", "LFQ"), "TP1_A");
    assert_eq!(display_name("LFQ intensity 07", "LFQ"), "07");
}

#[test]
fn test_detect_delimiter() {
    assert_eq!(
        detect_delimiter(Path::new("a/proteinGroups.txt")).unwrap(),
        Delimiter::Tab
    );
    assert_eq!(
        detect_delimiter(Path::new("table.CSV")).unwrap(),
        Delimiter::Comma
    );
    assert_eq!(
        detect_delimiter(Path::new("table.tsv.gz")).unwrap(),
        Delimiter::Tab
    );
    assert!(matches!(
        detect_delimiter(Path::new("table.xlsx")),
        Err(InputError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_load_csv_and_gz() {
    let dir = make_temp_dir();
    let csv_path = dir.join("table.csv");
    write_file(
        &csv_path,
        "Gene names,Protein IDs,LFQ intensity A,LFQ intensity B\nALB,P02768,1e9,2e9\n",
    );
    let table = load_table(&csv_path).unwrap();
    assert_eq!(table.n_rows, 1);
    assert_eq!(table.column(1)[0], 2e9);
    assert!(table.protein_names.is_none());
    assert_eq!(table.source.as_deref(), Some(csv_path.as_path()));

    let gz_path = dir.join("table.txt.gz");
    write_gz(&gz_path, TSV);
    let table = load_table(&gz_path).unwrap();
    assert_eq!(table.n_rows, 2);
    assert_eq!(table.n_intensity_columns(), 2);
}

#[test]
fn test_non_numeric_intensity_is_parse_error() {
    let text = "Gene names\tLFQ intensity A\nALB\tabc\n";
    let err = read_table(text.as_bytes(), Delimiter::Tab, "LFQ").unwrap_err();
    match err {
        InputError::Parse { column, value, .. } => {
            assert_eq!(column, "LFQ intensity A");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_gene_names_column_loads_silently() {
    let text = "Protein IDs\tLFQ intensity A\nP1\t1\n";
    let table = read_table(text.as_bytes(), Delimiter::Tab, "LFQ").unwrap();
    assert!(table.gene_names.is_none());
    assert_eq!(table.gene_name(0), None);
}

#[test]
fn test_bom_in_first_header_is_stripped() {
    let text = "\u{feff}Gene names,LFQ intensity A\nALB,1\n";
    let table = read_table(text.as_bytes(), Delimiter::Comma, "LFQ").unwrap();
    assert_eq!(table.gene_name(0), Some("ALB"));
}
