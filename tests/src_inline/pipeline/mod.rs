use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::correlation::CorrelationAxis;
use crate::panels::loader::builtin_panels;
use crate::pipeline::stage7_report::{UTF8_BOM, write_outputs};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_plasmaqc_pipeline_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const TABLE: &str = "\
Gene names\tProtein IDs\tProtein names\tLFQ intensity Ctrl_1\tLFQ intensity Ctrl_2\tLFQ intensity Pt_1\tLFQ intensity Pt_2\tLFQ intensity Pt_3\tScore
ALB\tP02768\tAlbumin\t1000\t1100\t1050\t990\t1200\t5
HBB\tP68871\tHemoglobin subunit beta\t10\t12\t15\t14\t90\t1
HBA1;HBA2\tP69905\tHemoglobin subunit alpha\t8\t9\t11\t10\t70\t1
FGA\tP02671\tFibrinogen alpha chain\t50\t55\t40\t45\t48\t2
FGB\tP02675\tFibrinogen beta chain\t40\t42\t38\t39\t30\t2
FLNA\tP21333\tFilamin-A\t5\t6\t7\t6\t5\t3
PF4\tP02776\tPlatelet factor 4\t4\t4\t5\t6\t4\t3
\tQ00000\tUnnamed\t1\t1\t1\t1\t1\t0
APOA1\tP02647\tApolipoprotein A-I\t\t\t\t\t300\t0
";

fn write_table() -> PathBuf {
    let dir = make_temp_dir();
    let path = dir.join("proteins.txt");
    std::fs::write(&path, TABLE).unwrap();
    path
}

#[test]
fn test_pipeline_end_to_end() {
    let path = write_table();
    let params = PipelineParams::new(&path, "ctrl");
    let out = run_pipeline(&params, &builtin_panels()).unwrap();

    assert_eq!(out.table.n_columns_dropped, 1);
    assert_eq!(out.differential.control.len(), 2);
    assert_eq!(out.differential.samples.len(), 3);
    assert_eq!(out.differential.n_rows(), 7);
    assert_eq!(out.differential.n_dropped_no_gene, 1);
    assert_eq!(out.differential.n_dropped_valid_values, 1);

    assert_eq!(out.panel_results.len(), 3);
    for result in &out.panel_results {
        let series = result.series().unwrap();
        assert_eq!(series.values.len(), 5);
        assert!(series.values.iter().all(|v| *v > 0.0));
    }

    assert_eq!(out.correlation.axis, CorrelationAxis::Samples);
    assert_eq!(out.correlation.len(), 5);
    assert_eq!(out.volcano.points.len(), 7);
    assert_eq!(out.panel_audit.len(), 3);
}

#[test]
fn test_pipeline_empty_selection_is_user_correctable() {
    let path = write_table();
    let params = PipelineParams::new(&path, "nothing");
    let err = run_pipeline(&params, &builtin_panels()).unwrap_err();
    assert!(err.is_user_correctable());
}

#[test]
fn test_pipeline_protein_axis_has_marker_positions() {
    let path = write_table();
    let mut params = PipelineParams::new(&path, "ctrl");
    params.samples = Some("pt".to_string());
    params.heatmap_axis = CorrelationAxis::Proteins;
    let out = run_pipeline(&params, &builtin_panels()).unwrap();
    assert_eq!(out.correlation.len(), 7);
    let markers: Vec<&str> = out
        .correlation
        .positions
        .iter()
        .filter_map(|p| p.marker.as_deref())
        .collect();
    assert!(markers.contains(&"FLNA"));
    assert!(markers.contains(&"HBB"));
    assert!(markers.contains(&"FGA"));
}

#[test]
fn test_write_outputs_creates_all_files() {
    let path = write_table();
    let out_dir = make_temp_dir().join("out");
    let params = PipelineParams::new(&path, "ctrl");
    let out = run_pipeline(&params, &builtin_panels()).unwrap();
    let paths = write_outputs(&out, &out_dir).unwrap();

    for p in [
        &paths.differential,
        &paths.contamination_report,
        &paths.correlation,
        &paths.volcano,
        &paths.panels,
        &paths.summary,
        &paths.report,
    ] {
        assert!(p.exists(), "{}", p.display());
    }

    let csv = std::fs::read(&paths.contamination_report).unwrap();
    assert!(csv.starts_with(UTF8_BOM));
    let text = String::from_utf8(csv[UTF8_BOM.len()..].to_vec()).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.lines().nth(1).unwrap().starts_with("plat_contamination_ratio_SD3="));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.summary).unwrap()).unwrap();
    assert_eq!(summary["tool"], "kira-plasmaqc");
    assert_eq!(summary["differential"]["n_kept"], 7);
    assert_eq!(summary["panels"].as_array().unwrap().len(), 3);

    let report = std::fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("Contamination panels"));
    assert!(report.contains("Erythrocytes"));
}
