use std::path::Path;

use clap::Parser;

use kira_plasmaqc::cli::{Cli, Commands, GroupArgs, PanelsArgs, RunArgs, ValidateArgs};
use kira_plasmaqc::model::thresholds::{PanelSdMultipliers, QcThresholds, SdMultiplier};
use kira_plasmaqc::panels::loader::load_panels;
use kira_plasmaqc::pipeline::stage1_input::run_stage1;
use kira_plasmaqc::pipeline::stage2_groups::resolve_groups;
use kira_plasmaqc::pipeline::stage7_report::write_outputs;
use kira_plasmaqc::pipeline::{PipelineError, PipelineParams, run_pipeline};
use kira_plasmaqc::tracing::init_logging;

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        if err.is_user_correctable() {
            kira_plasmaqc::warn!("{err}");
        } else {
            kira_plasmaqc::error!("{err}");
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Commands::Run(args) => run_qc(args),
        Commands::Panels(args) => print_panels(args),
        Commands::Validate(args) => validate(args),
    }
}

fn thresholds_for(groups: &GroupArgs) -> QcThresholds {
    QcThresholds {
        intensity_marker: groups.intensity_marker.clone(),
        ..QcThresholds::default_v1()
    }
}

fn sd(value: u8) -> SdMultiplier {
    SdMultiplier::try_from(value).unwrap_or_default()
}

fn run_qc(args: RunArgs) -> Result<(), PipelineError> {
    let panels = load_panels(args.markers.as_deref())?;

    let mut params = PipelineParams::new(&args.groups.input, &args.groups.control);
    params.samples = args.groups.samples.clone();
    params.thresholds = thresholds_for(&args.groups);
    params.sd_multipliers = PanelSdMultipliers {
        platelets: sd(args.sd_platelets),
        erythrocytes: sd(args.sd_erythrocytes),
        coagulation: sd(args.sd_coagulation),
    };
    params.heatmap_axis = args.heatmap_axis.into();

    let output = run_pipeline(&params, &panels)?;
    let paths = write_outputs(&output, &args.out)?;

    println!(
        "kira-plasmaqc: {} proteins kept of {}",
        output.differential.n_rows(),
        output.differential.n_input_rows
    );
    for result in &output.panel_results {
        match result.series() {
            Some(series) => println!(
                "  {:<13} SD{} threshold={} high={}",
                result.kind.label(),
                result.sd_multiplier,
                series.threshold,
                series.n_high()
            ),
            None => println!("  {:<13} not computed", result.kind.label()),
        }
    }
    println!("  report: {}", display(&paths.contamination_report));
    Ok(())
}

fn print_panels(args: PanelsArgs) -> Result<(), PipelineError> {
    let panels = load_panels(args.markers.as_deref())?;
    println!("id\tlabel\tcaption\treverse\tentries\taliases\tratio_aliases\tkey_markers");
    for panel in panels.iter() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            panel.kind.id(),
            panel.kind.label(),
            panel.kind.ratio_caption(),
            panel.reverse(),
            panel.entries.len(),
            panel.aliases.len(),
            panel.ratio_aliases.len(),
            panel.key_markers.join(",")
        );
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<(), PipelineError> {
    let thresholds = thresholds_for(&args.groups);
    let table = run_stage1(&args.groups.input, &thresholds)?;
    let (control, samples) = resolve_groups(
        &table,
        &args.groups.control,
        args.groups.samples.as_deref(),
    )?;
    println!(
        "ok: {} rows, {} intensity columns, control={} samples={}",
        table.n_rows,
        table.n_intensity_columns(),
        control.columns.join(","),
        samples.columns.join(",")
    );
    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
