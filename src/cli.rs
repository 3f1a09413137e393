use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::correlation::CorrelationAxis;

#[derive(Debug, Parser)]
#[command(
    name = "kira-plasmaqc",
    version,
    about = "Plasma proteome QC: differential statistics, contamination panels, sample correlation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full QC pipeline and write reports.
    Run(RunArgs),
    /// Print the marker panel definitions.
    Panels(PanelsArgs),
    /// Load the table and resolve groups without running statistics.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[arg(long, help = "Protein table (.txt/.tsv/.csv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, help = "Control group identifier (substring tokens)")]
    pub control: String,

    #[arg(long, help = "Sample group identifier; defaults to all non-control columns")]
    pub samples: Option<String>,

    #[arg(long, default_value = "LFQ", help = "Intensity column marker (case-sensitive)")]
    pub intensity_marker: String,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub groups: GroupArgs,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(
        long,
        help = "Marker reference: workbook with one sheet per panel and a 'Gene names' column, or a delimited file with 'Category' and 'Gene names' columns"
    )]
    pub markers: Option<PathBuf>,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub sd_platelets: u8,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub sd_erythrocytes: u8,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub sd_coagulation: u8,

    #[arg(long, value_enum, default_value_t = HeatmapAxisArg::Samples)]
    pub heatmap_axis: HeatmapAxisArg,
}

#[derive(Debug, Args)]
pub struct PanelsArgs {
    #[arg(long, help = "Marker reference file overriding the built-in panels")]
    pub markers: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub groups: GroupArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeatmapAxisArg {
    Samples,
    Proteins,
}

impl From<HeatmapAxisArg> for CorrelationAxis {
    fn from(arg: HeatmapAxisArg) -> Self {
        match arg {
            HeatmapAxisArg::Samples => CorrelationAxis::Samples,
            HeatmapAxisArg::Proteins => CorrelationAxis::Proteins,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
