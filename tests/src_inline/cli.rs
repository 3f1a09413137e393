use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("kira-plasmaqc").chain(args.iter().copied()))
}

#[test]
fn test_run_defaults() {
    let cli = parse(&["run", "--input", "t.txt", "--out", "out", "--control", "ctrl"]).unwrap();
    let Commands::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.groups.control, "ctrl");
    assert_eq!(args.groups.samples, None);
    assert_eq!(args.groups.intensity_marker, "LFQ");
    assert_eq!(
        (args.sd_platelets, args.sd_erythrocytes, args.sd_coagulation),
        (3, 3, 3)
    );
    assert_eq!(args.heatmap_axis, HeatmapAxisArg::Samples);
    assert!(args.markers.is_none());
}

#[test]
fn test_run_sd_out_of_range_rejected() {
    let base = ["run", "--input", "t.txt", "--out", "o", "--control", "c"];
    let mut args: Vec<&str> = base.to_vec();
    args.extend(["--sd-platelets", "5"]);
    assert!(parse(&args).is_err());

    let mut args: Vec<&str> = base.to_vec();
    args.extend(["--sd-coagulation", "0"]);
    assert!(parse(&args).is_err());

    let mut args: Vec<&str> = base.to_vec();
    args.extend(["--sd-erythrocytes", "1", "--heatmap-axis", "proteins"]);
    let Commands::Run(run) = parse(&args).unwrap().command else {
        panic!("expected run");
    };
    assert_eq!(run.sd_erythrocytes, 1);
    assert_eq!(CorrelationAxis::from(run.heatmap_axis), CorrelationAxis::Proteins);
}

#[test]
fn test_validate_requires_control() {
    assert!(parse(&["validate", "--input", "t.txt"]).is_err());
    let cli = parse(&["validate", "--input", "t.txt", "--control", "c", "--samples", "s"]).unwrap();
    let Commands::Validate(args) = cli.command else {
        panic!("expected validate");
    };
    assert_eq!(args.groups.samples.as_deref(), Some("s"));
}

#[test]
fn test_panels_optional_markers() {
    let cli = parse(&["panels"]).unwrap();
    assert!(matches!(cli.command, Commands::Panels(PanelsArgs { markers: None })));
}
