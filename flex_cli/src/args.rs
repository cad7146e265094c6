//! Command-line arguments.
//!
//! Every argument is optional; with none the reference beam is calculated
//! and plotted.

use std::path::PathBuf;

use clap::Parser;

/// Slope and deflection of a simply supported beam under uniform load,
/// by trapezoidal integration of curvature
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "flex_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Beam slope and deflection by curvature integration",
    long_about = "Computes slope and deflection of a simply supported beam under uniform load \
                  by trapezoidal integration of curvature. Without INPUT the reference beam is \
                  used (10 kN/m, 5 m span, 0.1 m step, E = 30 GPa, 300 x 500 mm)."
)]
pub struct CliArgs {
    /// Beam input file (JSON); missing fields take reference values
    #[arg(value_name = "INPUT.json")]
    pub input: Option<PathBuf>,

    /// Show a previously saved report instead of calculating
    #[arg(long, value_name = "REPORT.json", conflicts_with = "input")]
    pub report: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not open the interactive plot viewer
    #[arg(long)]
    pub no_plot: bool,

    /// Save the report to PATH (JSON)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Whether the plot viewer should be opened
    pub fn plot(&self) -> bool {
        !self.no_plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_reference_run() {
        let args = CliArgs::try_parse_from(["flex_cli"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.report.is_none());
        assert!(args.plot());
        assert!(!args.json);
        assert!(args.save.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_options() {
        let args = CliArgs::try_parse_from([
            "flex_cli",
            "beam.json",
            "--json",
            "--no-plot",
            "--save",
            "out.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("beam.json")));
        assert!(args.json);
        assert!(!args.plot());
        assert_eq!(args.save, Some(PathBuf::from("out.json")));
        assert!(args.verbose);
    }

    #[test]
    fn test_saved_report_replaces_input() {
        let args = CliArgs::try_parse_from(["flex_cli", "--report", "run.json", "--no-plot"]).unwrap();
        assert_eq!(args.report, Some(PathBuf::from("run.json")));
        assert!(args.input.is_none());

        let err = CliArgs::try_parse_from(["flex_cli", "beam.json", "--report", "run.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_errors() {
        let err = CliArgs::try_parse_from(["flex_cli", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        // --save without a path, and a second input file
        assert!(CliArgs::try_parse_from(["flex_cli", "--save"]).is_err());
        assert!(CliArgs::try_parse_from(["flex_cli", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_run() {
        let err = CliArgs::try_parse_from(["flex_cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
