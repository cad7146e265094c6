//! # Flexura CLI Application
//!
//! Terminal interface for the curvature-integration beam calculation.
//! Prints the mid-span comparison and opens a Ratatui plot viewer for the
//! moment, curvature, slope and deflection diagrams.

mod args;
mod plots;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};

use flex_core::calculations::DeflectionInput;
use flex_core::equations::{uniform_load_end_slope, uniform_load_reactions, uniform_load_shear};
use flex_core::errors::{FlexError, FlexResult};
use flex_core::file_io::{load_input, load_report, save_report};
use flex_core::report::DeflectionReport;
use flex_core::units::{
    Gigapascals, KilonewtonMeters, Kilonewtons, KilonewtonsPerMeter, Meters, Millimeters,
    Milliradians, NewtonMeters, Newtons, NewtonsPerMeter, Pascals, Radians,
};

use args::CliArgs;

/// Mid-span error above which the run is flagged in the log (fraction)
const ERROR_WARN_TOLERANCE: f64 = 0.01;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> FlexResult<()> {
    let report = match &args.report {
        Some(path) => load_report(path)?,
        None => {
            let input = match &args.input {
                Some(path) => load_input(path)?,
                None => DeflectionInput::default(),
            };
            debug!("input: {:?}", input);
            DeflectionReport::run(input)?
        }
    };
    if !report.result.within_tolerance(ERROR_WARN_TOLERANCE) {
        warn!(
            "mid-span error exceeds {} %; consider a smaller step",
            ERROR_WARN_TOLERANCE * 100.0
        );
    }

    {
        let mut out = io::stdout().lock();
        print_report(&report, &mut out).map_err(stdout_error)?;

        if args.json {
            writeln!(out).map_err(stdout_error)?;
            writeln!(out, "JSON Output:").map_err(stdout_error)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?).map_err(stdout_error)?;
        }
    }

    if let Some(path) = &args.save {
        save_report(&report, path)?;
        println!();
        println!("Report saved to {}", path.display());
    }

    if args.plot() {
        if io::stdout().is_terminal() {
            plots::show(report.label(), &report.result).map_err(|e| FlexError::Internal {
                message: format!("plot viewer failed: {}", e),
            })?;
        } else {
            warn!("stdout is not a terminal; skipping plots");
        }
    }

    Ok(())
}

fn stdout_error(e: io::Error) -> FlexError {
    FlexError::Internal {
        message: format!("failed to write to stdout: {}", e),
    }
}

fn print_report(report: &DeflectionReport, out: &mut impl Write) -> io::Result<()> {
    let input = &report.input;
    let result = &report.result;
    let (w, l, e, i) = (
        input.load_n_per_m,
        input.length_m,
        input.modulus_pa,
        input.moment_of_inertia_m4(),
    );

    let load = KilonewtonsPerMeter::from(NewtonsPerMeter(w));
    let modulus = Gigapascals::from(Pascals(e));
    let (r1, r2) = uniform_load_reactions(w, l);
    let (r1, r2) = (Kilonewtons::from(Newtons(r1)), Kilonewtons::from(Newtons(r2)));
    let v0 = Kilonewtons::from(Newtons(uniform_load_shear(w, l, 0.0)));
    let vl = Kilonewtons::from(Newtons(uniform_load_shear(w, l, l)));
    let max_moment = KilonewtonMeters::from(NewtonMeters(result.max_moment_nm));
    let midspan_mm = Millimeters::from(Meters(result.midspan_deflection_m));
    let max_mm = Millimeters::from(Meters(result.max_deflection_m));
    let end_mm = Millimeters::from(Meters(result.end_deflection_m));
    let start_slope = Milliradians::from(Radians(result.slope_correction.corrected_initial_slope));
    let exact_start_slope = Milliradians::from(Radians(uniform_load_end_slope(w, l, e, i)));

    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "  BEAM DEFLECTION BY CURVATURE INTEGRATION")?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out)?;
    writeln!(out, "Input: {}", input.label)?;
    writeln!(out, "  Load:     {:.2} kN/m", load.0)?;
    writeln!(
        out,
        "  Span:     {:.3} m (step {} m, {} points)",
        l,
        input.step_m,
        result.profile.len()
    )?;
    writeln!(out, "  Modulus:  {:.1} GPa", modulus.0)?;
    writeln!(out, "  Section:  {}", input.section.describe())?;
    if let Some(area) = input.section.area_m2() {
        writeln!(out, "  Area:     {:.4} m^2", area)?;
    }
    writeln!(
        out,
        "  I:        {:.6e} m^4 (EI = {:.4e} N·m^2)",
        i, result.flexural_rigidity_nm2
    )?;
    writeln!(out)?;
    writeln!(out, "Supports:")?;
    writeln!(out, "  R1 = {:.3} kN, R2 = {:.3} kN", r1.0, r2.0)?;
    writeln!(out, "  V(0) = {:.3} kN, V(L) = {:.3} kN", v0.0, vl.0)?;
    writeln!(out)?;
    writeln!(out, "Results:")?;
    writeln!(
        out,
        "  M_max = {:.3} kN·m at x = {:.3} m",
        max_moment.0, result.max_moment_position_m
    )?;
    writeln!(
        out,
        "  δ_max = {:.4} mm at x = {:.3} m",
        max_mm.0, result.max_deflection_position_m
    )?;
    writeln!(
        out,
        "  θ(0)  = {:.4} mrad (closed form {:.4} mrad; trial seed corrected by {:.4e} rad)",
        start_slope.0, exact_start_slope.0, -result.slope_correction.raw_midspan_slope
    )?;
    writeln!(out, "  δ(L)  = {:.3e} mm (support closure)", end_mm.0)?;
    writeln!(
        out,
        "  Max deviation from closed form: {:.3e} m (deflection), {:.3e} rad (slope)",
        result.max_deflection_deviation_m, result.max_slope_deviation
    )?;
    writeln!(out)?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(
        out,
        "Calculated deflection at mid-span: {:e} m ({:.4} mm at x = {:.3} m)",
        result.midspan_deflection_m, midspan_mm.0, result.midspan_position_m
    )?;
    writeln!(
        out,
        "Theoretical deflection at mid-span: {:e} m",
        result.theoretical_midspan_deflection_m
    )?;
    match result.relative_error_percent() {
        Some(percent) => writeln!(out, "Error: {:.9} %", percent)?,
        None => writeln!(out, "Error: n/a (zero theoretical deflection)")?,
    }
    writeln!(out, "═══════════════════════════════════════")?;
    Ok(())
}
