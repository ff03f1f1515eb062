//! Wellpath - directional well trajectory planner
//!
//! Solves a 2D well profile from a plan file and/or command-line
//! parameters, then prints, exports or plots it.
//!
//! # Usage
//!
//! ```bash
//! # Write a starter plan and solve it
//! wellpath init-plan
//! wellpath solve
//!
//! # S-profile entirely from flags
//! wellpath --profile build-drop --kickoff-tvd 1000 --target-tvd 9000 \
//!     --end-of-drop-tvd 8000 --target-displacement 3000 \
//!     --build-rate 2 --drop-rate 1.5 --final-inclination 10 solve
//!
//! # Export and plot
//! wellpath export --format csv --output well.csv
//! wellpath plot --output well.svg --width 1200 --height 900
//! ```
//!
//! # Environment Variables
//!
//! - `WELLPATH_CONFIG`: Path to a plan file (default: ./well_plan.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use wellpath::config::{self, PlanConfig};
use wellpath::render::{project_with_ticks, render_svg, sample_with};
use wellpath::report::{TrajectoryReport, WaypointTable};
use wellpath::trajectory::solve;
use wellpath::types::{SolvedTrajectory, WellParameters, WellType};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellpath")]
#[command(about = "Directional well trajectory planner")]
#[command(version)]
struct CliArgs {
    /// Plan file to use instead of the WELLPATH_CONFIG / ./well_plan.toml search
    #[arg(long, global = true, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Well profile: build-hold, build-drop or multi-case (overrides [well].profile)
    #[arg(long, global = true)]
    profile: Option<WellType>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Command,
}

/// Parameter overrides; any flag given here wins over the plan file.
#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// Kickoff point vertical depth (V_B)
    #[arg(long, global = true, value_name = "DEPTH")]
    kickoff_tvd: Option<f64>,

    /// Target true vertical depth (V_t)
    #[arg(long, global = true, value_name = "DEPTH")]
    target_tvd: Option<f64>,

    /// Vertical depth at the end of the drop section (V_e)
    #[arg(long, global = true, value_name = "DEPTH")]
    end_of_drop_tvd: Option<f64>,

    /// Target horizontal displacement (H_t)
    #[arg(long, global = true, value_name = "LENGTH")]
    target_displacement: Option<f64>,

    /// Build-up rate, degrees per 100 (BUR)
    #[arg(long, global = true, value_name = "RATE")]
    build_rate: Option<f64>,

    /// Drop-off rate, degrees per 100 (DOR)
    #[arg(long, global = true, value_name = "RATE")]
    drop_rate: Option<f64>,

    /// Final inclination in degrees (α2)
    #[arg(long, global = true, value_name = "DEG")]
    final_inclination: Option<f64>,

    #[arg(long, global = true, allow_hyphen_values = true)]
    surface_east: Option<f64>,

    #[arg(long, global = true, allow_hyphen_values = true)]
    surface_north: Option<f64>,

    #[arg(long, global = true, allow_hyphen_values = true)]
    target_east: Option<f64>,

    #[arg(long, global = true, allow_hyphen_values = true)]
    target_north: Option<f64>,
}

impl ParamArgs {
    fn to_parameters(&self) -> WellParameters {
        WellParameters {
            kickoff_tvd: self.kickoff_tvd,
            target_tvd: self.target_tvd,
            end_of_drop_tvd: self.end_of_drop_tvd,
            target_displacement: self.target_displacement,
            build_rate: self.build_rate,
            drop_rate: self.drop_rate,
            final_inclination: self.final_inclination,
            surface_east: self.surface_east,
            surface_north: self.surface_north,
            target_east: self.target_east,
            target_north: self.target_north,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the plan and print the summary and waypoint table
    Solve,

    /// Write the waypoint table (CSV) or the full trajectory (JSON)
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Render the vertical section as an SVG chart
    Plot {
        #[arg(long, short)]
        output: PathBuf,

        /// Canvas width in pixels (overrides [render].width)
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height in pixels (overrides [render].height)
        #[arg(long)]
        height: Option<f64>,

        /// Free margin on every side in pixels (overrides [render].margin)
        #[arg(long)]
        margin: Option<f64>,

        /// Interpolation steps per arc (overrides [render].samples_per_arc)
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Write a starter plan file
    InitPlan {
        #[arg(long, short, default_value = "well_plan.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

// ============================================================================
// Plan Assembly
// ============================================================================

/// Load the plan, apply command-line overrides, validate, and install it
/// as the process-wide config.
fn load_plan(args: &CliArgs) -> Result<()> {
    let mut plan = match &args.plan {
        Some(path) => PlanConfig::load_from_file(path)
            .with_context(|| format!("Failed to load plan {}", path.display()))?,
        None => PlanConfig::load(),
    };

    if let Some(profile) = args.profile {
        plan.well.profile = profile;
    }
    plan.parameters = plan.parameters.overlay(&args.params.to_parameters());

    if let Command::Plot {
        width,
        height,
        margin,
        samples,
        ..
    } = &args.command
    {
        let r = &mut plan.render;
        r.width = width.unwrap_or(r.width);
        r.height = height.unwrap_or(r.height);
        r.margin = margin.unwrap_or(r.margin);
        r.samples_per_arc = samples.unwrap_or(r.samples_per_arc);
    }

    plan.validate().context("Invalid plan after applying command-line overrides")?;

    info!(
        "Well: {} | Field: {} | Profile: {}",
        plan.well.name,
        if plan.well.field.is_empty() {
            "unset"
        } else {
            plan.well.field.as_str()
        },
        plan.well.profile
    );
    config::init(plan);
    Ok(())
}

fn solve_plan() -> Result<SolvedTrajectory> {
    let plan = config::get();
    let trajectory = solve(plan.well.profile, &plan.parameters)
        .with_context(|| format!("Cannot solve {} for well {}", plan.well.profile, plan.well.name))?;
    info!(
        waypoints = trajectory.waypoints.len(),
        total_md = trajectory.total_measured_depth(),
        "Trajectory solved"
    );
    Ok(trajectory)
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = contents.len(), "Output written");
        }
        None => print!("{contents}"),
    }
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn run_solve() -> Result<()> {
    let trajectory = solve_plan()?;
    let plan = config::get();
    let table = WaypointTable::with_format(
        &trajectory,
        plan.report.precision,
        &plan.report.length_unit,
    );

    println!();
    println!("  {} - {}", plan.well.name, trajectory.well_type);
    println!();
    for line in trajectory.summary.to_string().lines() {
        println!("  {line}");
    }
    println!();
    print!("{}", table.to_text());
    Ok(())
}

fn run_export(format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let trajectory = solve_plan()?;
    let plan = config::get();
    let contents = match format {
        ExportFormat::Csv => WaypointTable::with_format(
            &trajectory,
            plan.report.precision,
            &plan.report.length_unit,
        )
        .to_csv(),
        ExportFormat::Json => {
            let report = TrajectoryReport::new(
                &plan.well.name,
                &trajectory,
                plan.report.precision,
                &plan.report.length_unit,
            )?;
            let mut json = report.to_json()?;
            json.push('\n');
            json
        }
    };
    write_output(output, &contents)
}

fn run_plot(output: &Path) -> Result<()> {
    let trajectory = solve_plan()?;
    let plan = config::get();
    let r = &plan.render;

    let path = sample_with(&trajectory, r.samples_per_arc);
    let projection = project_with_ticks(&path, r.width, r.height, r.margin, r.tick_count);
    let svg = render_svg(&projection, &plan.well.name, &plan.report.length_unit);

    info!(
        points = path.len(),
        scale = projection.scale,
        "Projected {}x{} chart",
        r.width,
        r.height
    );
    write_output(Some(output), &svg)
}

fn run_init_plan(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    PlanConfig::template()
        .save_to_file(output)
        .with_context(|| format!("Failed to write plan {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Command::InitPlan { output, force } = &args.command {
        return run_init_plan(output, *force);
    }

    load_plan(&args)?;

    match &args.command {
        Command::Solve => run_solve(),
        Command::Export { format, output } => run_export(*format, output.as_deref()),
        Command::Plot { output, .. } => run_plot(output),
        Command::InitPlan { .. } => Ok(()),
    }
}
