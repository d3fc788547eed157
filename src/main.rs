//! wellpath - survey geometry and formation tops from the command line
//!
//! Usage:
//!   wellpath survey data/F-9A_survey.csv --max-points 200 --format json
//!   wellpath tops data/F-9A_tops.toml --md 2450
//!   wellpath plan --from 0 0 1500 --to 350 -120 2400 --md-start 1500 --md-end 2500

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use wellpath::config::{self, EngineConfig};
use wellpath::trajectory::{solve_straight_to_target, ArrayName, Point3, TieIn, Trajectory};
use wellpath::{survey, FormationTops};

#[derive(Parser, Debug)]
#[command(name = "wellpath")]
#[command(about = "Well trajectory geometry and formation tops")]
#[command(version)]
struct CliArgs {
    /// Engine config TOML (otherwise $WELLPATH_CONFIG, then ./wellpath.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Import a survey CSV and print its stations
    Survey {
        /// CSV with an MD column plus TVD, DX/DY or INC/AZI columns
        path: PathBuf,

        /// Station budget; defaults to [display] max_points
        #[arg(long)]
        max_points: Option<usize>,

        /// Tie-in easting
        #[arg(long, default_value = "0")]
        xhead: f64,

        /// Tie-in northing
        #[arg(long, default_value = "0")]
        yhead: f64,

        /// Tie-in TVD
        #[arg(long, default_value = "0")]
        datum: f64,

        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// Print formation intervals, or the formation at one MD
    Tops {
        /// Tops TOML with [[formation]] tables
        path: PathBuf,

        /// Report only the formation containing this MD
        #[arg(long)]
        md: Option<f64>,
    },

    /// Straight-segment INC/AZI between two points
    Plan {
        /// Origin easting, northing, TVD
        #[arg(long, required = true, num_args = 3, value_names = ["E", "N", "TVD"], allow_negative_numbers = true)]
        from: Vec<f64>,

        /// Target easting, northing, TVD
        #[arg(long, required = true, num_args = 3, value_names = ["E", "N", "TVD"], allow_negative_numbers = true)]
        to: Vec<f64>,

        #[arg(long)]
        md_start: f64,

        #[arg(long)]
        md_end: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let engine_config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::load(),
    };
    config::init(engine_config);

    match args.command {
        SubCommand::Survey {
            path,
            max_points,
            xhead,
            yhead,
            datum,
            format,
        } => run_survey(&path, max_points, TieIn::new(xhead, yhead, datum), format),
        SubCommand::Tops { path, md } => run_tops(&path, md),
        SubCommand::Plan {
            from,
            to,
            md_start,
            md_end,
        } => run_plan(&from, &to, md_start, md_end),
    }
}

fn run_survey(
    path: &Path,
    max_points: Option<usize>,
    tie_in: TieIn,
    format: OutputFormat,
) -> Result<()> {
    let trajectory = survey::load_csv(path, tie_in)
        .with_context(|| format!("importing survey {}", path.display()))?;

    let budget = max_points.unwrap_or(config::get().display.max_points);
    let reduced = trajectory
        .downsample(budget)
        .context("downsampling survey")?;
    info!(
        stations = trajectory.len(),
        kept = reduced.len(),
        "Survey ready"
    );

    let stdout = std::io::stdout();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(stdout.lock(), &reduced)?;
            writeln!(stdout.lock())?;
        }
        OutputFormat::Csv => write_stations_csv(stdout.lock(), &reduced)?,
    }
    Ok(())
}

fn write_stations_csv<W: Write>(out: W, trajectory: &Trajectory) -> Result<()> {
    let columns: Vec<(ArrayName, &[f64])> = ArrayName::ALL
        .into_iter()
        .filter_map(|name| trajectory.array(name).map(|a| (name, a)))
        .collect();

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|(name, _)| name.as_str()))?;
    for i in 0..trajectory.len() {
        writer.write_record(columns.iter().map(|(_, values)| format!("{:.4}", values[i])))?;
    }
    writer.flush()?;
    Ok(())
}

fn run_tops(path: &Path, md: Option<f64>) -> Result<()> {
    let tops = FormationTops::load_from_file(path)
        .with_context(|| format!("loading tops {}", path.display()))?;

    if let Some(md) = md {
        match tops.find_at_md(md) {
            Some(name) => println!("{name}"),
            None => println!("(above first top)"),
        }
        return Ok(());
    }

    for interval in tops.intervals() {
        let bottom = interval
            .bottom
            .map_or_else(|| "open".to_string(), |b| format!("{b:.2}"));
        println!("{:<24} {:>10.2} {:>10}", interval.name, interval.top, bottom);
    }
    Ok(())
}

fn run_plan(from: &[f64], to: &[f64], md_start: f64, md_end: f64) -> Result<()> {
    let point = |v: &[f64]| Point3::new(v[0], v[1], v[2]);
    let direction = solve_straight_to_target(point(to), point(from), md_start, md_end)
        .context("solving straight segment")?;
    println!("INC {:.3}  AZI {:.3}", direction.inc_deg, direction.azi_deg);
    Ok(())
}
