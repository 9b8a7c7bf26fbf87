use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fpm::grid::{DEFAULT_LIMIT, DEFAULT_POINTS};
use fpm::params::{DEFAULT_A1, DEFAULT_A2};
use fpm::{Evaluator, FieldSummary, Grid, ModelParams};
use log::info;
use serde_json::json;

/// Default a2 values of the convergence sweep, approaching 1.
const SWEEP_A2: [f64; 4] = [0.875, 0.9375, 0.96875, 0.999];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct GridArgs {
  /// Number of samples along each axis
  #[arg(long, default_value_t = DEFAULT_POINTS)]
  points: usize,
  /// Half-width of the square sampled domain
  #[arg(long, default_value_t = DEFAULT_LIMIT)]
  limit: f64,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate f+ and f- over a square grid and summarize both fields
  Grid {
    #[arg(long, default_value_t = DEFAULT_A1, allow_negative_numbers = true)]
    a1: f64,
    #[arg(long, default_value_t = DEFAULT_A2, allow_negative_numbers = true)]
    a2: f64,
    #[command(flatten)]
    grid: GridArgs,
  },
  /// Evaluate the model at a single (v1, v2) point
  Point {
    #[arg(long, default_value_t = DEFAULT_A1, allow_negative_numbers = true)]
    a1: f64,
    #[arg(long, default_value_t = DEFAULT_A2, allow_negative_numbers = true)]
    a2: f64,
    #[arg(allow_negative_numbers = true)]
    v1: f64,
    #[arg(allow_negative_numbers = true)]
    v2: f64,
  },
  /// Summarize f+ for a fixed a1 and a sequence of a2 values
  Sweep {
    #[arg(
      long,
      default_value_t = std::f64::consts::FRAC_1_SQRT_2,
      allow_negative_numbers = true
    )]
    a1: f64,
    #[arg(
      long,
      num_args = 1..,
      default_values_t = SWEEP_A2,
      allow_negative_numbers = true
    )]
    a2: Vec<f64>,
    #[command(flatten)]
    grid: GridArgs,
  },
}

fn run_grid(a1: f64, a2: f64, args: &GridArgs) -> anyhow::Result<()> {
  let params = ModelParams::new(a1, a2)?;
  let grid = Grid::square(args.points, args.limit)?;
  let (plus, minus) = Evaluator::new(params).summarize(&grid);
  let (rows, cols) = grid.shape();
  println!(
    "{}",
    json!({
      "a1": params.a1(),
      "a2": params.a2(),
      "b1": params.b1(),
      "b2": params.b2(),
      "shape": [rows, cols],
      "f_plus": plus.to_json(),
      "f_minus": minus.to_json(),
    })
  );
  Ok(())
}

fn run_point(a1: f64, a2: f64, v1: f64, v2: f64) -> anyhow::Result<()> {
  let params = ModelParams::new(a1, a2)?;
  let value = Evaluator::new(params).point(v1, v2);
  println!(
    "{}",
    json!({
      "v1": v1,
      "v2": v2,
      "f0": value.f0,
      "f1": value.f1,
      "f2": value.f2,
      "valid": value.valid,
      "f_plus": value.f_plus,
      "f_minus": value.f_minus,
    })
  );
  Ok(())
}

fn run_sweep(a1: f64, a2_values: &[f64], args: &GridArgs) -> anyhow::Result<()> {
  let grid = Grid::square(args.points, args.limit)?;
  for &a2 in a2_values {
    info!("processing a2 = {a2:.3}");
    let params = ModelParams::new(a1, a2)
      .with_context(|| format!("sweep step a2 = {a2}"))?;
    let fields = Evaluator::new(params).evaluate(&grid);
    let summary = FieldSummary::of(&fields.f_plus, &fields.mask)?;
    println!(
      "{}",
      json!({ "a1": a1, "a2": a2, "f_plus": summary.to_json() })
    );
  }
  Ok(())
}

fn main() {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  let cli = Cli::parse();

  let result = match &cli.command {
    Commands::Grid { a1, a2, grid } => run_grid(*a1, *a2, grid),
    Commands::Point { a1, a2, v1, v2 } => run_point(*a1, *a2, *v1, *v2),
    Commands::Sweep { a1, a2, grid } => run_sweep(*a1, a2, grid),
  };

  if let Err(e) = result {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}
