//! Command-line front-end: cluster a categorical dataset file.

use clap::Parser;
use regnier::{
    CutSearch, DatasetReader, Formulation, GoodLpSolver, ModelConfig, RegnierProblem, MISSING,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Whitespace-delimited dataset, one record per line.
    dataset: PathBuf,
    /// Model formulation: base, alpha, alpha-plus, beta, beta-plus, gamma.
    #[arg(long, short, default_value = "base")]
    formulation: Formulation,
    /// Explicit cut (alpha and beta only).
    #[arg(long)]
    cut: Option<i32>,
    /// Solve the LP relaxation instead of the integer program.
    #[arg(long)]
    relax: bool,
    /// Token marking a missing value.
    #[arg(long, default_value = MISSING)]
    missing: String,
    /// Use the threshold sweep instead of the union-find pass for heuristic cuts.
    #[arg(long)]
    sweep: bool,
    /// Write the generated model in LP format to this path.
    #[arg(long)]
    lp_out: Option<PathBuf>,
    /// Only generate (and optionally export) the model.
    #[arg(long)]
    no_solve: bool,
    /// Log model generation and heuristic details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let dataset = DatasetReader::new()
        .with_missing_token(args.missing.as_str())
        .read_path(&args.dataset)?;
    let problem = RegnierProblem::new(&dataset);

    let mut config = ModelConfig::new(args.formulation).with_relaxation(args.relax);
    if let Some(cut) = args.cut {
        config = config.with_cut(cut);
    }
    if args.sweep {
        config = config.with_cut_search(CutSearch::ThresholdSweep);
    }
    config.validate()?;

    if let Some(path) = &args.lp_out {
        let mut out = BufWriter::new(File::create(path)?);
        let _ = problem.write_lp(&config, &mut out)?;
        out.flush()?;
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    if args.no_solve {
        let model = problem.build_model(&config)?;
        let summary = serde_json::json!({
            "formulation": model.formulation(),
            "cut": model.cut(),
            "num_variables": model.num_variables(),
            "num_constraints": model.num_constraints(),
            "heuristic": model.heuristic(),
        });
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
    } else {
        let solution = problem.solve(&config, &GoodLpSolver::new())?;
        serde_json::to_writer_pretty(&mut stdout, &solution)?;
    }
    writeln!(stdout)?;
    Ok(())
}
