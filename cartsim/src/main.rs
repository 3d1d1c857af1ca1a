use cartsim::{run_2d, ManualClock, ManualScheduler, Runner, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; bare names are looked up in `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run without a window using a fixed frame period
    #[arg(long)]
    headless: bool,

    /// Number of experiments to run (headless)
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Frame period in milliseconds (headless)
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Give up on a run after this many frames (headless)
    #[arg(long, default_value_t = 10_000)]
    max_frames: usize,

    #[arg(long, allow_hyphen_values = true)]
    mass: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    force: Option<f64>,

    /// Acceleration to check against every row of the results table
    #[arg(long, allow_hyphen_values = true)]
    grade: Option<f64>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn run_headless(scenario: Scenario, args: &Args) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut runner = Runner::new(scenario.into_controller(), ManualClock::default(), ManualScheduler::new());

    for _ in 0..args.runs {
        runner.start();
        if runner.run_frames(args.frame_ms, args.max_frames).is_none() {
            warn!(max_frames = args.max_frames, "cart did not reach the finish line, resetting");
            runner.reset();
        }
    }

    let controller = runner.controller();
    println!("{}", controller.ledger());

    if let Some(user) = args.grade {
        for (row, _) in controller.ledger().rows() {
            let verdict = controller.submit_grade(row, user)?;
            println!("#{row}: {verdict}");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(m) = args.mass {
        scenario_cfg.cart.mass = m;
    }
    if let Some(f) = args.force {
        scenario_cfg.cart.force = f;
    }
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        run_headless(scenario, &args)?;
    } else {
        run_2d(scenario);
    }

    Ok(())
}
