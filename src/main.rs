use polarsim::{ScenarioConfig, Scenario};
use polarsim::{bench_integration, bench_step_curve};
use polarsim::logging;

use clap::Parser;
use anyhow::{Context, Result};
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, relative to the `scenarios` directory
    #[arg(short, long, default_value = "pi.yaml")]
    file_name: String,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the integration and step benchmarks instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::setup(&args.log_level)?;

    if args.bench {
        bench_integration();
        bench_step_curve()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("failed to build scenario")?;
    info!("running {} with {} solids", args.file_name, scenario.world.len());

    let view = scenario.view;
    let report = scenario.run(|world, progress| {
        if let Some(view) = &view {
            info!("\n{}", world.draw(view));
        }
        info!(
            "#{}; collisions: {} (+{}); steps/s: {:.1}; step: {:?}; time scale: {:.5}",
            progress.frame,
            progress.collisions,
            progress.collisions_since_last_frame,
            progress.steps_per_second.unwrap_or(0.0),
            progress.average_step_duration.unwrap_or_default(),
            progress.time_scale,
        );
    });

    info!(
        "done after {} frame(s): {} collision(s), {:.3} s simulated in {:.3} s",
        report.frames,
        report.collisions,
        report.simulated_secs,
        report.real_time.as_secs_f64()
    );

    Ok(())
}
