use anyhow::Context;
use clap::Parser;
use generator::profile::{FrameSynthesizer, ScenarioConfig};
use log::warn;
use pilotcore::math::geometry::Point;
use pilotcore::prelude::StrategyKind;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use workflow::config::RunConfig;
use workflow::runner::CyclePilot;

mod generator;
mod workflow;

/// Assumed wall-clock interval between telemetry frames, used only by the
/// offline kinematics.
const CYCLE_SECONDS: f32 = 0.1;

#[derive(Parser)]
#[command(author, version, about = "Delivery pilot control-loop driver")]
struct Args {
    /// Steering strategy: zonal or bearing
    #[arg(long, default_value = "zonal")]
    strategy: String,
    /// Load a run config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log every newly registered tree
    #[arg(long, default_value_t = false)]
    trees: bool,
    /// Log every newly registered delivery site
    #[arg(long, default_value_t = false)]
    sites: bool,
    /// Fly a synthetic scenario instead of reading frames from stdin
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Number of cycles to fly in offline mode
    #[arg(long, default_value_t = 400)]
    cycles: u16,
    /// Scenario seed for offline mode
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn parse_strategy(name: &str) -> StrategyKind {
    match name.to_ascii_lowercase().as_str() {
        "zonal" => StrategyKind::Zonal,
        "bearing" => StrategyKind::Bearing,
        other => {
            warn!("unknown strategy '{}', falling back to zonal", other);
            StrategyKind::Zonal
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let run_config = if let Some(path) = &args.config {
        RunConfig::load(path)?
    } else {
        RunConfig::default()
    };
    let strategy = if args.config.is_some() {
        run_config.strategy
    } else {
        parse_strategy(&args.strategy)
    };
    let pilot_config = run_config.to_pilot_config(args.trees, args.sites);
    let mut pilot = CyclePilot::new(pilot_config.clone(), strategy);

    if args.offline {
        run_offline(&mut pilot, &pilot_config, args.cycles, args.seed)?;
        return Ok(());
    }

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let cycles = pilot
        .run(&mut stdin, &mut stdout)
        .context("piloting the frame stream")?;
    eprintln!(
        "Session complete -> cycles {}, drops {}",
        cycles,
        pilot.metrics().drops()
    );
    Ok(())
}

/// Flies a synthetic scenario end to end and writes a JSON summary report.
fn run_offline(
    pilot: &mut CyclePilot,
    config: &pilotcore::prelude::PilotConfig,
    cycles: u16,
    seed: u64,
) -> anyhow::Result<()> {
    let scenario = ScenarioConfig {
        seed,
        ..Default::default()
    };
    let wind = scenario.wind;
    let mut synth = FrameSynthesizer::new(scenario, config.clone());

    let mut vehicle = Point::new(0.0, 0.0);
    for timestamp in 0..cycles {
        let frame = synth.frame(timestamp, vehicle);
        let command = pilot.step(&frame);

        vehicle.x += (config.max_airspeed + wind.x) * CYCLE_SECONDS;
        vehicle.y -= (command.lateral_airspeed + wind.y) * CYCLE_SECONDS;
    }

    println!(
        "Offline run -> cycles {}, drops {}, trees tracked {}, sites pending {}",
        pilot.metrics().cycles(),
        pilot.metrics().drops(),
        pilot.tracker().trees().len(),
        pilot.tracker().sites().len()
    );

    let report = serde_json::json!({
        "cycles": pilot.metrics().cycles(),
        "drops": pilot.metrics().drops(),
        "final_position": { "x": vehicle.x, "y": vehicle.y },
        "trees_tracked": pilot.tracker().trees(),
        "sites_pending": pilot.tracker().sites(),
    });
    let report_path = PathBuf::from("tools/data/offline_run.json");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(&report_path)
        .with_context(|| format!("creating report {}", report_path.display()))?;
    file.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;
    Ok(())
}
