use std::path::PathBuf;

use clap::Parser;
use rona::prelude::*;

/// Run an outbreak in a box and print the census over time.
#[derive(Parser, Debug)]
#[command(name = "basic")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(short = 'n', long)]
    population: Option<usize>,
    #[arg(long)]
    speed: Option<f64>,
    #[arg(long)]
    infection_radius: Option<f64>,
    #[arg(long)]
    infection_chance: Option<f64>,
    #[arg(long)]
    death_chance: Option<f64>,
    #[arg(long)]
    recovery_chance: Option<f64>,
    #[arg(short, long)]
    steps: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,

    /// Keep going past the outbreak's end
    #[arg(long)]
    full: bool,
}

impl Args {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.population {
            config.population = v;
        }
        if let Some(v) = self.speed {
            config.speed = v;
        }
        if let Some(v) = self.infection_radius {
            config.infection_radius = v;
        }
        if let Some(v) = self.infection_chance {
            config.infection_chance = v;
        }
        if let Some(v) = self.death_chance {
            config.death_chance = v;
        }
        if let Some(v) = self.recovery_chance {
            config.recovery_chance = v;
        }
        if let Some(v) = self.steps {
            config.steps = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    args.apply(&mut config);
    tracing::info!("starting with {:?}", config);

    let mut simulation = Simulation::from_config(&config)?;
    if args.full {
        simulation.run(config.steps);
    } else {
        simulation.run_until(config.steps, |census| census.sick() == 0);
    }

    let output = simulation.output();
    println!("{}", output.header());
    for record in simulation.history() {
        println!("{}", output.row(record));
    }
    Ok(())
}
