mod progress;

use clap::{Parser, ValueEnum};
use nbody_core::scenario::DEFAULT_DISK_RADIUS;
use nbody_core::{run_simulation, KernelChoice, Scenario, SimulationConfig};
use progress::ProgressReporter;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nbody")]
#[command(about = "Direct-summation 2D gravitational n-body simulation", long_about = None)]
struct Cli {
    /// Number of particles in the simulation
    #[arg(short = 'p', long, default_value_t = nbody_core::config::DEFAULT_NUM_PARTICLES)]
    num_particles: usize,

    /// Number of time steps taken
    #[arg(short = 'n', long, default_value_t = nbody_core::config::DEFAULT_N_TIME_STEPS)]
    n_time_steps: usize,

    /// Time step size for each time step
    #[arg(long, visible_alias = "dt", default_value_t = nbody_core::config::DEFAULT_TIME_STEP_SIZE)]
    time_step_size: f32,

    /// Seed for the initial particle layout
    #[arg(long)]
    seed: Option<u64>,

    /// Force kernel to use
    #[arg(long, value_enum, default_value_t = KernelArg::Lanes)]
    kernel: KernelArg,

    /// Suppress the per-step progress lines
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelArg {
    Scalar,
    Lanes,
}

impl From<KernelArg> for KernelChoice {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Scalar => KernelChoice::Scalar,
            KernelArg::Lanes => KernelChoice::Lanes,
        }
    }
}

impl From<Cli> for SimulationConfig {
    fn from(cli: Cli) -> Self {
        SimulationConfig {
            num_particles: cli.num_particles,
            n_time_steps: cli.n_time_steps,
            time_step_size: cli.time_step_size,
            seed: cli.seed,
            kernel: cli.kernel.into(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(e) = run(cli.into(), quiet) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: SimulationConfig, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let scenario = match config.seed {
        Some(seed) => Scenario::Disk {
            radius: DEFAULT_DISK_RADIUS,
            seed,
        },
        None => Scenario::random_disk(DEFAULT_DISK_RADIUS),
    };
    log::info!(
        "{} particles, {} steps of dt = {}, {:?} kernel, {:?}",
        config.num_particles,
        config.n_time_steps,
        config.time_step_size,
        config.kernel,
        scenario
    );

    let mut particles = scenario.build(config.num_particles)?;
    let mut reporter = ProgressReporter::new(config.n_time_steps, quiet);

    let start = Instant::now();
    let summary = run_simulation(
        &mut particles,
        config.time_step_size,
        &config.kernel,
        |steps: usize, elapsed: f32| reporter.on_step(steps, elapsed),
    );

    log::info!(
        "finished {} steps (t = {}) in {:.3}s",
        summary.steps,
        summary.elapsed,
        start.elapsed().as_secs_f64()
    );
    if !particles.is_finite() {
        log::warn!("particle state contains non-finite values; coincident particles?");
    }

    Ok(())
}
