use anyhow::{bail, Result};
use clap::Parser;
use smart_traffic::simulation::{
    Approach, CadenceSpawner, SimConfig, SimWorld, MAX_GREEN, MIN_GREEN, PRIORITY_CHANCE,
    PRIORITY_SPEED, SPAWN_INTERVAL, TICKS_PER_SECOND, VEHICLE_SPEED,
};

#[derive(Parser)]
#[command(name = "smart_traffic")]
#[command(about = "Four-way intersection with an adaptive signal controller")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 60 * TICKS_PER_SECOND)]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value_t = 1.0 / TICKS_PER_SECOND as f32)]
    delta: f32,

    /// Seed for reproducible vehicle spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Shortest green phase in seconds
    #[arg(long, default_value_t = MIN_GREEN)]
    min_green: f32,

    /// Longest green phase in seconds
    #[arg(long, default_value_t = MAX_GREEN)]
    max_green: f32,

    /// Speed of regular vehicles in units per tick
    #[arg(long, default_value_t = VEHICLE_SPEED)]
    vehicle_speed: f32,

    /// Speed of priority vehicles in units per tick
    #[arg(long, default_value_t = PRIORITY_SPEED)]
    priority_speed: f32,

    /// Approach that starts green (up, down, left, right)
    #[arg(long, default_value = "up")]
    initial_approach: Approach,

    /// Idle ticks between two spawns
    #[arg(long, default_value_t = SPAWN_INTERVAL)]
    spawn_interval: u32,

    /// Probability that a spawned vehicle is a priority vehicle
    #[arg(long, default_value_t = PRIORITY_CHANCE)]
    priority_chance: f64,

    /// Real milliseconds to pause after each simulated second
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            min_green: self.min_green,
            max_green: self.max_green,
            vehicle_speed: self.vehicle_speed,
            priority_speed: self.priority_speed,
            initial_approach: self.initial_approach,
            ..SimConfig::default()
        }
    }

    fn spawner(&self) -> Result<CadenceSpawner> {
        match self.seed {
            Some(seed) => {
                CadenceSpawner::new_with_seed(self.spawn_interval, self.priority_chance, seed)
            }
            None => CadenceSpawner::new(self.spawn_interval, self.priority_chance),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,smart_traffic=info"),
    )
    .init();

    let cli = Cli::parse();

    if let Err(err) = run_headless(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    if !cli.delta.is_finite() || cli.delta <= 0.0 {
        bail!("Tick delta must be a positive number of seconds (got {})", cli.delta);
    }

    let mut world = SimWorld::new(cli.config(), Box::new(cli.spawner()?))?;

    println!("Running intersection simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", cli.ticks, cli.delta);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;
    println!("Printing a summary every {} ticks", ticks_per_second);
    println!();

    println!("Initial state:");
    world.print_summary();
    println!();

    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
        }

        println!("--- After tick {} ({:.1}s simulated time) ---", tick, world.time);
        world.print_summary();
        println!();

        if tick < cli.ticks && cli.pace_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(cli.pace_ms));
        }
    }

    world.stats().log_completion();
    Ok(())
}
