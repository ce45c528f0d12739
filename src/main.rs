use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::PathBuf;

use rail_dispatch::map::{generate_map, load_map, read_station_names, write_map_file};
use rail_dispatch::output::{format_paths, format_turns, Palette};
use rail_dispatch::simulation::run_dispatch;

#[derive(Parser)]
#[command(name = "rail_dispatch")]
#[command(about = "Route trains through a rail network without collisions")]
struct Cli {
    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find routes between two stations and simulate the trains
    Run(RunArgs),
    /// Generate a random map file
    Generate(GenerateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the network map file
    map: PathBuf,

    /// Station the trains depart from
    start: String,

    /// Station the trains travel to
    end: String,

    /// Number of trains to dispatch
    #[arg(value_parser = parse_train_count)]
    trains: usize,
}

#[derive(Args)]
struct GenerateArgs {
    /// Text file with one station name per line
    names: PathBuf,

    /// Output map file (".map" is appended if missing)
    output: PathBuf,

    /// Number of stations to generate
    stations: usize,

    /// Seed for reproducible maps
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_train_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Number of trains must be greater than 0".to_string()),
        Ok(count) => Ok(count),
        Err(_) => Err("Number of trains must be a positive integer".to_string()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let palette = Palette::new(!cli.no_color && std::io::stdout().is_terminal());

    let result = match cli.command {
        Command::Run(args) => run(args, palette),
        Command::Generate(args) => generate(args),
    };

    if let Err(e) = result {
        eprintln!("{}", palette.error(&format!("{e:#}")));
        std::process::exit(1);
    }
}

/// Load the map, dispatch the trains and print routes and movements
fn run(args: RunArgs, palette: Palette) -> Result<()> {
    let network = load_map(&args.map)?;

    if !network.contains(&args.start) {
        bail!("Start station {:?} does not exist", args.start);
    }
    if !network.contains(&args.end) {
        bail!("End station {:?} does not exist", args.end);
    }
    if args.start == args.end {
        bail!(
            "Start and end stations, {:?} and {:?} are the same",
            args.start,
            args.end
        );
    }

    let report = run_dispatch(&network, &args.start, &args.end, args.trains);
    if !report.has_route() {
        bail!(
            "No path between {:?} and {:?} stations",
            args.start,
            args.end
        );
    }

    println!("{}", format_paths(&report.paths, palette));
    print!("{}", format_turns(&report.turns, palette));
    Ok(())
}

/// Generate a random map file from a list of station names
fn generate(args: GenerateArgs) -> Result<()> {
    let names = read_station_names(&args.names)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let map = generate_map(&names, args.stations, &mut rng)?;
    let path = write_map_file(&args.output, &map)?;

    println!(
        ".map file successfully created: {} with {} stations.",
        path.display(),
        map.stations.len()
    );
    Ok(())
}
