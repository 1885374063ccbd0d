use anyhow::{Context, Result};
use clap::{arg, value_parser, ArgAction, ArgMatches, Command};
use geo_tsp_ga::engine::GeneticEngine;
use geo_tsp_ga::random::RandomSource;
use geo_tsp_ga::scenario::Scenario;
use geo_tsp_ga::solver::{RunLimits, Solver};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};

fn cli() -> Command {
    Command::new("tsp-ga")
        .about("Evolves a round trip through the nodes of a scenario file")
        .arg(arg!(<SCENARIO> "Path to a scenario json file").value_parser(value_parser!(PathBuf)))
        .arg(
            arg!(--seed [SEED] "Random seed")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            arg!(--"population-size" [N] "Individuals kept per generation")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--attempts [N] "Mutation attempts per individual per generation")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"min-lifetime" [N] "Generations before a stale tour may be culled")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"gen-limit" [N] "Stop once the best tour survives this many generations")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"max-generations" [N] "Hard cap on generations")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"time-limit-ms" [MS] "Wall-clock budget in milliseconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--speed [SPEED] "Travel speed; costs become travel times when positive")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!(--"print-population" "Print the whole population after every generation")
                .action(ArgAction::SetTrue),
        )
        .arg(arg!(-v --verbose ... "Increase log verbosity").action(ArgAction::Count))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let path = matches
        .get_one::<PathBuf>("SCENARIO")
        .context("scenario path is required")?;
    let scenario = Scenario::load(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;

    let seed = matches
        .get_one::<i32>("seed")
        .copied()
        .unwrap_or(RandomSource::DEFAULT_SEED);
    let mut config = scenario.engine_config(seed);
    if let Some(&n) = matches.get_one::<usize>("population-size") {
        config = config.with_population_size(n);
    }
    if let Some(&n) = matches.get_one::<usize>("attempts") {
        config = config.with_attempts_per_iteration(n);
    }
    if let Some(&n) = matches.get_one::<u32>("min-lifetime") {
        config = config.with_min_lifetime(n);
    }
    if let Some(&speed) = matches.get_one::<f64>("speed") {
        config = config.with_speed(speed);
    }
    let limits = run_limits(&scenario, &matches);

    let mut engine = scenario.build_engine(config)?;
    info!(nodes = scenario.nodes.len(), start = %scenario.start_node, "optimizer ready");

    let report = if matches.get_flag("print-population") {
        print_population(&engine);
        let mut last = Instant::now();
        Solver::run_observed(&mut engine, &limits, None, |engine, generation| {
            println!(
                "Generation {} output (took {:.3} ms):",
                generation.generation,
                last.elapsed().as_secs_f64() * 1000.0
            );
            print_population(engine);
            last = Instant::now();
        })?
    } else {
        Solver::run(&mut engine, &limits)?
    };
    println!(
        "{:?} after {} generations ({:.1} ms/generation)",
        report.termination,
        report.generations,
        report.time_per_generation().as_secs_f64() * 1000.0
    );

    let best = engine.best();
    println!("best: {best}");
    for id in best.path() {
        match scenario.nodes.iter().find(|n| &n.id == id).and_then(|n| n.name.as_deref()) {
            Some(name) => println!("  {id} ({name})"),
            None => println!("  {id}"),
        }
    }
    Ok(())
}

fn run_limits(scenario: &Scenario, matches: &ArgMatches) -> RunLimits {
    let mut limits = scenario.run_limits();
    if let Some(&n) = matches.get_one::<u32>("gen-limit") {
        limits = limits.with_generation_limit(n);
    }
    if let Some(&n) = matches.get_one::<usize>("max-generations") {
        limits = limits.with_max_generations(n);
    }
    if let Some(&ms) = matches.get_one::<u64>("time-limit-ms") {
        limits = limits.with_time_limit_ms(ms);
    }
    limits
}

fn print_population(engine: &GeneticEngine) {
    for (i, tour) in engine.population().iter().enumerate() {
        println!("{i}) {tour}");
    }
}
