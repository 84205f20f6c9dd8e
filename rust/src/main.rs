use std::env;
use std::process;
use std::thread;
use std::time::Instant;

use dartboard::config::{self, parse_arg};
use dartboard::{dispatcher, PiEstimate, ResultsFile, RunConfig, RunReport};
use log::{error, info};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [total_samples] [workers] [results_file]", program);
    eprintln!("  total_samples: defaults to {}", config::DEFAULT_TOTAL_SAMPLES);
    eprintln!("  workers: defaults to {}", config::DEFAULT_WORKERS);
    eprintln!("  results_file: defaults to {}", config::DEFAULT_RESULTS_FILE);
}

fn run(config: &RunConfig, results_path: &str) -> dartboard::Result<()> {
    config.validate()?;
    // Opened up front so a bad path fails before any work is done.
    let mut results = ResultsFile::open(results_path)?;

    info!("starting {} dart boards", config.workers);
    let start = Instant::now();
    let tally = dispatcher::run(config)?;
    let elapsed = start.elapsed();

    let estimate = PiEstimate::new(tally.hits, tally.samples, config::REFERENCE_PI);
    println!("Total number of darts thrown = {}", tally.samples);
    println!("Final hit count = {}", tally.hits);
    println!("Pi approx   = {} using {} darts", estimate.approx, tally.samples);
    println!("Pi actually = {}  Error = {}%", estimate.reference, estimate.error_pct);
    info!("elapsed time = {:?}", elapsed);

    results.append(&RunReport {
        estimate,
        samples: tally.samples,
        elapsed,
    })?;
    info!("results appended to {}", results.path().display());
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let parsed = parse_arg("total_samples", args.get(1), config::DEFAULT_TOTAL_SAMPLES)
        .and_then(|total| {
            let workers = parse_arg("workers", args.get(2), config::DEFAULT_WORKERS)?;
            Ok(RunConfig::new(total).with_workers(workers))
        });
    let config = match parsed {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(&args[0]);
            process::exit(1);
        }
    };
    let results_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(config::DEFAULT_RESULTS_FILE);

    let cores = thread::available_parallelism().map_or(1, |n| n.get());
    println!("Max cores = {}", cores);

    if let Err(e) = run(&config, results_path) {
        error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}
