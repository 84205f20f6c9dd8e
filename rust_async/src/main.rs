mod farm;

use std::process;
use std::time::Instant;

use dartboard::config::{self, parse_arg};
use dartboard::{PiEstimate, ResultsFile, RunConfig, RunReport};
use log::{error, info};

async fn run(config: &RunConfig, results_path: &str) -> dartboard::Result<()> {
    config.validate()?;
    let mut results = ResultsFile::open(results_path)?;

    let start = Instant::now();
    let tally = farm::run_async(config).await?;
    let elapsed = start.elapsed();

    let estimate = PiEstimate::new(tally.hits, tally.samples, config::REFERENCE_PI);
    println!("Monte Carlo Pi Estimation (Async)");
    println!("Total samples: {}", tally.samples);
    println!("Points inside circle: {}", tally.hits);
    println!("Pi estimate: {:.6}", estimate.approx);
    println!("Error: {:.6}%", estimate.error_pct);
    info!("elapsed time = {:?}", elapsed);

    results.append(&RunReport {
        estimate,
        samples: tally.samples,
        elapsed,
    })?;
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = parse_arg("total_samples", args.get(1), config::DEFAULT_TOTAL_SAMPLES)
        .and_then(|total| {
            let tasks = parse_arg("tasks", args.get(2), config::DEFAULT_WORKERS)?;
            Ok(RunConfig::new(total).with_workers(tasks))
        });
    let config = match parsed {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} [total_samples] [tasks] [results_file]", args[0]);
            process::exit(1);
        }
    };
    let results_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(config::DEFAULT_RESULTS_FILE);

    if let Err(e) = run(&config, results_path).await {
        error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}
