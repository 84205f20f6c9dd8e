use dartboard::config::REFERENCE_PI;
use dartboard::monte_carlo::{throw_darts, worker_rng};
use dartboard::{dispatcher, PiEstimate, RunConfig};

#[test]
fn one_board_one_batch() {
    let config = RunConfig::new(1_000).with_workers(1).with_batch_size(1_000);
    let tally = dispatcher::run(&config).unwrap();

    assert_eq!(tally.samples, 1_000);
    let expected = throw_darts(&mut worker_rng(config.seed, 0), 1_000);
    assert_eq!(tally.hits, expected);
}

#[test]
fn four_boards_land_near_pi() {
    let config = RunConfig::new(4_000).with_workers(4).with_batch_size(1_000);
    let tally = dispatcher::run(&config).unwrap();

    assert!(tally.samples >= 4_000);
    let estimate = PiEstimate::new(tally.hits, tally.samples, REFERENCE_PI);
    assert!(estimate.error_pct < 10.0, "estimate {} too far off", estimate.approx);
}

#[test]
fn default_batch_size_run_stays_within_overshoot_bound() {
    let config = RunConfig::new(2_000_000);
    let tally = dispatcher::run(&config).unwrap();

    assert_eq!(config.batch_size, 2_000);
    assert_eq!(tally.samples % config.batch_size, 0);
    assert!(tally.samples >= config.total_samples);
    assert!(tally.samples - config.total_samples < config.workers as u64 * config.batch_size);

    let estimate = PiEstimate::new(tally.hits, tally.samples, REFERENCE_PI);
    assert!(estimate.error_pct < 1.0);
}

#[test]
fn repeated_single_board_runs_agree() {
    let config = RunConfig::new(20_000)
        .with_workers(1)
        .with_batch_size(2_500)
        .with_seed(12345);
    let runs: Vec<_> = (0..3).map(|_| dispatcher::run(&config).unwrap()).collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
}
