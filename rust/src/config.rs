use thiserror::Error;

pub const DEFAULT_TOTAL_SAMPLES: u64 = 100_000_000;
pub const DEFAULT_WORKERS: usize = 4;
/// Roughly how many batches a default run is cut into.
pub const BATCHES_PER_RUN: u64 = 1000;
/// Constant seed keeps runs repeatable.
pub const DEFAULT_SEED: u64 = 999;
pub const REFERENCE_PI: f64 = 3.14159;
pub const DEFAULT_RESULTS_FILE: &str = "PiResults.txt";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("total sample count must be greater than zero")]
    ZeroSamples,
    #[error("at least one worker is required")]
    ZeroWorkers,
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("invalid value {value:?} for {name}")]
    InvalidArgument { name: &'static str, value: String },
}

/// Parameters of a single estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub total_samples: u64,
    pub workers: usize,
    pub batch_size: u64,
    pub seed: u64,
}

impl RunConfig {
    /// Builds a config for `total_samples` with the default worker count and seed.
    /// The batch size is derived so a run is split into about
    /// [`BATCHES_PER_RUN`] batches, never less than one sample each.
    pub fn new(total_samples: u64) -> Self {
        RunConfig {
            total_samples,
            workers: DEFAULT_WORKERS,
            batch_size: (total_samples / BATCHES_PER_RUN).max(1),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }

    /// Upper bound on the samples credited once the target is reached.
    pub fn max_credited(&self) -> u64 {
        self.total_samples.div_ceil(self.batch_size) * self.batch_size
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig::new(DEFAULT_TOTAL_SAMPLES)
    }
}

/// Parses an optional positional argument, falling back to `default` when absent.
pub fn parse_arg<T: std::str::FromStr>(
    name: &'static str,
    arg: Option<&String>,
    default: T,
) -> Result<T, ConfigError> {
    match arg {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidArgument {
            name,
            value: s.clone(),
        }),
    }
}
