//! Monte Carlo estimate of pi, farmed out to a fixed set of dart board threads.

pub mod config;
pub mod dartboard;
pub mod dispatcher;
pub mod error;
pub mod monte_carlo;
pub mod results;

pub use config::RunConfig;
pub use dispatcher::Tally;
pub use error::{Error, Result};
pub use monte_carlo::PiEstimate;
pub use results::{ResultsFile, RunReport};
