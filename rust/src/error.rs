use thiserror::Error;

use crate::config::ConfigError;
use crate::dispatcher::DispatchError;
use crate::results::ResultsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Results(#[from] ResultsError),
}
