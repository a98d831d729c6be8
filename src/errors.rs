use cadence_config::ConfigError;
use cadence_core::CoreError;
use cadence_domain::DomainError;
use thiserror::Error;

/// Error type surfaced by the [`crate::Cadence`] facade.
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
