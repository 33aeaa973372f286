//! Move oracle: the external service that suggests the automated player's
//! next column, plus the worker plumbing that keeps its requests off the
//! frame loop.

mod contract;
mod http;
mod pending;
mod process;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{OracleBackend, OracleConfig};
use crate::error::ConfigError;

pub use contract::{parse_column, MoveOracle};
pub use http::HttpOracle;
pub use pending::{CancelToken, PendingSuggestion};
pub use process::ProcessOracle;

/// Build the oracle client selected by the configuration.
pub fn from_config(config: &OracleConfig) -> Result<Arc<dyn MoveOracle>, ConfigError> {
    match config.backend {
        OracleBackend::Http => {
            let timeout = config.timeout_secs.map(Duration::from_secs);
            Ok(Arc::new(HttpOracle::new(config.url.clone(), timeout)))
        }
        OracleBackend::Process => {
            let program = config.program.clone().ok_or_else(|| {
                ConfigError::Validation("oracle.program is required for the process backend".into())
            })?;
            Ok(Arc::new(ProcessOracle::new(program)))
        }
    }
}
