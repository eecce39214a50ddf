//! Failures of the `glass-fx` binary and the exit codes scripts see.
//!
//! - 0:  success
//! - 2:  clap rejected the arguments before `run` started
//! - 10: the effect layer refused the request: `--warp` or the effect name is
//!   not registered, the warp moves no pixel, or `-W`/`-H` is zero
//! - 11: a map or preview PNG could not be written
//! - 12: `--params` is not JSON or `--pointer` is not a finite `x,y` pair
//! - 13: a `--json` report could not be rendered

use glass_fx_core::FxError;
use std::fmt;

/// A failed `map`, `simulate` or `list` invocation.
///
/// `FxError::Io` from the snapshot writer is lifted into [`CliError::Io`] so
/// a full disk and an unknown warp exit differently.
pub enum CliError {
    /// Rejected by the registry, the displacement generator or a scene check.
    Effect(FxError),
    /// PNG output path could not be created or written.
    Io(String),
    /// `--params` or `--pointer` that clap accepted as a string but that does
    /// not parse.
    Input(String),
    /// JSON report rendering.
    Serialization(String),
}

impl CliError {
    /// Process exit code, see the module docs.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Effect(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Effect(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

/// Routes snapshot write failures to `Io`; everything else is an effect error.
impl From<FxError> for CliError {
    fn from(e: FxError) -> Self {
        match e {
            FxError::Io(msg) => CliError::Io(msg),
            other => CliError::Effect(other),
        }
    }
}

/// Only report rendering reaches this; `--params` parse errors are mapped to
/// `Input` at the call site.
impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
