// error.rs
//
// Every failure in vmfleet ends the process, so there is a single error type
// that main() prints before exiting.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {source_name} into YAML: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{hostname} failed to run `{command}`: {reason}")]
    Execution {
        hostname: String,
        command: String,
        reason: String,
    },

    #[error("no VM named {0} in the inventory")]
    UnknownVm(String),

    #[error("no resource group named {0}")]
    UnknownGroup(String),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, FleetError>;
