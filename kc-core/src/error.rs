use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reading kubeconfig '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing kubeconfig '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("no contexts found in kubeconfig")]
    EmptyConfig,
    #[error("context '{0}' not found")]
    NotFound(String),
    #[error("multiple contexts match '{name}'")]
    Ambiguous { name: String, matches: Vec<String> },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("running {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    ExternalTool {
        program: String,
        status: ExitStatus,
        output: String,
    },
    #[error("writing kubeconfig '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serializing kubeconfig")]
    Serialize(#[source] serde_yaml::Error),
    #[error("could not determine the home directory")]
    NoHomeDir,
}
