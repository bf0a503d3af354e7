use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("No prebuilt torch wheel for Python {major}.{minor}")]
    UnsupportedPython { major: usize, minor: usize },

    #[error("Invalid nightly build date: {0:?}")]
    InvalidNightlyDate(String),

    #[error("Cannot parse Python version: {0}")]
    InvalidPythonVersion(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Python version probe failed with status {0:?}")]
    PythonProbeFailed(Option<i32>),

    #[error("pip install failed with status {code:?}")]
    PipFailed { code: Option<i32> },
}

/// Installs the TensorFlow and PyTorch packages for a build configuration
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command-line values that take precedence over the environment.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Torch version, e.g. 1.2.0 or 1.1.0.dev20190601
    #[arg(long, global = true)]
    pub torch_version: Option<String>,

    /// TensorFlow version, e.g. 1.12.0
    #[arg(long, global = true)]
    pub tensorflow_version: Option<String>,

    /// Install the GPU variants
    #[arg(long, global = true, default_value = "false")]
    pub gpu: bool,

    /// CUDA toolkit version, e.g. 10.0
    #[arg(long, global = true)]
    pub cuda_version: Option<String>,

    /// Python interpreter used to run pip
    #[arg(long, global = true)]
    pub python: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Console,
    Json,
}

impl Format {
    pub fn is_json(&self) -> bool {
        matches!(self, Format::Json)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and install both frameworks (the default)
    Install,

    /// Print the pip arguments that would be used without installing anything
    Plan {
        /// Format of the output. Default is console
        #[arg(long, default_value = "console")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Tensorflow,
    Torch,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Tensorflow => write!(f, "tensorflow"),
            Framework::Torch => write!(f, "torch"),
        }
    }
}

/// Arguments to pass to `pip install` for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub framework: Framework,
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub torch_version: &'a str,
    pub tensorflow_version: &'a str,
    pub gpu: bool,
    pub cuda_version: &'a str,
    pub python_version: String,
    pub plans: &'a [InstallPlan],
}
