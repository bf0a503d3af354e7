use std::ffi::OsString;
use std::path::PathBuf;

use log::debug;

use crate::Overrides;

pub const TENSORFLOW_VERSION_VAR: &str = "NEUROPODS_TENSORFLOW_VERSION";
pub const TORCH_VERSION_VAR: &str = "NEUROPODS_TORCH_VERSION";
pub const IS_GPU_VAR: &str = "NEUROPODS_IS_GPU";
pub const CUDA_VERSION_VAR: &str = "NEUROPODS_CUDA_VERSION";
pub const PYTHON_VAR: &str = "NEUROPODS_PYTHON";

pub const DEFAULT_TENSORFLOW_VERSION: &str = "1.12.0";
pub const DEFAULT_TORCH_VERSION: &str = "1.1.0";
pub const DEFAULT_CUDA_VERSION: &str = "10.0";
pub const DEFAULT_PYTHON: &str = "python3";

/// Operating system of the machine doing the install.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    Mac,
    Other,
}

impl HostOs {
    pub fn detect() -> Self {
        if std::env::consts::OS == "macos" {
            HostOs::Mac
        } else {
            HostOs::Other
        }
    }

    pub fn is_mac(&self) -> bool {
        matches!(self, HostOs::Mac)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub tensorflow_version: String,
    pub torch_version: String,
    pub gpu: bool,
    pub cuda_version: String,
    pub host: HostOs,
    pub python: PathBuf,
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn from_env(overrides: &Overrides) -> Self {
        Self::resolve(overrides, HostOs::detect(), |name| std::env::var_os(name))
    }

    /// Resolve the configuration using `lookup` to read variables.
    ///
    /// Empty values are treated like unset ones, both for variables and for
    /// overrides. Versions that are not valid UTF-8 are converted lossily.
    pub fn resolve<F>(overrides: &Overrides, host: HostOs, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let setting = |flag: &Option<String>, name: &str, default: &str| {
            flag.clone()
                .filter(|v| !v.is_empty())
                .or_else(|| var(name).map(|v| v.to_string_lossy().into_owned()))
                .unwrap_or_else(|| default.to_owned())
        };

        let config = Config {
            tensorflow_version: setting(
                &overrides.tensorflow_version,
                TENSORFLOW_VERSION_VAR,
                DEFAULT_TENSORFLOW_VERSION,
            ),
            torch_version: setting(
                &overrides.torch_version,
                TORCH_VERSION_VAR,
                DEFAULT_TORCH_VERSION,
            ),
            gpu: overrides.gpu || var(IS_GPU_VAR).is_some(),
            cuda_version: setting(
                &overrides.cuda_version,
                CUDA_VERSION_VAR,
                DEFAULT_CUDA_VERSION,
            ),
            host,
            python: overrides
                .python
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .or_else(|| var(PYTHON_VAR).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON)),
        };

        debug!("Resolved configuration: {:?}", config);
        config
    }
}
