use std::path::{Path, PathBuf};
use std::process::Command;

use itertools::Itertools;
use log::{debug, info};

use crate::{InstallError, PythonVersion};

const VERSION_PROBE: &str = "import sys; print('.'.join(str(v) for v in sys.version_info[:3]))";

/// Something that can install packages with pip.
pub trait Installer {
    /// Version of the interpreter the packages are installed for.
    fn python_version(&self) -> Result<PythonVersion, InstallError>;

    /// Run `pip install` with `args`.
    fn install(&self, args: &[String]) -> Result<(), InstallError>;
}

/// Runs pip as a module of a Python interpreter.
pub struct Pip {
    python: PathBuf,
}

impl Pip {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Pip {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &Path {
        &self.python
    }

    fn command(&self) -> Command {
        Command::new(&self.python)
    }

    fn spawn_error(&self, source: std::io::Error) -> InstallError {
        InstallError::Spawn {
            program: self.python.display().to_string(),
            source,
        }
    }
}

/// Full command line of a pip install, for display.
fn command_line(python: &Path, args: &[String]) -> String {
    [
        python.display().to_string(),
        "-m".to_owned(),
        "pip".to_owned(),
        "install".to_owned(),
    ]
    .iter()
    .chain(args)
    .join(" ")
}

impl Installer for Pip {
    fn python_version(&self) -> Result<PythonVersion, InstallError> {
        let output = self
            .command()
            .arg("-c")
            .arg(VERSION_PROBE)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(InstallError::PythonProbeFailed(output.status.code()));
        }

        let reported = String::from_utf8_lossy(&output.stdout);
        debug!("{} reports Python {}", self.python.display(), reported.trim());
        reported.parse()
    }

    fn install(&self, args: &[String]) -> Result<(), InstallError> {
        info!("Running pip command: {}", command_line(&self.python, args));

        let status = self
            .command()
            .args(["-m", "pip", "install"])
            .args(args)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(InstallError::PipFailed {
                code: status.code(),
            });
        }

        Ok(())
    }
}
