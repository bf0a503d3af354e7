use std::{fmt::Display, str::FromStr};

use crate::InstallError;

/// Version of the Python interpreter that runs pip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
}

impl Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for PythonVersion {
    type Err = InstallError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let version = version.trim();
        let invalid = || InstallError::InvalidPythonVersion(version.to_owned());

        if version.is_empty() {
            return Err(invalid());
        }

        let mut parts_iter = version.split('.');
        let major = parts_iter
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let minor = parts_iter
            .next()
            .map(|s| s.parse())
            .unwrap_or(Ok(0))
            .map_err(|_| invalid())?;
        let patch = parts_iter
            .next()
            .map(|s| s.parse())
            .unwrap_or(Ok(0))
            .map_err(|_| invalid())?;

        if parts_iter.next().is_some() {
            return Err(invalid());
        }

        Ok(PythonVersion {
            major,
            minor,
            patch,
        })
    }
}
