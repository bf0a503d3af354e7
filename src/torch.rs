use std::fmt;

use crate::{Config, Framework, InstallError, InstallPlan, PythonVersion};

const STABLE_INDEX: &str = "https://download.pytorch.org/whl/torch_stable.html";
const DOWNLOAD_ROOT: &str = "https://download.pytorch.org/whl";

/// Nightlies dated after this carry the CUDA tag in their version.
const NIGHTLY_TAGGED_AFTER: u64 = 20190723;

/// Nightlies from this date on are published as `torch` instead of `torch_nightly`.
const NIGHTLY_RENAMED_ON: u64 = 20190802;

// TODO: drop the tag and direct wheel exceptions once torch 1.1.0 and 1.2.0
// are no longer installed.

/// Only this stable release carries the CUDA tag in its version.
const TAGGED_STABLE_RELEASE: &str = "1.2.0";

/// CUDA 10.0 builds were published without a version tag.
const UNTAGGED_CUDA: &str = "cu100";

/// GPU builds of this stable release are installed from a direct wheel URL.
const DIRECT_WHEEL_RELEASE: &str = "1.1.0";

const WHEEL_PLATFORMS: &[((usize, usize), &str)] = &[
    ((2, 7), "cp27-cp27mu"),
    ((3, 5), "cp35-cp35m"),
    ((3, 6), "cp36-cp36m"),
    ((3, 7), "cp37-cp37m"),
];

/// Build variant of a torch package: `cpu`, `cu92`, `cu100`, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CudaTag {
    Cpu,
    Cuda(String),
}

impl CudaTag {
    pub fn new(gpu: bool, cuda_version: &str) -> Self {
        if gpu {
            CudaTag::Cuda(cuda_version.replace('.', ""))
        } else {
            CudaTag::Cpu
        }
    }
}

impl fmt::Display for CudaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CudaTag::Cpu => write!(f, "cpu"),
            CudaTag::Cuda(digits) => write!(f, "cu{digits}"),
        }
    }
}

/// A requested torch version split into its release and optional nightly date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TorchVersion {
    pub base: String,
    pub nightly_date: Option<u64>,
}

impl TorchVersion {
    pub fn parse(version: &str) -> Result<Self, InstallError> {
        match version.split_once(".dev") {
            Some((base, date)) => {
                let date = date
                    .trim()
                    .parse()
                    .map_err(|_| InstallError::InvalidNightlyDate(date.to_owned()))?;
                Ok(TorchVersion {
                    base: base.to_owned(),
                    nightly_date: Some(date),
                })
            }
            None => Ok(TorchVersion {
                base: version.to_owned(),
                nightly_date: None,
            }),
        }
    }

    pub fn is_nightly(&self) -> bool {
        self.nightly_date.is_some()
    }

    fn carries_cuda_tag(&self) -> bool {
        match self.nightly_date {
            Some(date) => date > NIGHTLY_TAGGED_AFTER,
            None => self.base == TAGGED_STABLE_RELEASE,
        }
    }
}

/// Platform identifier of the prebuilt wheel matching a Python version.
pub fn wheel_platform(python: &PythonVersion) -> Result<&'static str, InstallError> {
    WHEEL_PLATFORMS
        .iter()
        .find(|(pair, _)| *pair == (python.major, python.minor))
        .map(|(_, platform)| *platform)
        .ok_or(InstallError::UnsupportedPython {
            major: python.major,
            minor: python.minor,
        })
}

/// Resolve the pip arguments installing the requested torch version.
pub fn resolve(config: &Config, python: &PythonVersion) -> Result<InstallPlan, InstallError> {
    let requested = TorchVersion::parse(&config.torch_version)?;
    let tag = CudaTag::new(config.gpu, &config.cuda_version);

    let mut args = vec!["-f".to_owned()];
    match requested.nightly_date {
        Some(_) => args.push(format!("{DOWNLOAD_ROOT}/nightly/{tag}/torch_nightly.html")),
        None => args.push(STABLE_INDEX.to_owned()),
    }

    // Mac builds never have the CUDA tag in their version.
    let mut version = config.torch_version.clone();
    if !config.host.is_mac() && requested.carries_cuda_tag() && tag.to_string() != UNTAGGED_CUDA {
        version = format!("{version}+{tag}");
    }

    let package = match requested.nightly_date {
        Some(date) if date >= NIGHTLY_RENAMED_ON => format!("torch=={version}"),
        Some(_) => format!("torch_nightly=={version}"),
        None if config.gpu && requested.base == DIRECT_WHEEL_RELEASE => {
            let platform = wheel_platform(python)?;
            format!("{DOWNLOAD_ROOT}/{tag}/torch-{version}-{platform}-linux_x86_64.whl")
        }
        None => format!("torch=={version}"),
    };
    args.push(package);

    Ok(InstallPlan {
        framework: Framework::Torch,
        args,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::HostOs;

    const PY36: PythonVersion = PythonVersion {
        major: 3,
        minor: 6,
        patch: 8,
    };

    fn config(version: &str, gpu: bool, cuda: &str, host: HostOs) -> Config {
        Config {
            tensorflow_version: "1.12.0".to_owned(),
            torch_version: version.to_owned(),
            gpu,
            cuda_version: cuda.to_owned(),
            host,
            python: PathBuf::from("python3"),
        }
    }

    fn args(version: &str, gpu: bool, cuda: &str) -> Vec<String> {
        resolve(&config(version, gpu, cuda, HostOs::Other), &PY36)
            .unwrap()
            .args
    }

    #[test]
    fn cuda_tag() {
        assert_eq!(CudaTag::new(false, "10.0").to_string(), "cpu");
        assert_eq!(CudaTag::new(true, "10.0").to_string(), "cu100");
        assert_eq!(CudaTag::new(true, "9.2").to_string(), "cu92");
    }

    #[test]
    fn parses_nightly_version() {
        let version = TorchVersion::parse("1.1.0.dev20190601").unwrap();
        assert_eq!(version.base, "1.1.0");
        assert_eq!(version.nightly_date, Some(20190601));
        assert!(version.is_nightly());
    }

    #[test]
    fn parses_stable_version() {
        let version = TorchVersion::parse("1.2.0").unwrap();
        assert_eq!(version.base, "1.2.0");
        assert!(!version.is_nightly());
    }

    #[test]
    fn rejects_non_numeric_nightly_date() {
        assert!(matches!(
            TorchVersion::parse("1.2.0.devlatest"),
            Err(InstallError::InvalidNightlyDate(date)) if date == "latest"
        ));
    }

    #[test]
    fn nightly_date_tolerates_whitespace_and_long_dates() {
        let version = TorchVersion::parse("1.2.0.dev20190810 ").unwrap();
        assert_eq!(version.nightly_date, Some(20190810));

        let version = TorchVersion::parse("1.2.0.dev201908101200").unwrap();
        assert_eq!(version.nightly_date, Some(201908101200));
    }

    #[test]
    fn stable_1_2_0_is_tagged() {
        assert_eq!(
            args("1.2.0", true, "9.2"),
            vec![
                "-f",
                "https://download.pytorch.org/whl/torch_stable.html",
                "torch==1.2.0+cu92"
            ]
        );
        assert_eq!(args("1.2.0", false, "10.0")[2], "torch==1.2.0+cpu");
    }

    #[test]
    fn cuda_10_0_is_never_tagged() {
        assert_eq!(args("1.2.0", true, "10.0")[2], "torch==1.2.0");
        assert_eq!(
            args("1.2.0.dev20190810", true, "10.0")[2],
            "torch==1.2.0.dev20190810"
        );
    }

    #[test]
    fn other_stable_releases_are_untagged() {
        assert_eq!(args("1.0.1", true, "9.2")[2], "torch==1.0.1");
        assert_eq!(args("1.1.0", false, "9.2")[2], "torch==1.1.0");
    }

    #[test]
    fn mac_is_never_tagged() {
        let plan = resolve(&config("1.2.0", false, "10.0", HostOs::Mac), &PY36).unwrap();
        assert_eq!(plan.args[2], "torch==1.2.0");

        let plan = resolve(
            &config("1.2.0.dev20190810", false, "10.0", HostOs::Mac),
            &PY36,
        )
        .unwrap();
        assert_eq!(plan.args[2], "torch==1.2.0.dev20190810");
    }

    #[test]
    fn nightly_uses_tagged_index() {
        assert_eq!(
            args("1.2.0.dev20190810", true, "9.2"),
            vec![
                "-f",
                "https://download.pytorch.org/whl/nightly/cu92/torch_nightly.html",
                "torch==1.2.0.dev20190810+cu92"
            ]
        );
    }

    #[test]
    fn nightly_package_name_depends_on_date() {
        assert_eq!(
            args("1.2.0.dev20190802", false, "10.0")[2],
            "torch==1.2.0.dev20190802+cpu"
        );
        // Tagged but still published under the old name.
        assert_eq!(
            args("1.2.0.dev20190724", false, "10.0")[2],
            "torch_nightly==1.2.0.dev20190724+cpu"
        );
        assert_eq!(
            args("1.2.0.dev20190723", false, "10.0")[2],
            "torch_nightly==1.2.0.dev20190723"
        );
        assert_eq!(
            args("1.1.0.dev20190701", false, "10.0"),
            vec![
                "-f",
                "https://download.pytorch.org/whl/nightly/cpu/torch_nightly.html",
                "torch_nightly==1.1.0.dev20190701"
            ]
        );
    }

    #[test]
    fn gpu_1_1_0_uses_direct_wheel() {
        assert_eq!(
            args("1.1.0", true, "10.0"),
            vec![
                "-f",
                "https://download.pytorch.org/whl/torch_stable.html",
                "https://download.pytorch.org/whl/cu100/torch-1.1.0-cp36-cp36m-linux_x86_64.whl"
            ]
        );
    }

    #[test]
    fn wheel_platforms() {
        let platform = |major, minor| {
            wheel_platform(&PythonVersion {
                major,
                minor,
                patch: 0,
            })
        };
        assert_eq!(platform(2, 7).unwrap(), "cp27-cp27mu");
        assert_eq!(platform(3, 5).unwrap(), "cp35-cp35m");
        assert_eq!(platform(3, 7).unwrap(), "cp37-cp37m");
        assert!(platform(3, 8).is_err());
    }

    #[test]
    fn unsupported_python_fails_direct_wheel() {
        let py38 = PythonVersion {
            major: 3,
            minor: 8,
            patch: 1,
        };
        let err = resolve(&config("1.1.0", true, "10.0", HostOs::Other), &py38).unwrap_err();
        assert!(matches!(
            err,
            InstallError::UnsupportedPython { major: 3, minor: 8 }
        ));

        // The table is only consulted on the direct wheel path.
        assert!(resolve(&config("1.1.0", false, "10.0", HostOs::Other), &py38).is_ok());
    }
}
