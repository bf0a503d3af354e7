use crate::{Config, Framework, InstallPlan};

/// Resolve the pip arguments installing the requested TensorFlow version.
pub fn resolve(config: &Config) -> InstallPlan {
    InstallPlan {
        framework: Framework::Tensorflow,
        args: vec![package_spec(&config.tensorflow_version, config.gpu)],
    }
}

pub fn package_spec(version: &str, gpu: bool) -> String {
    let mut package = if version.contains("dev") {
        String::from("tf-nightly")
    } else {
        String::from("tensorflow")
    };

    if gpu {
        package.push_str("-gpu");
    }

    format!("{package}=={version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_packages() {
        assert_eq!(package_spec("1.12.0", false), "tensorflow==1.12.0");
        assert_eq!(package_spec("1.12.0", true), "tensorflow-gpu==1.12.0");
    }

    #[test]
    fn nightly_packages() {
        assert_eq!(package_spec("2.0.0-dev", true), "tf-nightly-gpu==2.0.0-dev");
        assert_eq!(
            package_spec("1.15.0.dev20190801", false),
            "tf-nightly==1.15.0.dev20190801"
        );
    }
}
