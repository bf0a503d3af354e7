mod config;
mod formatter;
mod models;
mod pip;
pub mod tensorflow;
pub mod torch;
mod version;

pub use config::*;
pub use formatter::*;
pub use models::*;
pub use pip::{Installer, Pip};
pub use version::PythonVersion;

use log::debug;

/// Resolve the install plans for both frameworks, in install order.
///
/// Nothing is installed here, so a resolution error leaves the environment
/// untouched.
pub fn resolve_plans(
    config: &Config,
    python: &PythonVersion,
) -> Result<Vec<InstallPlan>, InstallError> {
    let plans = vec![tensorflow::resolve(config), torch::resolve(config, python)?];
    debug!("Resolved install plans: {:?}", plans);
    Ok(plans)
}

/// Install `plans` in order, stopping at the first failure.
pub fn install_all<I: Installer>(installer: &I, plans: &[InstallPlan]) -> Result<(), InstallError> {
    for plan in plans {
        debug!("Installing {}", plan.framework);
        installer.install(&plan.args)?;
    }
    Ok(())
}
