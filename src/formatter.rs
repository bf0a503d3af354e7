use colored::Colorize;
use itertools::Itertools;

use crate::{Config, InstallPlan, PythonVersion};

pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_header(config: &Config) {
        println!(
            "Installing tensorflow {} and torch {}",
            config.tensorflow_version.bold(),
            config.torch_version.bold()
        );
    }

    pub fn format_plans(config: &Config, python: &PythonVersion, plans: &[InstallPlan]) {
        let variant = if config.gpu {
            format!("gpu (cuda {})", config.cuda_version).green()
        } else {
            "cpu".normal()
        };
        println!(
            "{} {} python {}",
            "Variant:".bold(),
            variant,
            python.to_string().cyan()
        );

        for plan in plans {
            println!(
                "  {:<10} {}",
                plan.framework.to_string().bold(),
                Self::plan_args(plan)
            );
        }
    }

    pub fn plan_args(plan: &InstallPlan) -> String {
        plan.args.iter().join(" ")
    }

    pub fn format_success(plans: &[InstallPlan]) {
        let installed = plans.iter().map(|plan| plan.framework).join(", ");
        println!("{} installed {}", "✓".green(), installed);
    }
}
