//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use herald_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};
use herald_core::config::{validate_config, Config};

use crate::cli::{output, Cli};

/// Write a default Herald configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let format = if self.yes || self.output.is_some() {
            format_for(&config_path)
        } else {
            let formats = vec!["toml", "yaml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            formats[selection]
        };

        let config_path = if format == "yaml" && format_for(&config_path) == "toml" {
            config_path.with_extension("yaml")
        } else {
            config_path
        };

        std::fs::write(&config_path, render_config(format)?)?;
        info!(path = %config_path.display(), format, "configuration written");

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                style(config_path.display()).cyan()
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set the repository URL and excluded types", config_path.display());
            println!("  2. Run {} to preview the next release notes", style("herald changelog").cyan());
        }

        Ok(())
    }
}

fn format_for(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => "yaml",
        _ => "toml",
    }
}

/// Render the default configuration in the given format
fn render_config(format: &str) -> anyhow::Result<String> {
    let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
    validate_config(&config)?;

    if format == "yaml" {
        Ok(format!("# Herald configuration\n{}", serde_yaml::to_string(&config)?))
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}
