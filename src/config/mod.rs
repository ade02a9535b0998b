pub mod check_file;
pub mod settings;
pub mod toml_config;

pub use settings::ClientSettings;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::settings::ClientSettings;
    use super::toml_config::TomlConfig;
    use crate::core::AccessCheck;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "page-access")]
    #[command(about = "Ask the access validation handler whether pages may be viewed")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Server root, e.g. http://localhost:8181")]
        pub base_url: Option<String>,

        #[arg(long, global = true, help = "TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, global = true)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, global = true)]
        pub concurrent_requests: Option<usize>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Run a single access check
        #[command(subcommand)]
        Check(AccessCheck),

        /// Run every check listed in a TOML file
        Batch {
            #[arg(long)]
            file: PathBuf,
        },
    }

    impl CliConfig {
        /// Loads `--config` if given, applies the flags on top and validates the result.
        pub fn resolve(&self) -> Result<ClientSettings> {
            let mut settings = match &self.config {
                Some(path) => {
                    let file = TomlConfig::from_file(path)?;
                    file.validate()?;
                    ClientSettings::from_toml(&file)
                }
                None => ClientSettings::default(),
            };

            if let Some(base_url) = &self.base_url {
                settings.base_url = base_url.clone();
            }
            if let Some(seconds) = self.timeout_seconds {
                settings.timeout = Some(Duration::from_secs(seconds));
            }
            if let Some(concurrent) = self.concurrent_requests {
                settings.concurrent_requests = concurrent;
            }
            settings.verbose |= self.verbose;
            settings.json_logs |= self.json_logs;

            settings.validate()?;
            Ok(settings)
        }
    }

}
