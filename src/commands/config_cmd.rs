use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::{Config, ConfigValue, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        print_value("api_url", &config.api_url, |v| v.clone());
                        print_value("member_id", &config.member_id, |v| match v {
                            Some(id) => id.to_string(),
                            None => "(not set)".to_string(),
                        });
                        print_value("data_dir", &config.data_dir, |v| v.display().to_string());
                        print_value("request_timeout_secs", &config.request_timeout_secs, |v| {
                            v.to_string()
                        });
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = config_path.unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'fitcare config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config_yaml().as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nSet member_id to your account's member ID before tracking food.");
                Ok(())
            }
        }
    }
}

fn print_value<T>(name: &str, value: &ConfigValue<T>, render: impl Fn(&T) -> String) {
    println!("{}: {}", name, render(&value.value));
    println!("  source: {}", value.source);
    println!();
}

fn default_config_yaml() -> String {
    format!(
        r#"# fitcare configuration

# Goal service base URL
api_url: {}

# Your member ID on the goal service
# member_id: 1

# Directory for the local ledger documents (default: platform data dir)
# data_dir: ~/.local/share/fitcare

# Request timeout in seconds
request_timeout_secs: {}
"#,
        DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.yaml");
        let config = Config::load(Some(config_path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(config_path.clone())).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(loaded.api_url.value, DEFAULT_API_URL);
        assert_eq!(loaded.api_url.source, ConfigSource::File);
        assert_eq!(loaded.member_id.value, None);
        assert_eq!(loaded.config_file, Some(config_path));
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "member_id: 9\n").unwrap();
        let config = Config::load(Some(config_path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(config_path.clone())).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "member_id: 9\n");
    }
}
