use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, RegionCode, WeatherLookup, normalize::title_case};
use inquire::{CustomType, Password};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City-validated weather lookups")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Listening port; overrides PORT and the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up the weather of a city once and print the combined JSON.
    Show {
        /// City name, accents optional, e.g. "sao paulo".
        city: String,

        /// State code, e.g. "SP".
        uf: String,
    },

    /// Store the weather API key and port in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { port } => {
                let config = Config::load()?;
                let port = port.unwrap_or(config.port);
                server::run(&config, port).await?;
            }
            Command::Show { city, uf } => {
                let config = Config::load()?;
                let lookup = WeatherLookup::from_config(&config)?;
                let region = RegionCode::new(uf);

                let result = match lookup.lookup(&city, &region).await {
                    Ok(result) => result,
                    Err(err) => {
                        let message = err.user_message();
                        return Err(anyhow::Error::new(err).context(message));
                    }
                };

                println!("Weather for {} / {}", title_case(&city), region);
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize weather result")?;
                println!("{json}");
            }
            Command::Configure => {
                let mut config = Config::load_file()?;

                let api_key = Password::new("WeatherAPI.com API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;
                let port = CustomType::<u16>::new("Listening port:")
                    .with_default(config.port)
                    .prompt()
                    .context("Failed to read port")?;

                config.api_key = Some(api_key.trim().to_string());
                config.port = port;
                config.save()?;

                println!("Configuration saved to {}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}
