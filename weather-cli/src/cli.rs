use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use weather_core::{
    API_KEY_ENV, ClientConfig, Conditions, Config, WeatherClient, WeatherProvider,
};

const USAGE: &str = "Usage: weather LOCATION\n\nExample: weather London,UK";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather conditions from OpenWeatherMap",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Location to look up, e.g. "London,UK".
    pub location: Option<String>,

    /// Print the conditions as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeatherMap API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => {
                let env_key = std::env::var(API_KEY_ENV).ok();
                let report = show(self.location, self.json, env_key, Config::load, |settings| {
                    Box::new(WeatherClient::with_config(settings)) as Box<dyn WeatherProvider>
                })
                .await?;
                println!("{report}");
                Ok(())
            }
        }
    }
}

/// Resolve the location and credential, fetch, and render the report.
///
/// The config file is read only after the location is known. With a key in
/// the environment an unreadable file is skipped; without one the file is the
/// only credential source, so its error is reported. `connect` is only invoked
/// once both inputs are present.
async fn show<L, F>(
    location: Option<String>,
    json: bool,
    env_key: Option<String>,
    load: L,
    connect: F,
) -> anyhow::Result<String>
where
    L: FnOnce() -> anyhow::Result<Config>,
    F: FnOnce(ClientConfig) -> Box<dyn WeatherProvider>,
{
    let Some(location) = location else {
        bail!(USAGE);
    };

    let env_key = env_key.filter(|k| !k.is_empty());
    let missing_key = || {
        format!(
            "Please set the environment variable {API_KEY_ENV}.\n\
             Hint: or run `weather configure` to store a key."
        )
    };

    let config = match load() {
        Ok(config) => config,
        Err(err) if env_key.is_some() => {
            warn!("Ignoring config file: {err:#}");
            Config::default()
        }
        Err(err) => return Err(err.context(missing_key())),
    };

    let Some(api_key) = config.resolve_api_key(env_key) else {
        bail!(missing_key());
    };

    let settings = config.client_config(api_key);
    debug!(%location, base_url = %settings.base_url, "Fetching conditions");

    let provider = connect(settings);
    let conditions = provider.get_weather(&location).await?;

    if json {
        serde_json::to_string_pretty(&conditions).context("Failed to serialize conditions")
    } else {
        Ok(format_report(&conditions))
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

pub fn format_report(c: &Conditions) -> String {
    format!(
        "Summary: {}\nTemp: {:.1}º\nPressure: {:.0} hPa\nHumidity: {}%\nWind Speed: {:.1} m/s",
        c.summary,
        c.temperature.fahrenheit(),
        c.pressure,
        c.humidity,
        c.wind_speed,
    )
}
