//! Interactive server setup.
//!
//! Asks where to listen and which service settings to override, then
//! starts the server with the resulting [`ServiceConfig`].

use std::num::ParseIntError;

use dialoguer::{Confirm, Input};
use weather_predict_analysis::config::{ConfigUpdate, ServiceConfig};

use crate::{DEFAULT_BIND_ADDR, DEFAULT_PORT};

/// Answers collected by the setup prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerSettings {
    bind_addr: String,
    port: u16,
    enable_disaster_tracking: bool,
    seed: Option<u64>,
}

impl ServerSettings {
    /// Defaults offered when `config` is the loaded configuration.
    fn from_config(config: &ServiceConfig) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            enable_disaster_tracking: config.enable_disaster_tracking,
            seed: config.seed,
        }
    }

    fn config_update(&self) -> ConfigUpdate {
        ConfigUpdate {
            enable_disaster_tracking: Some(self.enable_disaster_tracking),
            seed: self.seed,
            clear_seed: self.seed.is_none(),
            ..ConfigUpdate::default()
        }
    }
}

/// Parses a seed answer. A blank answer means unseeded.
fn parse_seed(input: &str) -> Result<Option<u64>, ParseIntError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input.parse().map(Some)
}

/// Shows the prompts, keeping the default for any that cannot be shown.
fn prompt(defaults: ServerSettings) -> ServerSettings {
    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let enable_disaster_tracking = Confirm::new()
        .with_prompt("Track natural disasters from EONET?")
        .default(defaults.enable_disaster_tracking)
        .interact()
        .unwrap_or(defaults.enable_disaster_tracking);

    let seed = Input::<String>::new()
        .with_prompt("RNG seed (blank for random)")
        .with_initial_text(defaults.seed.map(|s| s.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| parse_seed(input).map(|_| ()))
        .interact_text()
        .map_or(defaults.seed, |input| {
            parse_seed(&input).unwrap_or(defaults.seed)
        });

    ServerSettings {
        bind_addr,
        port,
        enable_disaster_tracking,
        seed,
    }
}

/// Runs the server in interactive mode.
///
/// Loads [`ServiceConfig`] from the environment, lets the user override
/// the listen address, disaster tracking, and seed, then delegates to
/// [`super::serve`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration cannot be
/// loaded or the server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    let mut config = ServiceConfig::from_env().map_err(std::io::Error::other)?;

    println!("Weather Predict Server");
    println!();

    let settings = prompt(ServerSettings::from_config(&config));
    let tracking = if settings.enable_disaster_tracking {
        "on"
    } else {
        "off"
    };

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{} with disaster tracking {tracking}?",
            settings.bind_addr, settings.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    settings.config_update().apply_to(&mut config);
    log::debug!("Interactive server configuration: {config:?}");

    super::serve(settings.bind_addr, settings.port, config).await
}
