use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use inquire::{CustomType, Select};
use std::process::ExitCode;

use weather_core::{
    Config, Coordinates, LocationSource, ThemeState, ViewState,
    preferences::{PressureUnit, TemperatureUnit, Units, WindSpeedUnit},
    theme::{FileThemeStore, TerminalThemeProbe},
};

use crate::{radar, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for the current location, or for explicit coordinates.
    Now {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the raw weather data as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search for a place by name.
    Search {
        query: String,

        /// Choose one of the results interactively and show its weather.
        #[arg(long)]
        pick: bool,
    },

    /// Show or toggle the color theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Edit location and unit settings interactively.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    Toggle,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let command = self.command.unwrap_or(Command::Now {
            lat: None,
            lon: None,
            json: false,
        });
        match command {
            Command::Now { lat, lon, json } => {
                let config = Config::load()?;
                let view = ViewState::from_config(&config)?;

                if lat.is_some() || lon.is_some() {
                    view.fetch_weather(lat, lon).await;
                } else {
                    view.activate().await;
                }

                show(&view, json)
            }
            Command::Search { query, pick } => {
                let config = Config::load()?;
                let view = ViewState::from_config(&config)?;
                let theme = theme_state()?;

                let places = view.search_location(&query).await;
                if places.is_empty() {
                    if let Some(error) = view.snapshot().error {
                        eprintln!("{error}");
                        return Ok(ExitCode::FAILURE);
                    }
                    if !query.trim().is_empty() {
                        println!("No places found for '{query}'.");
                    }
                    return Ok(ExitCode::SUCCESS);
                }

                if !should_prompt(pick, std::io::stdin().is_tty())? {
                    print!("{}", render::search_results(&places, theme.theme()));
                    return Ok(ExitCode::SUCCESS);
                }

                let names: Vec<String> = places.iter().map(|p| p.name.clone()).collect();
                let choice = Select::new("Choose a location:", names)
                    .raw_prompt()
                    .context("No location selected")?;
                let place = &places[choice.index];

                view.fetch_weather(Some(place.lat), Some(place.lon)).await;
                show(&view, false)
            }
            Command::Theme { action } => {
                let theme = theme_state()?;
                let current = match action {
                    Some(ThemeAction::Toggle) => theme.toggle()?,
                    None => theme.theme(),
                };
                println!("{current}");
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Whether `search` should ask the user to choose a result.
fn should_prompt(pick: bool, terminal: bool) -> anyhow::Result<bool> {
    match (pick, terminal) {
        (false, _) => Ok(false),
        (true, true) => Ok(true),
        (true, false) => anyhow::bail!("--pick needs an interactive terminal"),
    }
}

fn theme_state() -> anyhow::Result<ThemeState> {
    let store = FileThemeStore::new(Config::theme_file_path()?);
    Ok(ThemeState::new(Box::new(store), &TerminalThemeProbe::from_env()))
}

/// Render the current view state and pick the exit code.
fn show(view: &ViewState, json: bool) -> anyhow::Result<ExitCode> {
    let snapshot = view.snapshot();
    let theme = theme_state()?.theme();

    let Some(data) = &snapshot.weather else {
        print!("{}", render::failure(&snapshot, theme));
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        let view = render::View {
            theme,
            units: snapshot.preferences.units,
            radar: radar::generate(&mut rand::thread_rng()),
        };
        print!("{}", render::dashboard(data, &view));
    }

    if let Some(error) = &snapshot.error {
        tracing::warn!("Showing previous data after error: {error}");
    }
    Ok(ExitCode::SUCCESS)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let sources = LocationSource::all().to_vec();
    let source = Select::new("Where should your location come from?", sources).prompt()?;
    match source {
        LocationSource::Fixed => {
            let lat = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please enter a number")
                .prompt()?;
            let lon = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please enter a number")
                .prompt()?;
            config.set_fixed_location(Coordinates::new(lat, lon));
        }
        other => config.location.source = other,
    }

    let temperature = Select::new("Temperature unit:", vec!["celsius", "fahrenheit"]).prompt()?;
    let wind_speed = Select::new("Wind speed unit:", vec!["kmh", "mph", "ms"]).prompt()?;
    let pressure = Select::new("Pressure unit:", vec!["hPa", "inHg", "mb"]).prompt()?;
    config.units = Units {
        temperature: match temperature {
            "fahrenheit" => TemperatureUnit::Fahrenheit,
            _ => TemperatureUnit::Celsius,
        },
        wind_speed: match wind_speed {
            "mph" => WindSpeedUnit::Mph,
            "ms" => WindSpeedUnit::Ms,
            _ => WindSpeedUnit::Kmh,
        },
        pressure: match pressure {
            "inHg" => PressureUnit::InHg,
            "mb" => PressureUnit::Mb,
            _ => PressureUnit::HPa,
        },
    };

    config.save()?;
    println!("Saved settings to {}", Config::config_file_path()?.display());
    Ok(())
}
