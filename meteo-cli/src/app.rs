//! Menu-driven controller.
//!
//! The controller owns the registry and walks a small state machine:
//!
//! ```text
//! MainMenu ─1─> SelectSource ─> SelectCity(source) ─> fetch + print ─┐
//!          ─2─> AddCity ───────────────────────────────────────────────┤
//!          ─3─> FavoriteCity ──────────────────────────────────────────┤
//!          ─4─> Credits ───────────────────────────────────────────────┤
//!          ─5─> Exit                                                   │
//!     ^────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use anyhow::Result;
use meteo_core::{
    AddOutcome, FavoriteOutcome, Location, LocationRegistry, RegistryError, WeatherProvider,
    render_current, render_daily,
};

use crate::{
    menu::{LocationSource, MenuAction},
    prompt::Prompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MainMenu,
    SelectSource,
    SelectCity(LocationSource),
    AddCity,
    FavoriteCity,
    Credits,
    Exit,
}

pub struct App<P, W> {
    registry: LocationRegistry,
    provider: Box<dyn WeatherProvider>,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> App<P, W> {
    pub fn new(
        registry: LocationRegistry,
        provider: Box<dyn WeatherProvider>,
        prompt: P,
        out: W,
    ) -> Self {
        Self { registry, provider, prompt, out }
    }

    /// Run until the user picks "Exit" or input ends.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = State::MainMenu;

        while state != State::Exit {
            tracing::trace!(?state, "menu step");
            state = match state {
                State::MainMenu => self.main_menu()?,
                State::SelectSource => self.select_source()?,
                State::SelectCity(source) => self.select_city(source).await?,
                State::AddCity => self.add_city()?,
                State::FavoriteCity => self.favorite_city()?,
                State::Credits => self.credits()?,
                State::Exit => State::Exit,
            };
        }

        Ok(())
    }

    fn main_menu(&mut self) -> Result<State> {
        let rule = "=".repeat(30);
        writeln!(self.out, "Welcome to meteo")?;
        writeln!(self.out, "{rule}")?;
        for action in MenuAction::all() {
            writeln!(self.out, "{}. {}", action.key(), action.label())?;
        }
        writeln!(self.out, "{rule}")?;

        let Some(answer) = self.prompt.ask("Enter a number between (1-5):")? else {
            return Ok(State::Exit);
        };

        let action = match MenuAction::try_from(answer.as_str()) {
            Ok(action) => action,
            Err(err) => {
                writeln!(self.out, "{err}\n")?;
                return Ok(State::MainMenu);
            }
        };

        Ok(match action {
            MenuAction::CheckWeather => State::SelectSource,
            MenuAction::AddLocation => State::AddCity,
            MenuAction::FavoriteLocation => State::FavoriteCity,
            MenuAction::Credits => State::Credits,
            MenuAction::Exit => {
                writeln!(self.out, "Quitting...")?;
                State::Exit
            }
        })
    }

    fn select_source(&mut self) -> Result<State> {
        writeln!(self.out, "1. Favorited cities\n2. All cities in the app")?;

        let Some(answer) = self.prompt.ask("Enter your choosing (1 or 2):")? else {
            return Ok(State::Exit);
        };

        Ok(match LocationSource::try_from(answer.as_str()) {
            Ok(source) => State::SelectCity(source),
            Err(err) => {
                tracing::debug!(%err, "no location source picked");
                State::MainMenu
            }
        })
    }

    async fn select_city(&mut self, source: LocationSource) -> Result<State> {
        let names: Vec<String> = match source {
            LocationSource::Favorites => self.registry.favorites().to_vec(),
            LocationSource::All => self.registry.locations().map(|l| l.name).collect(),
        };

        if names.is_empty() {
            match source {
                LocationSource::Favorites => writeln!(self.out, "You have no favorite cities yet.\n")?,
                LocationSource::All => writeln!(self.out, "There are no cities in the app yet.\n")?,
            }
            return Ok(State::MainMenu);
        }

        match source {
            LocationSource::Favorites => writeln!(self.out, "# Favorited cities:")?,
            LocationSource::All => writeln!(self.out, "# Available cities:")?,
        }
        for name in &names {
            writeln!(self.out, "- {name}")?;
        }

        let Some(answer) = self.prompt.ask("Enter the city name:")? else {
            return Ok(State::Exit);
        };

        match self.registry.resolve(&answer) {
            Some(location) => self.show_weather(&location).await?,
            None => writeln!(self.out, "Invalid city name. Please try again.\n")?,
        }

        Ok(State::MainMenu)
    }

    async fn show_weather(&mut self, location: &Location) -> Result<()> {
        match self.provider.fetch(&location.coordinates).await {
            Ok(snapshot) => {
                tracing::debug!(
                    location = %location.name,
                    fetched_at = %snapshot.fetched_at,
                    complete = snapshot.is_complete(),
                    "weather fetched"
                );
                if !snapshot.is_complete() {
                    writeln!(self.out, "Result: Weather data not found in the response.\n")?;
                }
                writeln!(self.out)?;
                writeln!(self.out, "{}", render_daily(&snapshot))?;
                writeln!(self.out, "{}", render_current(&location.name, &snapshot))?;
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), location = %location.name, "weather request failed");
                writeln!(self.out, "{err}\n")?;
            }
        }
        Ok(())
    }

    fn add_city(&mut self) -> Result<State> {
        let Some(name) = self.prompt.ask("Enter the name of city:")? else {
            return Ok(State::Exit);
        };

        if self.registry.contains(&name) {
            writeln!(self.out, "{} is already in the list of locations.\n", name.trim())?;
        }

        let Some(lat) = self.prompt.ask("Write the latitude of the city:")? else {
            return Ok(State::Exit);
        };
        let Some(lon) = self.prompt.ask("Write the longitude of the city:")? else {
            return Ok(State::Exit);
        };

        match self.registry.add_location(&name, &lat, &lon) {
            Ok(AddOutcome::Added) => writeln!(self.out, "{} added to locations.\n", name.trim())?,
            Ok(AddOutcome::Updated) => {
                writeln!(self.out, "{} updated with new coordinates.\n", name.trim())?
            }
            Err(err) => writeln!(self.out, "{err}\n")?,
        }

        Ok(State::MainMenu)
    }

    fn favorite_city(&mut self) -> Result<State> {
        let Some(name) = self.prompt.ask("Enter the name of the city to favorite:")? else {
            return Ok(State::Exit);
        };

        match self.registry.favorite(&name) {
            Ok(FavoriteOutcome::Added(city)) => {
                writeln!(self.out, "{city} has been added to your favorites.\n")?
            }
            Ok(FavoriteOutcome::AlreadyFavorite(city)) => {
                writeln!(self.out, "{city} is already in your favorites.\n")?
            }
            Err(RegistryError::Config(err)) => {
                tracing::error!(%err, "could not persist favorites");
                writeln!(self.out, "Failed to save favorites: {err}\n")?
            }
            Err(err) => writeln!(self.out, "{err}\n")?,
        }

        Ok(State::MainMenu)
    }

    fn credits(&mut self) -> Result<State> {
        writeln!(self.out, "#v{}# meteo", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "- Weather data: Open-Meteo (https://open-meteo.com)")?;
        writeln!(self.out, "- Config file: {}\n", self.registry.path().display())?;
        Ok(State::MainMenu)
    }
}
