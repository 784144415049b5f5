use std::convert::TryFrom;

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CheckWeather,
    AddLocation,
    FavoriteLocation,
    Credits,
    Exit,
}

impl MenuAction {
    pub const fn all() -> &'static [MenuAction] {
        &[
            MenuAction::CheckWeather,
            MenuAction::AddLocation,
            MenuAction::FavoriteLocation,
            MenuAction::Credits,
            MenuAction::Exit,
        ]
    }

    /// The number the user types to pick this entry.
    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::CheckWeather => "1",
            MenuAction::AddLocation => "2",
            MenuAction::FavoriteLocation => "3",
            MenuAction::Credits => "4",
            MenuAction::Exit => "5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::CheckWeather => "Check weather of a location",
            MenuAction::AddLocation => "Add a location to list",
            MenuAction::FavoriteLocation => "Favorite a location",
            MenuAction::Credits => "Version and credits",
            MenuAction::Exit => "Exit",
        }
    }
}

impl TryFrom<&str> for MenuAction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();

        MenuAction::all()
            .iter()
            .copied()
            .find(|action| action.key() == value)
            .ok_or_else(|| anyhow::anyhow!("Invalid option. Please enter a number between 1 and 5."))
    }
}

/// Which list a city is picked from when checking the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Favorites,
    All,
}

impl TryFrom<&str> for LocationSource {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(LocationSource::Favorites),
            "2" => Ok(LocationSource::All),
            other => Err(anyhow::anyhow!("Unknown location source '{other}'.")),
        }
    }
}
