use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Coordinates;

/// A registered location, resolved to its canonical name.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self { name: name.into(), coordinates }
    }
}

/// Current conditions as reported by the API. Fields the API omits stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature_c: Option<f64>,
    #[serde(rename = "apparent_temperature")]
    pub apparent_temperature_c: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity_pct: Option<f64>,
    pub is_day: Option<i64>,
}

impl CurrentConditions {
    /// True when the API sent a `current` block with none of the requested fields.
    pub fn is_empty(&self) -> bool {
        self.temperature_c.is_none()
            && self.apparent_temperature_c.is_none()
            && self.humidity_pct.is_none()
            && self.is_day.is_none()
    }
}

/// Daily forecast as parallel sequences, one entry per day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub time: Vec<NaiveDate>,
}

impl DailyForecast {
    /// `(code, date)` pairs in order; stops at the shorter sequence.
    pub fn days(&self) -> impl Iterator<Item = (Option<i64>, NaiveDate)> + '_ {
        self.weather_code.iter().copied().zip(self.time.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.days().next().is_none()
    }
}

/// Result of one successful request.
///
/// `current` and `daily` are either both present or both absent: a response
/// missing one of them is treated as carrying no weather data at all.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: Option<CurrentConditions>,
    pub daily: Option<DailyForecast>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(current: CurrentConditions, daily: DailyForecast) -> Self {
        Self { current: Some(current), daily: Some(daily), fetched_at: Utc::now() }
    }

    /// Snapshot of a response that lacked `current` or `daily`.
    pub fn empty() -> Self {
        Self { current: None, daily: None, fetched_at: Utc::now() }
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_some() && self.daily.is_some()
    }
}

/// Day/night flag of the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayNight {
    Day,
    Night,
}

impl DayNight {
    /// Fixed two-entry lookup: 0 is day, 1 is night.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Self::Day),
            1 => Some(Self::Night),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

/// WMO weather interpretation codes.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    DepositingRimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    SlightRain,
    ModerateRain,
    HeavyRain,
    LightFreezingRain,
    HeavyFreezingRain,
    SlightSnowFall,
    ModerateSnowFall,
    IntenseSnowFall,
    SnowGrains,
    SlightRainShower,
    ModerateRainShower,
    ViolentRainShower,
    SlightSnowShower,
    HeavySnowShower,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
}

impl WeatherCode {
    pub const UNKNOWN_DESCRIPTION: &'static str = "Unknown weather code";

    pub fn from_code(code: i64) -> Option<Self> {
        let known = match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::DepositingRimeFog,
            51 => Self::LightDrizzle,
            53 => Self::ModerateDrizzle,
            55 => Self::DenseDrizzle,
            61 => Self::SlightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            66 => Self::LightFreezingRain,
            67 => Self::HeavyFreezingRain,
            71 => Self::SlightSnowFall,
            73 => Self::ModerateSnowFall,
            75 => Self::IntenseSnowFall,
            77 => Self::SnowGrains,
            80 => Self::SlightRainShower,
            81 => Self::ModerateRainShower,
            82 => Self::ViolentRainShower,
            85 => Self::SlightSnowShower,
            86 => Self::HeavySnowShower,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormSlightHail,
            99 => Self::ThunderstormHeavyHail,
            _ => return None,
        };
        Some(known)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Foggy",
            Self::DepositingRimeFog => "Depositing rime fog",
            Self::LightDrizzle => "Light drizzle",
            Self::ModerateDrizzle => "Moderate drizzle",
            Self::DenseDrizzle => "Dense drizzle",
            Self::SlightRain => "Slight rain",
            Self::ModerateRain => "Moderate rain",
            Self::HeavyRain => "Heavy rain",
            Self::LightFreezingRain => "Light freezing rain",
            Self::HeavyFreezingRain => "Heavy freezing rain",
            Self::SlightSnowFall => "Slight snow fall",
            Self::ModerateSnowFall => "Moderate snow fall",
            Self::IntenseSnowFall => "Intense snow fall",
            Self::SnowGrains => "Snow grains",
            Self::SlightRainShower => "Slight rain shower",
            Self::ModerateRainShower => "Moderate rain shower",
            Self::ViolentRainShower => "Violent rain shower",
            Self::SlightSnowShower => "Slight snow shower",
            Self::HeavySnowShower => "Heavy snow shower",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormSlightHail => "Thunderstorm with slight hail",
            Self::ThunderstormHeavyHail => "Thunderstorm with heavy hail",
        }
    }
}

/// Description for a raw code, falling back for codes outside the table.
pub fn describe_code(code: Option<i64>) -> &'static str {
    code.and_then(WeatherCode::from_code)
        .map(|c| c.description())
        .unwrap_or(WeatherCode::UNKNOWN_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky_code() {
        assert_eq!(WeatherCode::from_code(0), Some(WeatherCode::ClearSky));
        assert_eq!(describe_code(Some(0)), "Clear sky");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(WeatherCode::from_code(999), None);
        assert_eq!(describe_code(Some(999)), "Unknown weather code");
        assert_eq!(describe_code(Some(-1)), "Unknown weather code");
        assert_eq!(describe_code(None), "Unknown weather code");
    }

    #[test]
    fn hail_and_fog_codes() {
        assert_eq!(describe_code(Some(48)), "Depositing rime fog");
        assert_eq!(describe_code(Some(96)), "Thunderstorm with slight hail");
        assert_eq!(describe_code(Some(99)), "Thunderstorm with heavy hail");
    }

    #[test]
    fn day_night_lookup() {
        assert_eq!(DayNight::from_flag(0).map(|d| d.as_str()), Some("Day"));
        assert_eq!(DayNight::from_flag(1).map(|d| d.as_str()), Some("Night"));
        assert_eq!(DayNight::from_flag(2), None);
    }

    #[test]
    fn daily_days_stops_at_shorter_sequence() {
        let daily = DailyForecast {
            weather_code: vec![Some(0), Some(3), Some(61)],
            time: vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"),
            ],
        };

        assert_eq!(daily.days().count(), 2);
        assert!(!daily.is_empty());
        assert!(DailyForecast::default().is_empty());
    }

    #[test]
    fn empty_snapshot_is_incomplete() {
        assert!(!WeatherSnapshot::empty().is_complete());
        assert!(
            WeatherSnapshot::new(CurrentConditions::default(), DailyForecast::default())
                .is_complete()
        );
    }
}
