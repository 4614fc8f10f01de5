//! Weather condition tags
//!
//! The scheduler only needs a coarse signal: is it nice enough to train
//! outside? Provider responses are reduced to one of six tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plan::error::PlanError;

/// Coarse weather signal used to choose between outdoor and indoor workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear sky
    Clear,
    /// Some clouds
    PartlyCloudy,
    /// Overcast, mist, fog or haze
    Cloudy,
    /// Rain, drizzle or thunderstorm
    Rain,
    /// Snow
    Snow,
    /// The provider could not be reached or answered with garbage
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Every condition, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::Cloudy,
        Self::Rain,
        Self::Snow,
        Self::Unknown,
    ];

    /// Snake-case tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the outdoor variant should be preferred
    #[must_use]
    pub const fn prefers_outdoor(self) -> bool {
        matches!(self, Self::Clear | Self::PartlyCloudy)
    }

    /// Map an `OpenWeatherMap` `weather[].main` value to a condition.
    ///
    /// Unlisted groups (dust, smoke, tornado...) map to [`Self::Cloudy`].
    #[must_use]
    pub fn from_openweather_main(main: &str) -> Self {
        match main.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::PartlyCloudy,
            "rain" | "drizzle" | "thunderstorm" => Self::Rain,
            "snow" => Self::Snow,
            _ => Self::Cloudy,
        }
    }

    /// Parse a tag, degrading unrecognized input to [`Self::Unknown`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|err: PlanError| {
            tracing::warn!("{err}, treating as unknown");
            Self::Unknown
        })
    }
}

impl FromStr for WeatherCondition {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| PlanError::UnknownWeather(s.to_string()))
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_clear_and_partly_cloudy_prefer_outdoor() {
        let outdoor: Vec<_> = WeatherCondition::ALL
            .into_iter()
            .filter(|c| c.prefers_outdoor())
            .collect();
        assert_eq!(
            outdoor,
            vec![WeatherCondition::Clear, WeatherCondition::PartlyCloudy]
        );
    }

    #[test]
    fn test_openweather_mapping() {
        assert_eq!(
            WeatherCondition::from_openweather_main("Clear"),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherCondition::from_openweather_main("Clouds"),
            WeatherCondition::PartlyCloudy
        );
        for main in ["Rain", "Drizzle", "Thunderstorm"] {
            assert_eq!(
                WeatherCondition::from_openweather_main(main),
                WeatherCondition::Rain
            );
        }
        assert_eq!(
            WeatherCondition::from_openweather_main("Snow"),
            WeatherCondition::Snow
        );
        for main in ["Mist", "Fog", "Haze"] {
            assert_eq!(
                WeatherCondition::from_openweather_main(main),
                WeatherCondition::Cloudy
            );
        }
    }

    #[test]
    fn test_unlisted_openweather_group_is_cloudy() {
        assert_eq!(
            WeatherCondition::from_openweather_main("Smoke"),
            WeatherCondition::Cloudy
        );
    }

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(
            "partly_cloudy".parse::<WeatherCondition>().unwrap(),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(
            "Partly Cloudy".parse::<WeatherCondition>().unwrap(),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(
            "RAIN".parse::<WeatherCondition>().unwrap(),
            WeatherCondition::Rain
        );
    }

    #[test]
    fn test_parse_unknown_tag_is_error() {
        let err = "hail".parse::<WeatherCondition>().unwrap_err();
        assert_eq!(err, PlanError::UnknownWeather("hail".to_string()));
    }

    #[test]
    fn test_from_tag_degrades_to_unknown() {
        assert_eq!(WeatherCondition::from_tag("hail"), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_tag("snow"), WeatherCondition::Snow);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly_cloudy\"");
        let back: WeatherCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WeatherCondition::PartlyCloudy);
    }
}
