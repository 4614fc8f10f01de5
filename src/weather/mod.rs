//! Weather collaborator
//!
//! Supplies the condition tag the scheduler uses to choose between outdoor
//! and indoor workouts.

pub mod client;
pub mod condition;

pub use client::{source_from_config, FixedWeather, OpenWeatherClient, WeatherError, WeatherSource};
pub use condition::WeatherCondition;
