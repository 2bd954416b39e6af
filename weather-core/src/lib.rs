//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The OpenWeatherMap current-weather client
//! - Response decoding and validation
//! - Shared domain models (temperature, conditions)
//! - On-disk configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;

pub use client::{ClientConfig, WeatherClient, WeatherProvider};
pub use config::{API_KEY_ENV, Config};
pub use error::WeatherError;
pub use model::{Conditions, Temperature};
pub use parse::parse_response;
