use serde::Serialize;

/// Absolute temperature, stored in Kelvin exactly as the API reports it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Self(kelvin)
    }

    pub const fn kelvin(self) -> f64 {
        self.0
    }

    pub fn fahrenheit(self) -> f64 {
        (self.0 - 273.15) * (9.0 / 5.0) + 32.0
    }

    pub fn celsius(self) -> f64 {
        self.0 - 273.15
    }
}

/// Normalized current conditions for a single location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    pub summary: String,
    pub temperature: Temperature,
    /// Atmospheric pressure, hPa.
    pub pressure: f64,
    /// Relative humidity, percent.
    pub humidity: i64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
}
