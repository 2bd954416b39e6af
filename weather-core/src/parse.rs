use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Conditions, Temperature},
};

// Mirror of the OpenWeatherMap `/data/2.5/weather` payload. Only the fields
// below are read; everything else is ignored by serde.

#[derive(Debug, Deserialize)]
struct OwmWeather {
    #[serde(default)]
    main: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmMain {
    temp: f64,
    pressure: f64,
    humidity: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
}

/// Decode and validate a raw API body into [`Conditions`].
///
/// Temperature is kept in Kelvin; conversion is a presentation concern.
pub fn parse_response(data: &[u8]) -> Result<Conditions, WeatherError> {
    let parsed: OwmResponse =
        serde_json::from_slice(data).map_err(|source| WeatherError::Decode {
            payload: String::from_utf8_lossy(data).into_owned(),
            source,
        })?;

    let OwmResponse { weather, main, wind } = parsed;

    let summary = weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| WeatherError::Validation {
            payload: String::from_utf8_lossy(data).into_owned(),
        })?;

    Ok(Conditions {
        summary,
        temperature: Temperature::from_kelvin(main.temp),
        pressure: main.pressure,
        humidity: main.humidity,
        wind_speed: wind.speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUDY: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds"}],
        "main": {"temp": 290.15, "feels_like": 289.0, "pressure": 1012, "humidity": 55},
        "wind": {"speed": 3.6, "deg": 240},
        "name": "London"
    }"#;

    #[test]
    fn parses_valid_payload() {
        let c = parse_response(CLOUDY.as_bytes()).expect("valid payload");
        assert_eq!(c.summary, "Clouds");
        assert_eq!(c.temperature.kelvin(), 290.15);
        assert_eq!(c.pressure, 1012.0);
        assert_eq!(c.humidity, 55);
        assert_eq!(c.wind_speed, 3.6);
    }

    #[test]
    fn uses_only_first_weather_entry() {
        let body = r#"{"weather":[{"main":"Rain"},{"main":"Mist"}],"main":{},"wind":{}}"#;
        let c = parse_response(body.as_bytes()).unwrap();
        assert_eq!(c.summary, "Rain");
    }

    #[test]
    fn empty_weather_list_is_validation_error() {
        let body = r#"{"weather":[],"main":{},"wind":{}}"#;
        match parse_response(body.as_bytes()) {
            Err(WeatherError::Validation { payload }) => assert_eq!(payload, body),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_is_decode_error() {
        match parse_response(b"not json") {
            Err(WeatherError::Decode { payload, .. }) => assert_eq!(payload, "not json"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_decode_error() {
        let body = r#"{"weather":[{"main":"Clear"}],"main":{"temp":"hot"},"wind":{}}"#;
        let err = parse_response(body.as_bytes()).unwrap_err();
        assert!(matches!(err, WeatherError::Decode { .. }));
        assert!(err.to_string().contains("\"hot\""));
    }
}
