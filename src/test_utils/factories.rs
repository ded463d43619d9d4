//! Test data factories for provider payloads

use serde_json::json;

/// Payload from the provider documentation example
pub const SAMPLE_PAYLOAD: &str = r#"{"sys":{"sunrise":1600000000,"sunset":1600040000},"main":{"temp":18.5,"humidity":60},"weather":[{"id":800}]}"#;

/// Factory for raw OpenWeatherMap payloads
pub struct PayloadFactory;

impl PayloadFactory {
    /// Create a payload with the given values
    pub fn create(situation: i64, temperature: f64, humidity: f64, sunrise: i64, sunset: i64) -> String {
        json!({
            "coord": { "lon": 8.65, "lat": 49.87 },
            "weather": [{ "id": situation, "main": "Clear", "description": "clear sky" }],
            "main": { "temp": temperature, "humidity": humidity, "pressure": 1015 },
            "sys": { "sunrise": sunrise, "sunset": sunset, "country": "DE" },
            "name": "Darmstadt"
        })
        .to_string()
    }

    /// Create a well-formed payload that only differs in temperature
    pub fn with_temperature(temperature: f64) -> String {
        Self::create(800, temperature, 60.0, 1_600_000_000, 1_600_040_000)
    }

    /// Create a payload that is valid JSON but lacks the `main` section
    pub fn missing_main() -> String {
        json!({
            "sys": { "sunrise": 1_600_000_000, "sunset": 1_600_040_000 },
            "weather": [{ "id": 800 }]
        })
        .to_string()
    }
}
