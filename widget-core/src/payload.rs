use serde_json::{Map, Value};

/// As-received weather payload, before field resolution.
///
/// Two upstream producers emit the same semantic fields under different
/// casing conventions (`location` vs `Location`). The payload is kept as an
/// untyped JSON object so that absent, null, or wrong-typed fields never fail
/// deserialization; validation happens lazily in the tolerant accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload(Map<String, Value>);

impl RawPayload {
    /// Parse a payload from JSON text. Only a top-level object is accepted.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Map<String, Value>>(text).map(Self)
    }

    /// Dual-casing precedence rule, identical for every field: the
    /// lowercase-initial key wins when present and non-null, else the
    /// capitalized key, else the field is absent. No type coercion here.
    fn resolve(&self, lower: &str, upper: &str) -> Option<&Value> {
        match self.0.get(lower) {
            Some(v) if !v.is_null() => Some(v),
            _ => self.0.get(upper).filter(|v| !v.is_null()),
        }
    }

    fn text(&self, lower: &str, upper: &str) -> Option<&str> {
        self.resolve(lower, upper).and_then(Value::as_str)
    }

    fn number(&self, lower: &str, upper: &str) -> Option<f64> {
        self.resolve(lower, upper).and_then(Value::as_f64)
    }

    pub fn location(&self) -> Option<&str> {
        self.text("location", "Location")
    }

    pub fn condition(&self) -> Option<&str> {
        self.text("condition", "Condition")
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.number("temperatureC", "TemperatureC")
    }

    pub fn temperature_f(&self) -> Option<f64> {
        self.number("temperatureF", "TemperatureF")
    }

    pub fn humidity_percent(&self) -> Option<f64> {
        self.number("humidityPercent", "HumidityPercent")
    }

    pub fn wind(&self) -> Option<&str> {
        self.text("wind", "Wind")
    }

    pub fn wind_kph(&self) -> Option<f64> {
        self.number("windKph", "WindKph")
    }

    /// Opaque timestamp string; never parsed as a date.
    pub fn reported_at_utc(&self) -> Option<&str> {
        self.text("reportedAtUtc", "ReportedAtUtc")
    }

    pub fn source(&self) -> Option<&str> {
        self.text("source", "Source")
    }

    /// A non-empty error marks the whole payload as a failure report; every
    /// other field is then irrelevant except location and source.
    pub fn error(&self) -> Option<&str> {
        self.text("error", "Error").filter(|e| !e.is_empty())
    }
}
