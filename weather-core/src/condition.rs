use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of condition labels shown by the dashboard.
///
/// The same label drives both the textual condition and the icon, so there is
/// no separate icon taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Clear,
    Cloudy,
    PartlyCloudy,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Map a WMO weather code reported by the forecast provider to a label.
    ///
    /// Rules are evaluated in order and the first match wins; the order is
    /// part of the contract and must stay as written.
    pub fn from_code(code: i64) -> Self {
        if (51..=67).contains(&code) {
            return Self::Rain;
        }
        if (71..=77).contains(&code) {
            return Self::Snow;
        }
        if code == 95 {
            return Self::Thunderstorm;
        }
        // showers
        if (80..=86).contains(&code) {
            return Self::Rain;
        }
        if code == 0 {
            return Self::Clear;
        }
        if (1..=3).contains(&code) {
            return Self::Cloudy;
        }
        Self::PartlyCloudy
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Cloudy => "cloudy",
            Condition::PartlyCloudy => "partly-cloudy",
            Condition::Rain => "rain",
            Condition::Snow => "snow",
            Condition::Thunderstorm => "thunderstorm",
        }
    }

    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Clear,
            Condition::Cloudy,
            Condition::PartlyCloudy,
            Condition::Rain,
            Condition::Snow,
            Condition::Thunderstorm,
        ]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_band_covers_drizzle_and_freezing_rain() {
        for code in 51..=67 {
            assert_eq!(Condition::from_code(code), Condition::Rain, "code {code}");
        }
    }

    #[test]
    fn snow_band() {
        for code in 71..=77 {
            assert_eq!(Condition::from_code(code), Condition::Snow, "code {code}");
        }
    }

    #[test]
    fn only_95_is_thunderstorm() {
        assert_eq!(Condition::from_code(95), Condition::Thunderstorm);
        assert_eq!(Condition::from_code(96), Condition::PartlyCloudy);
        assert_eq!(Condition::from_code(99), Condition::PartlyCloudy);
    }

    #[test]
    fn showers_map_to_rain_including_snow_showers() {
        for code in 80..=86 {
            assert_eq!(Condition::from_code(code), Condition::Rain, "code {code}");
        }
    }

    #[test]
    fn clear_and_cloudy() {
        assert_eq!(Condition::from_code(0), Condition::Clear);
        for code in 1..=3 {
            assert_eq!(Condition::from_code(code), Condition::Cloudy);
        }
    }

    #[test]
    fn everything_else_is_partly_cloudy() {
        for code in [-5, 4, 45, 48, 50, 68, 70, 78, 79, 87, 94, 200, i64::MIN, i64::MAX] {
            assert_eq!(Condition::from_code(code), Condition::PartlyCloudy, "code {code}");
        }
    }

    #[test]
    fn serializes_as_kebab_case_label() {
        let json = serde_json::to_string(&Condition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly-cloudy\"");

        for condition in Condition::all() {
            let json = serde_json::to_string(condition).unwrap();
            assert_eq!(json, format!("\"{}\"", condition.as_str()));
        }
    }
}
