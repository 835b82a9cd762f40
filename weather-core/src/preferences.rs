//! User display preferences.
//!
//! Weather is always fetched in provider units (°C, km/h, hPa). The unit
//! preferences only affect how values are formatted for display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindSpeedUnit {
    #[default]
    Kmh,
    Mph,
    Ms,
}

impl WindSpeedUnit {
    /// Convert a km/h reading into this unit.
    pub fn convert(self, kmh: f64) -> f64 {
        match self {
            WindSpeedUnit::Kmh => kmh,
            WindSpeedUnit::Mph => kmh / 1.609_344,
            WindSpeedUnit::Ms => kmh / 3.6,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WindSpeedUnit::Kmh => "km/h",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Ms => "m/s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "hPa")]
    HPa,
    #[serde(rename = "inHg")]
    InHg,
    #[serde(rename = "mb")]
    Mb,
}

impl PressureUnit {
    /// Convert a hPa reading into this unit.
    pub fn convert(self, hpa: f64) -> f64 {
        match self {
            PressureUnit::HPa | PressureUnit::Mb => hpa,
            PressureUnit::InHg => hpa * 0.029_529_983,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::HPa => "hPa",
            PressureUnit::InHg => "inHg",
            PressureUnit::Mb => "mb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Units {
    #[serde(default)]
    pub temperature: TemperatureUnit,
    #[serde(default)]
    pub wind_speed: WindSpeedUnit,
    #[serde(default)]
    pub pressure: PressureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

/// A bookmarked place. Declared for the preferences shape; nothing creates
/// or consults these yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserPreferences {
    pub units: Units,
    pub theme: ThemePreference,
    pub locations: Vec<SavedLocation>,
}

/// Partial update applied with [`UserPreferences::apply`].
///
/// Each `Some` field replaces the corresponding top-level field wholesale;
/// nested values are not merged.
#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    pub units: Option<Units>,
    pub theme: Option<ThemePreference>,
    pub locations: Option<Vec<SavedLocation>>,
}

impl UserPreferences {
    pub fn with_units(units: Units) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    /// Shallow merge. No validation is performed.
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(locations) = update.locations {
            self.locations = locations;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.units.temperature, TemperatureUnit::Celsius);
        assert_eq!(prefs.units.wind_speed, WindSpeedUnit::Kmh);
        assert_eq!(prefs.units.pressure, PressureUnit::HPa);
        assert_eq!(prefs.theme, ThemePreference::Auto);
        assert!(prefs.locations.is_empty());
    }

    #[test]
    fn apply_replaces_only_present_fields() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesUpdate {
            theme: Some(ThemePreference::Dark),
            ..Default::default()
        });

        assert_eq!(prefs.theme, ThemePreference::Dark);
        assert_eq!(prefs.units, Units::default());
    }

    #[test]
    fn apply_replaces_units_wholesale() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesUpdate {
            units: Some(Units {
                temperature: TemperatureUnit::Fahrenheit,
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(prefs.units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.units.wind_speed, WindSpeedUnit::Kmh);
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(TemperatureUnit::Fahrenheit.convert(100.0), 212.0);
        assert_eq!(TemperatureUnit::Celsius.convert(-3.5), -3.5);
        assert!((WindSpeedUnit::Ms.convert(36.0) - 10.0).abs() < 1e-9);
        assert!((WindSpeedUnit::Mph.convert(1.609_344) - 1.0).abs() < 1e-9);
        assert!((PressureUnit::InHg.convert(1013.25) - 29.92).abs() < 0.01);
        assert_eq!(PressureUnit::Mb.convert(1013.0), 1013.0);
    }

    #[test]
    fn units_parse_from_partial_toml() {
        let units: Units = toml::from_str("pressure = \"inHg\"\nwindSpeed = \"mph\"").unwrap();
        assert_eq!(units.pressure, PressureUnit::InHg);
        assert_eq!(units.wind_speed, WindSpeedUnit::Mph);
        assert_eq!(units.temperature, TemperatureUnit::Celsius);
    }
}
